pub mod prelude;

pub mod comment;
pub mod post;
