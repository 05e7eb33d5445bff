pub mod comment;
pub mod post;
pub mod timestamp;

pub mod prelude {
    pub use crate::comment::Comment as CommentEntity;
    pub use crate::post::Post as PostEntity;
}
