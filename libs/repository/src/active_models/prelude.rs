pub use super::comment::Entity as Comment;
pub use super::post::Entity as Post;
