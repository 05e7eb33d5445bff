use entity::{prelude::*, timestamp::to_iso};
use serde::Serialize;
use utoipa::ToSchema;

use crate::comment::response::CommentResp;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResp {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// ISO-8601, UTC, millisecond precision
    pub timestamp: String,
    pub is_demo: bool,
    pub comments: Vec<CommentResp>,
}

impl From<PostEntity> for PostResp {
    fn from(value: PostEntity) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            timestamp: to_iso(&value.timestamp),
            is_demo: value.is_demo,
            comments: value.comments.into_iter().map(CommentResp::from).collect(),
        }
    }
}
