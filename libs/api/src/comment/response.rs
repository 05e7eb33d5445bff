use entity::{prelude::*, timestamp::to_iso};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResp {
    pub id: i32,
    pub post_id: i32,
    pub text: String,
    /// ISO-8601, UTC, millisecond precision
    pub timestamp: String,
}

impl From<CommentEntity> for CommentResp {
    fn from(value: CommentEntity) -> Self {
        Self {
            id: value.id,
            post_id: value.post_id,
            text: value.text,
            timestamp: to_iso(&value.timestamp),
        }
    }
}
