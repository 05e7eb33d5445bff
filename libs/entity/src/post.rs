use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::comment::Comment;

#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "crate::timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_demo: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn comment(&self, comment_id: i32) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }
}
