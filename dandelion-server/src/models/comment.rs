//! Comment records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Comment attached to exactly one post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct Comment {
    pub id: i32,
    pub post_id: i32,
    pub body: String,
}

/// Payload for creating a comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewComment {
    pub post_id: i32,
    pub body: String,
}

impl NewComment {
    pub fn new(post_id: i32, body: impl Into<String>) -> Self {
        Self {
            post_id,
            body: body.into(),
        }
    }
}
