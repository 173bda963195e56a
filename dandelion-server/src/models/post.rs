//! Post records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Post record, as stored and as returned over HTTP
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub body: String,
}

/// Payload for creating a post. The id is assigned by the database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewPost {
    pub title: String,
    pub body: String,
}

impl NewPost {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Attach the generated id.
    pub fn with_id(self, id: i32) -> Post {
        Post {
            id,
            title: self.title,
            body: self.body,
        }
    }
}

impl Post {
    /// Fill empty fields from the stored version of the same post.
    ///
    /// A field submitted as the empty string means "leave unchanged".
    pub fn merge_onto(mut self, stored: &Post) -> Post {
        if self.title.is_empty() {
            self.title = stored.title.clone();
        }
        if self.body.is_empty() {
            self.body = stored.body.clone();
        }
        self
    }
}
