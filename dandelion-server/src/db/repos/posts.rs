//! Post repository
//!
//! - reads: READ UNCOMMITTED, READ ONLY
//! - writes: READ COMMITTED, existence check and mutation in one transaction

use sqlx::PgPool;

use super::DbError;
use crate::db::tx::{self, TxOptions};
use crate::models::{NewPost, Post};

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every post, in whatever order the database returns them.
    pub async fn list(&self) -> Result<Vec<Post>, DbError> {
        let mut tx = tx::begin(self.pool, TxOptions::READ).await?;

        let posts: Vec<Post> = sqlx::query_as("SELECT id, title, body FROM posts")
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(posts)
    }

    /// Get a single post by id.
    pub async fn get(&self, id: i32) -> Result<Post, DbError> {
        let mut tx = tx::begin(self.pool, TxOptions::READ).await?;

        let post: Option<Post> = sqlx::query_as("SELECT id, title, body FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        post.ok_or_else(|| DbError::not_found("post", id))
    }

    /// Insert a post, returning it with the generated id.
    ///
    /// Title and body are stored exactly as given.
    pub async fn create(&self, post: NewPost) -> Result<Post, DbError> {
        let mut tx = tx::begin(self.pool, TxOptions::WRITE).await?;

        let id: i32 = sqlx::query_scalar("INSERT INTO posts (title, body) VALUES ($1, $2) RETURNING id")
            .bind(&post.title)
            .bind(&post.body)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(post_id = id, "post created");
        Ok(post.with_id(id))
    }

    /// Update a post in place.
    ///
    /// Empty title or body keeps the stored value. Returns the merged post.
    pub async fn update(&self, post: Post) -> Result<Post, DbError> {
        let mut tx = tx::begin(self.pool, TxOptions::WRITE).await?;

        let stored: Post = sqlx::query_as("SELECT id, title, body FROM posts WHERE id = $1")
            .bind(post.id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("post", post.id))?;

        let merged = post.merge_onto(&stored);

        sqlx::query("UPDATE posts SET title = $1, body = $2 WHERE id = $3")
            .bind(&merged.title)
            .bind(&merged.body)
            .bind(merged.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(post_id = merged.id, "post updated");
        Ok(merged)
    }

    /// Delete a post by id, returning the deleted id.
    ///
    /// Fails with a foreign key violation while comments still reference it.
    pub async fn delete(&self, id: i32) -> Result<i32, DbError> {
        let mut tx = tx::begin(self.pool, TxOptions::WRITE).await?;

        let existing: Option<i32> = sqlx::query_scalar("SELECT id FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let id = existing.ok_or_else(|| DbError::not_found("post", id))?;

        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(post_id = id, "post deleted");
        Ok(id)
    }
}
