//! Comment repository
//!
//! Comments reference posts through `fk_comment_post_id`; inserting one for
//! a missing post is rejected by the database, not checked here.

use sqlx::PgPool;

use super::DbError;
use crate::db::tx::{self, TxOptions};
use crate::models::{Comment, NewComment};

/// Comment repository
pub struct CommentRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CommentRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the comments of one post. A post without comments yields an
    /// empty list, as does a post id that does not exist.
    pub async fn list_for_post(&self, post_id: i32) -> Result<Vec<Comment>, DbError> {
        let mut tx = tx::begin(self.pool, TxOptions::READ).await?;

        let comments: Vec<Comment> =
            sqlx::query_as("SELECT id, post_id, body FROM comment WHERE post_id = $1")
                .bind(post_id)
                .fetch_all(&mut *tx)
                .await?;

        tx.commit().await?;
        Ok(comments)
    }

    /// Insert a comment, returning it with the generated id.
    pub async fn create(&self, comment: NewComment) -> Result<Comment, DbError> {
        let mut tx = tx::begin(self.pool, TxOptions::WRITE).await?;

        let created: Comment = sqlx::query_as(
            r#"
            INSERT INTO comment (post_id, body)
            VALUES ($1, $2)
            RETURNING id, post_id, body
            "#,
        )
        .bind(comment.post_id)
        .bind(&comment.body)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(comment_id = created.id, post_id = created.post_id, "comment created");
        Ok(created)
    }

    /// Delete a comment by id, returning the deleted id.
    pub async fn delete(&self, id: i32) -> Result<i32, DbError> {
        let mut tx = tx::begin(self.pool, TxOptions::WRITE).await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM comment WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        if !exists {
            return Err(DbError::not_found("comment", id));
        }

        let deleted: i32 = sqlx::query_scalar("DELETE FROM comment WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(comment_id = deleted, "comment deleted");
        Ok(deleted)
    }
}
