//! Comment endpoints
//!
//! The `id` query parameter means the post id for GET and the comment id
//! for DELETE.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::repos::CommentRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, RequiredId};
use crate::http::server::AppState;
use crate::models::{Comment, NewComment};

/// GET /comment?id=<post id> - comments of one post
async fn list_comments(
    State(state): State<Arc<AppState>>,
    RequiredId(post_id): RequiredId,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = CommentRepo::new(&state.pool).list_for_post(post_id).await?;
    Ok(Json(comments))
}

/// POST /comment - attach a comment to a post
async fn create_comment(
    State(state): State<Arc<AppState>>,
    JsonBody(comment): JsonBody<NewComment>,
) -> Result<Json<Comment>, ApiError> {
    let comment = CommentRepo::new(&state.pool).create(comment).await?;
    Ok(Json(comment))
}

/// DELETE /comment?id=N
async fn delete_comment(
    State(state): State<Arc<AppState>>,
    RequiredId(id): RequiredId,
) -> Result<StatusCode, ApiError> {
    CommentRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Comment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/comment",
        get(list_comments).post(create_comment).delete(delete_comment),
    )
}
