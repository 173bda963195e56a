//! Post endpoints
//!
//! - GET    /post[?id=N]  one post, or all posts when id is absent
//! - POST   /post         create
//! - PATCH  /post         partial update, empty fields keep stored values
//! - DELETE /post?id=N    delete

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::db::repos::PostRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, OptionalId, RequiredId};
use crate::http::server::AppState;
use crate::models::{NewPost, Post};

/// GET /post - single post by id, or the full list
async fn get_posts(
    State(state): State<Arc<AppState>>,
    OptionalId(id): OptionalId,
) -> Result<Response, ApiError> {
    let repo = PostRepo::new(&state.pool);

    match id {
        Some(id) => Ok(Json(repo.get(id).await?).into_response()),
        None => Ok(Json(repo.list().await?).into_response()),
    }
}

/// POST /post - create a post
async fn create_post(
    State(state): State<Arc<AppState>>,
    JsonBody(post): JsonBody<NewPost>,
) -> Result<Json<Post>, ApiError> {
    let post = PostRepo::new(&state.pool).create(post).await?;
    Ok(Json(post))
}

/// PATCH /post - update title and/or body of an existing post
async fn update_post(
    State(state): State<Arc<AppState>>,
    JsonBody(post): JsonBody<Post>,
) -> Result<Json<Post>, ApiError> {
    let post = PostRepo::new(&state.pool).update(post).await?;
    Ok(Json(post))
}

/// DELETE /post?id=N
async fn delete_post(
    State(state): State<Arc<AppState>>,
    RequiredId(id): RequiredId,
) -> Result<StatusCode, ApiError> {
    PostRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Post routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/post",
        get(get_posts)
            .post(create_post)
            .patch(update_post)
            .delete(delete_post),
    )
}
