//! dandelion-server: posts and comments over HTTP
//!
//! A small axum service backed by PostgreSQL. Every request maps to one
//! repository call, and every repository call runs in one transaction.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, CommentRepo, DbError, PostRepo};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
pub use models::{Comment, NewComment, NewPost, Post};
