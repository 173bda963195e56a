//! HTTP server layer
//!
//! Axum server with:
//! - Request tracing
//! - Request body read timeout and overall handling timeout
//! - Graceful shutdown with a bounded grace period
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
