//! Route handlers organized by resource
//!
//! `/post` and `/comment` each multiplex on the request method; methods
//! without a handler get axum's 405 response.

pub mod comments;
pub mod health;
pub mod posts;
