//! Data types shared by the repositories and the HTTP layer
//!
//! Input is accepted as given: missing JSON fields default to zero or the
//! empty string, and no further validation is applied.

pub mod comment;
pub mod post;

pub use comment::{Comment, NewComment};
pub use post::{NewPost, Post};
