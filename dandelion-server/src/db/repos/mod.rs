//! Repository implementations for database access
//!
//! Each repository borrows the pool and opens one transaction per call.
//! Existence checks and the mutation they guard share that transaction.

pub mod comments;
pub mod posts;

pub use comments::CommentRepo;
pub use posts::PostRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("foreign key violation: {constraint}")]
    ForeignKeyViolation {
        constraint: String,
        #[source]
        source: sqlx::Error,
    },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        let constraint = match &e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                Some(db.constraint().unwrap_or_default().to_owned())
            }
            _ => None,
        };

        match constraint {
            Some(constraint) => Self::ForeignKeyViolation {
                constraint,
                source: e,
            },
            None => Self::Sqlx(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_stays_generic() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Sqlx(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn not_found_display() {
        let err = DbError::not_found("post", 42);
        assert_eq!(err.to_string(), "not found: post '42'");
    }
}
