//! Transactions with an explicit isolation level
//!
//! sqlx's `Pool::begin` always starts a transaction with the server default
//! isolation. The level and access mode are set with `SET TRANSACTION`, which
//! PostgreSQL requires to be the first statement after `BEGIN`.

use sqlx::{PgPool, Postgres, Transaction};

/// Transaction isolation level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationLevel {
    /// PostgreSQL treats this as READ COMMITTED
    ReadUncommitted,
    ReadCommitted,
    Serializable,
}

impl IsolationLevel {
    fn as_sql(&self) -> &'static str {
        match self {
            Self::ReadUncommitted => "READ UNCOMMITTED",
            Self::ReadCommitted => "READ COMMITTED",
            Self::Serializable => "SERIALIZABLE",
        }
    }
}

/// Transaction access mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly,
    ReadWrite,
}

impl AccessMode {
    fn as_sql(&self) -> &'static str {
        match self {
            Self::ReadOnly => "READ ONLY",
            Self::ReadWrite => "READ WRITE",
        }
    }
}

/// Options applied when a transaction starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOptions {
    pub isolation: IsolationLevel,
    pub access: AccessMode,
}

impl TxOptions {
    /// Lookups and scans
    pub const READ: Self = Self {
        isolation: IsolationLevel::ReadUncommitted,
        access: AccessMode::ReadOnly,
    };

    /// Inserts, updates, deletes
    pub const WRITE: Self = Self {
        isolation: IsolationLevel::ReadCommitted,
        access: AccessMode::ReadWrite,
    };

    /// DDL
    pub const SCHEMA: Self = Self {
        isolation: IsolationLevel::Serializable,
        access: AccessMode::ReadWrite,
    };

    /// The `SET TRANSACTION` statement for these options.
    pub fn statement(&self) -> String {
        format!(
            "SET TRANSACTION ISOLATION LEVEL {}, {}",
            self.isolation.as_sql(),
            self.access.as_sql()
        )
    }
}

/// Acquire a pooled connection and begin a transaction with `opts`.
///
/// The returned guard rolls back when dropped without `commit`, which also
/// returns the connection to the pool.
pub async fn begin(
    pool: &PgPool,
    opts: TxOptions,
) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
    let statement = opts.statement();
    let mut tx = pool.begin().await?;
    sqlx::query(&statement).execute(&mut *tx).await?;
    Ok(tx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_is_uncommitted_and_read_only() {
        assert_eq!(
            TxOptions::READ.statement(),
            "SET TRANSACTION ISOLATION LEVEL READ UNCOMMITTED, READ ONLY"
        );
    }

    #[test]
    fn write_and_schema_levels() {
        assert!(TxOptions::WRITE.statement().contains("READ COMMITTED, READ WRITE"));
        assert!(TxOptions::SCHEMA.statement().contains("SERIALIZABLE, READ WRITE"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn begin_applies_isolation_level() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");

        let mut tx = begin(&pool, TxOptions::SCHEMA).await.expect("begin failed");
        let level: String = sqlx::query_scalar("SHOW transaction_isolation")
            .fetch_one(&mut *tx)
            .await
            .expect("query failed");
        tx.rollback().await.expect("rollback failed");

        assert_eq!(level, "serializable");
    }
}
