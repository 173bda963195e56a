//! Database layer - connection pool, transactions, migrations, repositories
//!
//! # Design Principles
//!
//! - One pooled connection and one transaction per repository call
//! - Isolation level chosen per operation: READ UNCOMMITTED for reads,
//!   READ COMMITTED for writes, SERIALIZABLE for schema changes
//! - Referential integrity lives in the database (foreign keys), not here

pub mod migrate;
pub mod pool;
pub mod repos;
pub mod tx;

pub use sqlx::PgPool;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use tx::{AccessMode, IsolationLevel, TxOptions};
