//! Schema migrations for the posts and comment tables
//!
//! Every statement is idempotent so `run` can be called on each start.

use sqlx::PgPool;

use super::repos::DbError;
use super::tx::{self, TxOptions};

/// Ensure all tables, indexes and constraints exist.
///
/// Runs in a single SERIALIZABLE transaction: either the whole schema is in
/// place afterwards or nothing changed.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running schema migrations...");

    let mut tx = tx::begin(pool, TxOptions::SCHEMA).await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id SERIAL PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            body TEXT NOT NULL
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comment (
            id SERIAL PRIMARY KEY,
            post_id INTEGER NOT NULL,
            body TEXT NOT NULL
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS comment_post_id_idx ON comment (post_id)")
        .execute(&mut *tx)
        .await?;

    // ADD CONSTRAINT has no IF NOT EXISTS form
    sqlx::query(
        r#"
        DO $$
        BEGIN
            IF NOT EXISTS (
                SELECT 1 FROM pg_constraint WHERE conname = 'fk_comment_post_id'
            ) THEN
                ALTER TABLE comment
                    ADD CONSTRAINT fk_comment_post_id
                    FOREIGN KEY (post_id) REFERENCES posts (id);
            END IF;
        END
        $$
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("Schema migrations complete");
    Ok(())
}
