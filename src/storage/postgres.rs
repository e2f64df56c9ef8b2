//! `PostgreSQL` allocation storage.
//!
//! The allocation table carries a unique constraint on the token digest and a
//! `BIGSERIAL` index column, so first-writer-wins insertion is a single
//! `INSERT .. ON CONFLICT DO NOTHING` and index assignment is done by the
//! database. This closes the concurrent first-request race inside the storage
//! engine.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use tracing::info;

use crate::config::PostgresStorageConfig;
use crate::domain::AllocationRecord;
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::AllocationStore;

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS shipment_allocations (
    id BIGSERIAL PRIMARY KEY,
    token_digest TEXT NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

/// `PostgreSQL`-backed allocation store.
pub struct PgAllocationStore {
    pool: PgPool,
}

impl PgAllocationStore {
    /// Connect to the database and ensure the allocation table exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be established or the schema
    /// cannot be created.
    pub async fn connect(config: &PostgresStorageConfig) -> StorageResult<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .connect(&config.url)
            .await?;

        sqlx::query(SCHEMA_SQL).execute(&pool).await?;
        info!(
            max_connections = config.max_connections,
            "PostgreSQL allocation store ready"
        );

        Ok(Self { pool })
    }

    fn record_from_row(token_digest: &str, row: &PgRow) -> StorageResult<AllocationRecord> {
        let id: i64 = row.try_get("id")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;

        let index = u64::try_from(id)
            .map_err(|_| StorageError::Serialization(format!("negative allocation index {id}")))?;

        Ok(AllocationRecord {
            token_digest: token_digest.to_string(),
            index,
            created_at,
        })
    }
}

#[async_trait]
impl AllocationStore for PgAllocationStore {
    async fn get(&self, token_digest: &str) -> StorageResult<Option<AllocationRecord>> {
        let row =
            sqlx::query("SELECT id, created_at FROM shipment_allocations WHERE token_digest = $1")
                .bind(token_digest)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|row| Self::record_from_row(token_digest, &row))
            .transpose()
    }

    async fn try_insert(&self, token_digest: &str) -> StorageResult<bool> {
        let result = sqlx::query(
            "INSERT INTO shipment_allocations (token_digest) VALUES ($1) \
             ON CONFLICT (token_digest) DO NOTHING",
        )
        .bind(token_digest)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn health_check(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgresql"
    }
}
