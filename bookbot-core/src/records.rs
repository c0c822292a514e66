//! Persistence gateway for booking records.
//!
//! `RecordStore` is the seam the form state machine talks through, so tests
//! can substitute a double. The Postgres implementation owns the single
//! shared pool; a failed startup connection leaves it degraded, where every
//! insert reports failure and the process keeps serving traffic.

use crate::config::DatabaseConfig;
use crate::db;
use crate::error::BotError;
use crate::models::{NewRecord, Record};
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert one completed form. Failures are logged with detail and
    /// surfaced only as `false`; nothing propagates to the caller.
    async fn add_record(&self, record: &NewRecord) -> bool;

    /// Probe the backing store; `Ok` carries the server version string.
    async fn health_check(&self) -> Result<String, BotError>;

    /// Release the connection. Safe to call when never connected.
    async fn close(&self);
}

pub struct PgRecordStore {
    pool: Option<PgPool>,
}

impl PgRecordStore {
    /// Connect and ensure the records table exists. Any failure is logged
    /// and yields a degraded store; there is no retry loop.
    pub async fn connect(config: &DatabaseConfig) -> Self {
        let pool = match db::create_pool(config).await {
            Ok(pool) => pool,
            Err(e) => {
                tracing::error!(error = %e, "Database connection failed; running degraded");
                return Self { pool: None };
            }
        };

        if let Err(e) = db::ensure_schema(&pool).await {
            tracing::error!(error = %e, "Schema setup failed; running degraded");
            pool.close().await;
            return Self { pool: None };
        }

        tracing::info!("Connected to PostgreSQL");
        Self { pool: Some(pool) }
    }

    /// Wrap an existing pool (integration tests connect on their own terms).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool: Some(pool) }
    }
}

/// The single parameterized insert behind `add_record`.
pub async fn insert_record(pool: &PgPool, record: &NewRecord) -> Result<Record, sqlx::Error> {
    sqlx::query_as::<_, Record>(
        "INSERT INTO records (user_id, name, phone, date) VALUES ($1, $2, $3, $4) \
         RETURNING id, user_id, name, phone, date, created_at",
    )
    .bind(record.user_id)
    .bind(&record.name)
    .bind(&record.phone)
    .bind(&record.date)
    .fetch_one(pool)
    .await
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn add_record(&self, record: &NewRecord) -> bool {
        let Some(pool) = &self.pool else {
            tracing::error!(user_id = record.user_id, "Record dropped: no database connection");
            return false;
        };

        match insert_record(pool, record).await {
            Ok(row) => {
                tracing::info!(id = row.id, user_id = row.user_id, "Record stored");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, user_id = record.user_id, "Failed to store record");
                false
            }
        }
    }

    async fn health_check(&self) -> Result<String, BotError> {
        let pool = self.pool.as_ref().ok_or(BotError::DatabaseUnavailable)?;
        Ok(db::health_check(pool).await?)
    }

    async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
