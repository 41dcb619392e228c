//! Postgres connection provider backed by an sqlx pool.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Postgres;
use tokio::time::timeout;

use super::provider::{ConnectionProvider, PooledConnection};
use crate::config::{DatabaseConfig, DATABASE_CHECK_NAME};
use crate::error::ProbeError;

/// Lightweight statement used to validate a borrowed connection
const VALIDATION_QUERY: &str = "SELECT 1";

#[derive(Clone, Debug)]
pub struct PgConnectionProvider {
    pool: PgPool,
}

impl PgConnectionProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a lazily-connecting pool so the process can start, and answer
    /// liveness, while the database is still unreachable.
    pub fn connect_lazy(
        url: &str,
        config: &DatabaseConfig,
        acquire_timeout: Duration,
    ) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_lazy(url)?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ConnectionProvider for PgConnectionProvider {
    async fn acquire(&self) -> Result<Box<dyn PooledConnection>, ProbeError> {
        let conn = self.pool.acquire().await?;
        Ok(Box::new(PgPooledConnection { conn }))
    }
}

struct PgPooledConnection {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl PooledConnection for PgPooledConnection {
    async fn validate(&mut self, bound: Duration) -> Result<bool, ProbeError> {
        match timeout(bound, sqlx::query(VALIDATION_QUERY).execute(&mut *self.conn)).await {
            Ok(Ok(_)) => Ok(true),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(ProbeError::timed_out(DATABASE_CHECK_NAME, bound)),
        }
    }
}
