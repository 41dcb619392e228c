//! Connection seam between the readiness probe and the backing store.
//!
//! A provider hands out exclusively-owned connections. Dropping the returned
//! box gives the connection back to its pool, so release happens on every
//! exit path, including a timed-out or cancelled probe.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProbeError;

/// A source of pooled connections, shared across concurrent probes.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// Borrow one connection from the pool.
    async fn acquire(&self) -> Result<Box<dyn PooledConnection>, ProbeError>;
}

/// A borrowed connection that can check its own health.
#[async_trait]
pub trait PooledConnection: Send {
    /// Round-trip against the store. `Ok(false)` means the connection
    /// answered but is not usable.
    async fn validate(&mut self, timeout: Duration) -> Result<bool, ProbeError>;
}
