//! Shared mocks for probe and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bankapp::{AppState, ConnectionProvider, HealthProbe, PooledConnection, ProbeError};

/// Short bound so timeout tests finish quickly
#[allow(dead_code)]
pub const TEST_TIMEOUT: Duration = Duration::from_millis(100);

/// How the mock database behaves for every acquire.
#[derive(Clone, Copy, Debug)]
#[allow(dead_code)]
pub enum Behavior {
    /// Connection validates successfully
    Healthy,
    /// Pool refuses to hand out a connection
    AcquireFails,
    /// Pool never hands out a connection
    AcquireHangs,
    /// Connection answers but reports itself unusable
    Invalid,
    /// Driver error during validation
    ValidateErrors,
    /// Validation never returns
    ValidateHangs,
}

/// Connection provider that counts every acquire and release.
pub struct MockProvider {
    behavior: Behavior,
    acquired: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockProvider {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            acquired: Arc::new(AtomicUsize::new(0)),
            released: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectionProvider for MockProvider {
    async fn acquire(&self) -> Result<Box<dyn PooledConnection>, ProbeError> {
        match self.behavior {
            Behavior::AcquireFails => Err(ProbeError::unavailable("database", "connection refused")),
            Behavior::AcquireHangs => std::future::pending().await,
            behavior => {
                self.acquired.fetch_add(1, Ordering::SeqCst);
                Ok(Box::new(MockConnection {
                    behavior,
                    released: self.released.clone(),
                }))
            }
        }
    }
}

struct MockConnection {
    behavior: Behavior,
    released: Arc<AtomicUsize>,
}

impl Drop for MockConnection {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PooledConnection for MockConnection {
    async fn validate(&mut self, _timeout: Duration) -> Result<bool, ProbeError> {
        match self.behavior {
            Behavior::Invalid => Ok(false),
            Behavior::ValidateErrors => Err(ProbeError::unavailable("database", "driver error")),
            Behavior::ValidateHangs => std::future::pending().await,
            _ => Ok(true),
        }
    }
}

#[allow(dead_code)]
pub fn probe_with(provider: Arc<MockProvider>) -> HealthProbe {
    HealthProbe::new(provider, "bankapp", TEST_TIMEOUT)
}

#[allow(dead_code)]
pub fn test_state(provider: Arc<MockProvider>) -> AppState {
    AppState::new(probe_with(provider))
}
