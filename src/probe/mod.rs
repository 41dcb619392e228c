//! Liveness and readiness probes.
//!
//! Liveness answers from process-local state only. Readiness borrows one
//! connection from the injected [`ConnectionProvider`], validates it under a
//! fixed bound, and reports the outcome. Failures of any kind are folded into
//! a `DOWN` result; neither probe ever returns an error to its caller.

pub mod postgres;
pub mod provider;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::Serialize;
use tokio::time::timeout;

use crate::config::DATABASE_CHECK_NAME;
use crate::error::ProbeError;

pub use postgres::PgConnectionProvider;
pub use provider::{ConnectionProvider, PooledConnection};

/// Top-level probe outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProbeStatus {
    Up,
    Down,
    Ready,
}

/// Outcome of a single dependency check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Up,
    Down,
}

/// Body of a probe response, built fresh for every request.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    status: ProbeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    checks: Option<BTreeMap<String, CheckStatus>>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
}

impl ProbeResult {
    fn alive(service: String) -> Self {
        Self {
            status: ProbeStatus::Up,
            service: Some(service),
            checks: None,
            timestamp: Utc::now(),
        }
    }

    /// `READY` only when every check is `UP`.
    fn readiness(checks: BTreeMap<String, CheckStatus>) -> Self {
        let status = if checks.values().all(|c| *c == CheckStatus::Up) {
            ProbeStatus::Ready
        } else {
            ProbeStatus::Down
        };

        Self {
            status,
            service: None,
            checks: Some(checks),
            timestamp: Utc::now(),
        }
    }

    pub fn status(&self) -> ProbeStatus {
        self.status
    }

    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    pub fn check(&self, name: &str) -> Option<CheckStatus> {
        self.checks.as_ref()?.get(name).copied()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// 503 for `DOWN`, 200 otherwise.
    pub fn status_code(&self) -> StatusCode {
        match self.status {
            ProbeStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
            ProbeStatus::Up | ProbeStatus::Ready => StatusCode::OK,
        }
    }
}

/// Liveness and readiness checks for one service instance.
#[derive(Clone)]
pub struct HealthProbe {
    provider: Arc<dyn ConnectionProvider>,
    service_name: String,
    timeout: Duration,
}

impl HealthProbe {
    pub fn new(
        provider: Arc<dyn ConnectionProvider>,
        service_name: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            service_name: service_name.into(),
            timeout,
        }
    }

    /// The process is alive and able to respond. Never blocks.
    pub fn liveness(&self) -> ProbeResult {
        ProbeResult::alive(self.service_name.clone())
    }

    /// Whether the instance can currently serve traffic.
    pub async fn readiness(&self) -> ProbeResult {
        let database = match self.check_database().await {
            Ok(()) => {
                tracing::debug!(dependency = DATABASE_CHECK_NAME, "Dependency check passed");
                CheckStatus::Up
            }
            Err(e) => {
                tracing::warn!(
                    dependency = e.dependency(),
                    error = %e,
                    "Dependency check failed"
                );
                CheckStatus::Down
            }
        };

        let mut checks = BTreeMap::new();
        checks.insert(DATABASE_CHECK_NAME.to_string(), database);
        ProbeResult::readiness(checks)
    }

    /// Acquire and validate a connection, all within `self.timeout`.
    /// The connection is dropped, and so released, when the inner future
    /// completes or is abandoned by the timeout.
    async fn check_database(&self) -> Result<(), ProbeError> {
        let bound = self.timeout;
        let check = async {
            let mut conn = self.provider.acquire().await?;
            if conn.validate(bound).await? {
                Ok(())
            } else {
                Err(ProbeError::unavailable(
                    DATABASE_CHECK_NAME,
                    "connection failed validation",
                ))
            }
        };

        match timeout(bound, check).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::timed_out(DATABASE_CHECK_NAME, bound)),
        }
    }
}
