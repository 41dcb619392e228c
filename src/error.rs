//! Errors raised while probing downstream dependencies.
//!
//! These never reach the HTTP layer: the readiness probe folds every
//! `ProbeError` into a `DOWN` check and a 503 response.

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("{dependency} unavailable: {reason}")]
    DependencyUnavailable {
        dependency: &'static str,
        reason: String,
    },
}

impl ProbeError {
    pub fn unavailable(dependency: &'static str, reason: impl Into<String>) -> Self {
        ProbeError::DependencyUnavailable {
            dependency,
            reason: reason.into(),
        }
    }

    pub fn timed_out(dependency: &'static str, timeout: Duration) -> Self {
        Self::unavailable(dependency, format!("no response within {:?}", timeout))
    }

    pub fn dependency(&self) -> &'static str {
        match self {
            ProbeError::DependencyUnavailable { dependency, .. } => dependency,
        }
    }
}

impl From<sqlx::Error> for ProbeError {
    fn from(err: sqlx::Error) -> Self {
        ProbeError::unavailable(crate::config::DATABASE_CHECK_NAME, err.to_string())
    }
}
