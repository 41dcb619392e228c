//! Shared application state for request handlers.

use crate::probe::HealthProbe;

/// Shared application state, cloned into every handler.
///
/// Holds the health probe, which owns the connection provider used for
/// readiness checks. Configuration is consumed at startup while building the
/// probe and server, so handlers never need it.
#[derive(Clone)]
pub struct AppState {
    pub probe: HealthProbe,
}

impl AppState {
    /// Creates a new application state around the given probe.
    pub fn new(probe: HealthProbe) -> Self {
        Self { probe }
    }
}
