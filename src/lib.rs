//! bankapp probes: liveness and readiness endpoints for the bankapp service.
//!
//! The library exposes the probe, its connection seam and the router so the
//! binary and the integration tests wire the same pieces.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod probe;
pub mod routes;
pub mod state;

pub use error::ProbeError;
pub use probe::{
    CheckStatus, ConnectionProvider, HealthProbe, PooledConnection, ProbeResult, ProbeStatus,
};
pub use routes::create_router;
pub use state::AppState;
