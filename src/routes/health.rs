//! Health check endpoints for container orchestration.
//!
//! `/health` is the liveness probe: it only checks that the process can respond
//! to HTTP, so the orchestrator restarts the instance when it stops answering.
//! `/ready` is the readiness probe: it validates a database connection, and
//! the orchestrator withholds traffic while it reports 503.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

use crate::probe::ProbeResult;
use crate::state::AppState;

impl IntoResponse for ProbeResult {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// Liveness handler. Always 200 with status `UP`.
pub async fn health(State(state): State<AppState>) -> ProbeResult {
    state.probe.liveness()
}

/// Readiness handler. 200 with `READY`, or 503 with `DOWN`.
pub async fn ready(State(state): State<AppState>) -> ProbeResult {
    state.probe.readiness().await
}
