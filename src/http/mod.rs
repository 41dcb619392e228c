//! HTTP server module.
//!
//! Serves the probe router on plain HTTP; TLS is expected to terminate in
//! front of the instance. The server drains in-flight requests on
//! SIGTERM/SIGINT before exiting.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
