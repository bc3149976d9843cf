//! HTTP server module.
//!
//! Serves the router over plain HTTP/1.1 and drains in-flight requests on
//! SIGTERM/SIGINT before exiting.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
