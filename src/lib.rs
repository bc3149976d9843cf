//! api-service: health, readiness and demo data over HTTP.
//!
//! Every route maps an exact GET path to a fixed JSON payload or a live
//! snapshot of the running process. The library exposes the router so it can
//! be driven in-process by tests; the binary adds configuration, logging and
//! the server lifecycle.

pub mod config;
pub mod data;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod runtime;
pub mod state;

pub use config::AppConfig;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
