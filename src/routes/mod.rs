//! HTTP route table.
//!
//! Every route is an exact GET path mapped to a JSON handler. Static data
//! routes share a public Cache-Control header; routes that read the clock or
//! the process get `no-store`. Anything else, including a known path with the
//! wrong method, falls through to a JSON 404.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod api;
pub mod health;
pub mod home;

use std::any::Any;

use axum::{
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum::http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::{catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer};

use crate::config::{CACHE_CONTROL_LIVE, CACHE_CONTROL_STATIC_DATA};
use crate::error::AppError;
use crate::middleware::{json_body_layer, request_id_layer};
use crate::state::AppState;

pub const INDEX_PATH: &str = "/";
pub const HEALTH_PATH: &str = "/health";
pub const READY_PATH: &str = "/ready";
pub const USERS_PATH: &str = "/api/users";
pub const ITEMS_PATH: &str = "/api/items";
pub const ENV_PATH: &str = "/api/env";

/// Creates the Axum router with all routes, cache headers and error fallbacks.
pub fn create_router(state: AppState) -> Router {
    create_router_with(state, Router::new())
}

/// Like [`create_router`], but merges `extra` routes into the route table
/// so they run behind the same fallbacks and middleware stack.
pub fn create_router_with(state: AppState, extra: Router<AppState>) -> Router {
    // Static payloads - identical for every request
    let static_routes = Router::new()
        .route(INDEX_PATH, get(home::index))
        .route(READY_PATH, get(health::ready))
        .route(USERS_PATH, get(api::list_users))
        .route(ITEMS_PATH, get(api::list_items))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_STATIC_DATA),
        ));

    // Live payloads - read the clock or the process, never cache
    let mut live_routes = Router::new().route(HEALTH_PATH, get(health::health));
    if state.config.api.expose_env {
        live_routes = live_routes.route(ENV_PATH, get(api::env));
    }
    let live_routes = live_routes.layer(SetResponseHeaderLayer::if_not_present(
        CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL_LIVE),
    ));

    Router::new()
        .merge(static_routes)
        .merge(live_routes)
        .merge(extra)
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(state)
        // JSON request bodies must parse, even though no route reads them
        .layer(middleware::from_fn(json_body_layer))
        // Panics become a logged 500 instead of a dropped connection
        .layer(CatchPanicLayer::custom(handle_panic))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}

/// Fallback for unmatched paths and unsupported methods.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Convert a handler panic into the generic 500 response.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("Handler panicked: {}", detail)).into_response()
}
