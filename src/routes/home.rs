//! Index route listing the public endpoints.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

use super::{HEALTH_PATH, ITEMS_PATH, READY_PATH, USERS_PATH};

/// Paths advertised on the index page, in display order.
///
/// `/api/env` is served but not listed.
pub const ADVERTISED_ENDPOINTS: &[&str] = &[HEALTH_PATH, READY_PATH, USERS_PATH, ITEMS_PATH];

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: String,
    pub endpoints: &'static [&'static str],
}

pub async fn index(State(state): State<AppState>) -> Json<IndexResponse> {
    Json(IndexResponse {
        message: format!("Welcome to {}", state.config.service.display_name),
        endpoints: ADVERTISED_ENDPOINTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[tokio::test]
    async fn endpoint_list_ignores_env_toggle() {
        for expose_env in [true, false] {
            let mut config = AppConfig::default();
            config.api.expose_env = expose_env;

            let Json(body) = index(State(AppState::new(config))).await;
            assert_eq!(
                body.endpoints,
                ["/health", "/ready", "/api/users", "/api/items"]
            );
        }
    }

    #[tokio::test]
    async fn welcome_uses_display_name() {
        let Json(body) = index(State(AppState::new(AppConfig::default()))).await;
        assert_eq!(body.message, "Welcome to API Service");
    }
}
