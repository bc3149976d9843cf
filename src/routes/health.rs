//! Liveness and readiness probes for container orchestration.

use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub ready: bool,
}

/// Liveness probe.
///
/// Only checks that the process can answer HTTP; stamps the current UTC time.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP",
        service: state.config.service.name.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Readiness probe. The service has no dependencies, so it is ready once listening.
pub async fn ready() -> Json<ReadyResponse> {
    Json(ReadyResponse {
        status: "READY",
        ready: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use chrono::DateTime;

    #[tokio::test]
    async fn health_reports_service_name_and_fresh_timestamp() {
        let mut config = AppConfig::default();
        config.service.name = "probe-test".to_string();

        let Json(body) = health(State(AppState::new(config))).await;
        assert_eq!(body.status, "UP");
        assert_eq!(body.service, "probe-test");
        assert!(body.timestamp.ends_with('Z'));

        let stamped = DateTime::parse_from_rfc3339(&body.timestamp).unwrap();
        let skew = Utc::now().signed_duration_since(stamped);
        assert!(skew.num_seconds().abs() < 5);
    }

    #[tokio::test]
    async fn ready_is_constant() {
        let Json(body) = ready().await;
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "status": "READY", "ready": true })
        );
    }
}
