//! Request middleware.
//!
//! `request_id_layer` generates a UUID v4 for each incoming request and creates
//! a tracing span that wraps the entire request lifecycle. The same id is
//! returned to the caller in the `x-request-id` header.
//!
//! `json_body_layer` parses `application/json` request bodies up front so a
//! malformed body fails the request before it reaches any route.

use std::time::Instant;

use axum::body::Body;
use axum::http::header::{HeaderValue, CONTENT_TYPE};
use axum::{extract::Request, middleware::Next, response::Response};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::JSON_BODY_LIMIT;
use crate::error::AppError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extension type for accessing request ID in handlers if needed.
#[derive(Clone, Debug)]
pub struct RequestId(pub Uuid);

/// Middleware that generates a request ID and creates a request span.
///
/// This should be the outermost middleware layer so the span wraps
/// all request processing, including panic recovery and handlers.
pub async fn request_id_layer(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();
    request.extensions_mut().insert(RequestId(request_id));

    async move {
        let mut response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        // A hyphenated UUID is always a valid header value
        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        response
    }
    .instrument(span)
    .await
}

/// Middleware that validates JSON request bodies.
///
/// Only bodies declared as `application/json` are inspected. An empty body is
/// accepted; otherwise it must be a JSON object or array no larger than
/// `JSON_BODY_LIMIT`. Any failure is an internal fault. The buffered body is
/// handed on unchanged.
pub async fn json_body_layer(request: Request, next: Next) -> Result<Response, AppError> {
    if !is_json_request(&request) {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, JSON_BODY_LIMIT)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read request body: {}", e)))?;

    if !bytes.is_empty() {
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(_)) | Ok(Value::Array(_)) => {}
            Ok(other) => {
                return Err(AppError::Internal(format!(
                    "JSON body must be an object or array, got {}",
                    other
                )))
            }
            Err(e) => return Err(AppError::Internal(format!("Malformed JSON body: {}", e))),
        }
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

fn is_json_request(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::StatusCode,
        middleware::from_fn,
        routing::{get, post},
        Extension, Router,
    };
    use tower::ServiceExt;

    async fn echo_request_id(Extension(RequestId(id)): Extension<RequestId>) -> String {
        id.to_string()
    }

    async fn echo_body(body: String) -> String {
        body
    }

    fn json_request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/echo")
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn handler_sees_the_id_sent_back_in_the_header() {
        let app = Router::new()
            .route("/id", get(echo_request_id))
            .layer(from_fn(request_id_layer));

        let response = app
            .oneshot(axum::http::Request::builder().uri("/id").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header = response.headers()[REQUEST_ID_HEADER]
            .to_str()
            .unwrap()
            .to_string();
        assert_eq!(body_text(response).await, header);
    }

    fn json_app() -> Router {
        Router::new()
            .route("/echo", post(echo_body))
            .layer(from_fn(json_body_layer))
    }

    #[tokio::test]
    async fn valid_json_body_reaches_handler_intact() {
        let response = json_app()
            .oneshot(json_request(r#"{"name":"Alice"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, r#"{"name":"Alice"}"#);
    }

    #[tokio::test]
    async fn empty_json_body_is_accepted() {
        let response = json_app().oneshot(json_request("")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_or_scalar_json_is_internal_error() {
        for body in ["{bad", "42", "\"text\""] {
            let response = json_app().oneshot(json_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{body}");
        }
    }

    #[tokio::test]
    async fn non_json_bodies_are_not_inspected() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/echo")
            .header(CONTENT_TYPE, "text/plain")
            .body(Body::from("{bad"))
            .unwrap();

        let response = json_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "{bad");
    }
}
