//! Authenticated pass-through from guests to the spreadsheet backend.
//!
//! `POST /submit` checks the shared secret and forwards the call; the body's
//! `data` is never inspected. The relay keeps no state between requests.

use axum::{
    body::Bytes,
    extract::State,
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE},
        Method, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::config::RelayConfig;
use crate::sync::{Action, RemoteReply, RemoteRequest};

/// Application state shared across handlers
#[derive(Clone)]
pub struct RelayState {
    config: Arc<RelayConfig>,
    client: reqwest::Client,
}

impl RelayState {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config: Arc::new(config),
            client: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Builds the relay router with CORS open to every origin.
pub fn router(state: RelayState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route(
            "/submit",
            post(submit).options(preflight).fallback(method_not_allowed),
        )
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            (ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
        ],
    )
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(RemoteReply::error("method_not_allowed")),
    )
        .into_response()
}

async fn submit(State(state): State<RelayState>, body: Bytes) -> Response {
    let request = RemoteRequest::from_body(&body);

    if !state.config.authorizes(request.secret.as_deref()) {
        tracing::warn!("Rejected {} request: secret mismatch", request.action());
        return (
            StatusCode::UNAUTHORIZED,
            Json(RemoteReply::error("unauthorized")),
        )
            .into_response();
    }

    let action = request.action();
    match forward(&state, &request.forwarded()).await {
        Ok(reply) if action == Action::List => {
            (StatusCode::OK, Json(passthrough(&reply))).into_response()
        }
        Ok(_) => (StatusCode::OK, Json(RemoteReply::ok())).into_response(),
        Err(message) => {
            tracing::error!("Failed to forward {} request: {}", action, message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RemoteReply::error(message)),
            )
                .into_response()
        }
    }
}

/// Posts the payload to the backend and returns its raw body.
///
/// Only transport failures are errors; the backend's status is not checked.
async fn forward(state: &RelayState, payload: &RemoteRequest) -> Result<Bytes, String> {
    let url = state
        .config
        .backend_url
        .as_deref()
        .ok_or_else(|| "backend URL not configured".to_string())?;

    let response = state
        .client
        .post(url)
        .json(payload)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    tracing::debug!(
        "Forwarded {} request, backend answered {}",
        payload.action(),
        response.status()
    );

    response.bytes().await.map_err(|e| e.to_string())
}

/// The backend's JSON reply verbatim, or a bare `{ok: true}` if it sent
/// something else.
fn passthrough(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|_| serde_json::json!({ "ok": true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_passthrough_keeps_json() {
        let body = br#"{"ok": true, "data": [{"name": "Tom"}]}"#;
        assert_eq!(
            passthrough(body),
            json!({"ok": true, "data": [{"name": "Tom"}]})
        );
    }

    #[test]
    fn test_passthrough_non_json() {
        assert_eq!(passthrough(b"<html></html>"), json!({"ok": true}));
    }
}
