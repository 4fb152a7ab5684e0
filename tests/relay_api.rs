//! Integration tests for the relay's HTTP surface.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::{routing::post, Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use wedding_rsvp::server::{router, RelayConfig, RelayState};
use wedding_rsvp::{Attendance, Entry, MealPref, Side, SubmitMode, SyncGateway};

const SECRET: &str = "s3cret";

/// Spreadsheet double that records every payload it receives.
struct Backend {
    url: String,
    received: Arc<Mutex<Vec<Value>>>,
}

impl Backend {
    async fn spawn(reply: Value) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let log = received.clone();
        let app = Router::new().route(
            "/exec",
            post(move |Json(body): Json<Value>| {
                let log = log.clone();
                let reply = reply.clone();
                async move {
                    log.lock().unwrap().push(body);
                    Json(reply)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}/exec", addr),
            received,
        }
    }

    fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }
}

fn relay(backend_url: &str) -> Router {
    router(RelayState::new(RelayConfig::new(SECRET, backend_url)))
}

async fn post_json(app: Router, body: Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri("/submit")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let response = relay("http://127.0.0.1:9/exec")
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn options_returns_empty_ok() {
    let response = relay("http://127.0.0.1:9/exec")
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/submit")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let response = relay("http://127.0.0.1:9/exec")
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/submit")
                .header(header::ORIGIN, "https://guests.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn get_submit_is_method_not_allowed() {
    let response = relay("http://127.0.0.1:9/exec")
        .oneshot(Request::get("/submit").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body_json(response).await,
        json!({"ok": false, "error": "method_not_allowed"})
    );
}

#[tokio::test]
async fn wrong_secret_is_rejected_without_forwarding() {
    let backend = Backend::spawn(json!({"ok": true})).await;

    let response = post_json(
        relay(&backend.url),
        json!({"secret": "guess", "data": {"name": "Tom"}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        json!({"ok": false, "error": "unauthorized"})
    );
    assert!(backend.received().is_empty());
}

#[tokio::test]
async fn missing_secret_is_rejected() {
    let backend = Backend::spawn(json!({"ok": true})).await;

    let response = post_json(relay(&backend.url), json!({"data": {"name": "Tom"}})).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(backend.received().is_empty());
}

#[tokio::test]
async fn create_is_forwarded() {
    let backend = Backend::spawn(json!({"ok": true, "row": 7})).await;

    let response = post_json(
        relay(&backend.url),
        json!({"secret": SECRET, "data": {"name": "Tom", "total": 2}, "extra": 1}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"ok": true}));

    let received = backend.received();
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0],
        json!({"secret": SECRET, "action": "create", "data": {"name": "Tom", "total": 2}})
    );
}

#[tokio::test]
async fn delete_is_forwarded_with_id() {
    let backend = Backend::spawn(json!({"ok": true})).await;

    let response = post_json(
        relay(&backend.url),
        json!({"secret": SECRET, "action": "delete", "id": "abc", "data": {"x": 1}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        backend.received()[0],
        json!({"secret": SECRET, "action": "delete", "id": "abc"})
    );
}

#[tokio::test]
async fn list_passes_backend_reply_through() {
    let rows = json!({"ok": true, "data": [{"name": "Tom"}, {"name": "Amy"}]});
    let backend = Backend::spawn(rows.clone()).await;

    let response = post_json(
        relay(&backend.url),
        json!({"secret": SECRET, "action": "list"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, rows);
}

#[tokio::test]
async fn unreachable_backend_is_server_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let response = post_json(
        relay(&format!("http://{}/exec", addr)),
        json!({"secret": SECRET, "data": {"name": "Tom"}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["ok"], false);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn gateway_submits_through_relay() {
    let backend = Backend::spawn(json!({"ok": true})).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = relay(&backend.url);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let gateway = SyncGateway::new(
        SubmitMode::Relay,
        Some(format!("http://{}/submit", addr)),
        SECRET,
    );
    let entry =
        Entry::new("Tom", Side::Groom, Attendance::Yes).with_party(2, MealPref::Veg, 0, 2);

    let outcome = gateway.submit(&entry).await;
    assert!(outcome.is_remote());

    let received = backend.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["action"], "create");
    assert_eq!(received[0]["data"]["name"], "Tom");
    assert_eq!(received[0]["data"]["vegCount"], 2);
    assert_eq!(received[0]["data"]["id"], entry.id.to_string());
}

#[tokio::test]
async fn gateway_with_wrong_secret_falls_back() {
    let backend = Backend::spawn(json!({"ok": true})).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = relay(&backend.url);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let gateway = SyncGateway::new(
        SubmitMode::Relay,
        Some(format!("http://{}/submit", addr)),
        "guess",
    );
    let entry = Entry::new("Tom", Side::Groom, Attendance::No);

    let outcome = gateway.submit(&entry).await;
    assert!(!outcome.is_remote());
    assert!(backend.received().is_empty());
}
