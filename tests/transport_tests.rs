//! Transport behavior against a live local mock server.
//!
//! Spins up an axum server on a random port and drives the client over real
//! HTTP: header injection and override, JSON/text negotiation, error
//! normalization, timeout abort, and concurrent independent calls.

use axum::extract::{Path, RawQuery};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use dapi_client::{
    ConnectionMode, CreateSessionOptions, DApi, DApiClient, DApiConfig, DApiError, Query,
    RequestOptions, ResponseBody, SessionStatus,
};

fn app() -> Router {
    Router::new()
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .route(
            "/",
            get(|| async { Json(json!({ "version": "1.4.2", "name": "d-api" })) }),
        )
        .route("/echo/{n}", get(echo_n))
        .route("/echo-headers", get(echo_headers))
        .route("/echo-query", get(echo_query))
        .route("/echo-body", post(echo_body))
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))) }),
        )
        .route(
            "/limit",
            get(|| async {
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "session limit reached", "code": 4009 })),
                )
            }),
        )
        .route(
            "/boom",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "internal server error") }),
        )
        .route("/text", get(|| async { "pong" }))
        .route("/slow", get(slow))
        .route("/api/v1/sessions", post(create_session))
}

async fn echo_n(Path(n): Path<u64>) -> Json<Value> {
    Json(json!({ "n": n }))
}

async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    Json(json!({
        "authorization": header("authorization"),
        "accept": header("accept"),
        "content-type": header("content-type"),
    }))
}

async fn echo_query(RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!({ "query": query }))
}

async fn echo_body(Json(body): Json<Value>) -> Json<Value> {
    Json(body)
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
    Json(json!({ "status": "late" }))
}

async fn create_session(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Session created",
            "sessionId": body["sessionId"],
            "provider": "whatsmeow",
            "status": "connecting",
        })),
    )
}

async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app()).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(base_url: &str, timeout_ms: u64) -> DApiClient {
    DApiClient::new(&DApiConfig {
        api_key: "test-key".to_string(),
        base_url: base_url.to_string(),
        timeout_ms,
    })
    .unwrap()
}

#[tokio::test]
async fn default_headers_are_injected() {
    let base = spawn_server().await;
    let client = client_for(&base, 30_000);

    let echoed: Value = client.get("/echo-headers", Query::new()).await.unwrap();

    assert_eq!(echoed["authorization"], json!("test-key"));
    assert_eq!(echoed["accept"], json!("application/json"));
    assert_eq!(echoed["content-type"], json!("application/json"));
}

#[tokio::test]
async fn caller_headers_override_defaults() {
    let base = spawn_server().await;
    let client = client_for(&base, 30_000);

    let mut headers = HeaderMap::new();
    headers.insert("authorization", HeaderValue::from_static("override-key"));
    headers.insert("accept", HeaderValue::from_static("text/plain"));

    let echoed: Value = client
        .request(
            "/echo-headers",
            RequestOptions {
                headers,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(echoed["authorization"], json!("override-key"));
    assert_eq!(echoed["accept"], json!("text/plain"));
    assert_eq!(echoed["content-type"], json!("application/json"));
}

#[tokio::test]
async fn json_body_round_trips() {
    let base = spawn_server().await;
    let client = client_for(&base, 30_000);

    let body = json!({
        "sessionId": "s1",
        "nested": { "numbers": [1, 2, 3], "flag": true },
        "text": "olá",
    });
    let echoed: Value = client
        .post("/echo-body", Some(body.clone()), Query::new())
        .await
        .unwrap();

    assert_eq!(echoed, body);
}

#[tokio::test]
async fn query_parameters_reach_the_server_and_omitted_keys_do_not() {
    let base = spawn_server().await;
    let client = client_for(&base, 30_000);

    let query = Query::new()
        .set("sessionId", "s1")
        .set_opt("search", None::<&str>)
        .set_opt("limit", Some(25u32));
    let echoed: Value = client.get("/echo-query", query).await.unwrap();

    assert_eq!(echoed["query"], json!("sessionId=s1&limit=25"));
}

#[tokio::test]
async fn json_error_body_is_normalized() {
    let base = spawn_server().await;
    let client = client_for(&base, 30_000);

    let err = client.get::<Value>("/missing", Query::new()).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "not found");
    match err {
        DApiError::Api { status, payload, .. } => {
            assert_eq!(status, 404);
            assert_eq!(payload, Some(json!({ "error": "not found" })));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn numeric_error_code_is_carried() {
    let base = spawn_server().await;
    let client = client_for(&base, 30_000);

    let err = client.get::<Value>("/limit", Query::new()).await.unwrap_err();

    match err {
        DApiError::Api { code, message, .. } => {
            assert_eq!(code, Some(4009));
            assert_eq!(message, "session limit reached");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_gets_fallback_message() {
    let base = spawn_server().await;
    let client = client_for(&base, 30_000);

    let err = client.get::<Value>("/boom", Query::new()).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Request failed with status 500");
    match err {
        DApiError::Api { payload, .. } => {
            assert_eq!(payload, Some(json!("internal server error")));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn plain_text_success_returns_raw_text() {
    let base = spawn_server().await;
    let client = client_for(&base, 30_000);

    let raw = client
        .request_raw("/text", RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(raw, ResponseBody::Text("pong".to_string()));

    let typed: String = client.get("/text", Query::new()).await.unwrap();
    assert_eq!(typed, "pong");
}

#[tokio::test]
async fn timeout_aborts_and_does_not_poison_later_calls() {
    let base = spawn_server().await;
    let client = client_for(&base, 200);

    let err = client.get::<Value>("/slow", Query::new()).await.unwrap_err();
    assert!(matches!(err, DApiError::Timeout));
    assert_eq!(err.status(), Some(408));
    assert_eq!(err.to_string(), "Request timed out");

    // The aborted exchange leaves nothing behind; the same client works.
    let health: Value = client.get("/health", Query::new()).await.unwrap();
    assert_eq!(health["status"], json!("ok"));
}

#[tokio::test]
async fn concurrent_calls_resolve_independently() {
    let base = spawn_server().await;
    let client = client_for(&base, 30_000);

    let calls = (0..50u64).map(|n| {
        let client = client.clone();
        async move {
            let echoed: Value = client
                .get(&format!("/echo/{n}"), Query::new())
                .await
                .unwrap();
            (n, echoed)
        }
    });

    for (n, echoed) in futures::future::join_all(calls).await {
        assert_eq!(echoed["n"], json!(n));
    }
}

#[tokio::test]
async fn network_failure_passes_through_unnormalized() {
    // Grab a port that nothing is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{addr}"), 30_000);
    let err = client.get::<Value>("/health", Query::new()).await.unwrap_err();

    assert!(matches!(err, DApiError::Http(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn facade_health_info_and_session_create() {
    let base = spawn_server().await;
    let dapi = DApi::new(&DApiConfig {
        api_key: "test-key".to_string(),
        base_url: base,
        timeout_ms: 30_000,
    })
    .unwrap();

    let health = dapi.get_health().await.unwrap();
    assert_eq!(health.status, "ok");

    let info = dapi.get_info().await.unwrap();
    assert_eq!(info.name, "d-api");
    assert_eq!(info.version, "1.4.2");

    let response = dapi
        .sessions()
        .create(&CreateSessionOptions {
            session_id: "my-session".to_string(),
            webhook_url: None,
            webhook_config: None,
            metadata: None,
            provider: None,
            connection_mode: Some(ConnectionMode::Qr),
            pair_phone: None,
            history_sync: None,
            ignore_groups: None,
            ignore_status: None,
        })
        .await
        .unwrap();

    assert_eq!(response.session_id, "my-session");
    assert_eq!(response.provider, "whatsmeow");
    assert_eq!(response.status, Some(SessionStatus::Connecting));
}
