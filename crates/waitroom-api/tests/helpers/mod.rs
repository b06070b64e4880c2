//! Shared test helpers for gateway integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tower::ServiceExt;

use waitroom_api::build_app;
use waitroom_api::origin::Origin;
use waitroom_api::state::AppState;
use waitroom_core::config::AppConfig;
use waitroom_core::error::AppError;
use waitroom_core::result::AppResult;
use waitroom_core::traits::CounterStore;
use waitroom_core::types::{Counter, QueueSnapshot};
use waitroom_store::memory::MemoryCounterStore;
use waitroom_token::PositionTokens;

pub const TEST_SECRET: &str = "integration-secret";

/// Origin that answers `origin:{path}` and counts calls.
#[derive(Debug, Default)]
pub struct StubOrigin {
    pub calls: AtomicUsize,
}

#[async_trait]
impl Origin for StubOrigin {
    async fn forward(&self, request: Request) -> AppResult<Response> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let body = format!("origin:{}", request.uri().path());
        Ok((StatusCode::OK, body).into_response())
    }
}

/// Store whose every call fails, as if Redis were unreachable.
#[derive(Debug)]
pub struct DownStore;

#[async_trait]
impl CounterStore for DownStore {
    async fn read(&self, _counter: Counter) -> AppResult<u64> {
        Err(AppError::store("connection refused"))
    }

    async fn increment(&self, _counter: Counter, _amount: u64) -> AppResult<u64> {
        Err(AppError::store("connection refused"))
    }

    async fn advance_cursor(&self, _amount: u64) -> AppResult<Option<u64>> {
        Err(AppError::store("connection refused"))
    }

    async fn snapshot(&self) -> AppResult<QueueSnapshot> {
        Err(AppError::store("connection refused"))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Err(AppError::store("connection refused"))
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Counters behind the router
    pub store: MemoryCounterStore,
    /// Protected origin stand-in
    pub origin: Arc<StubOrigin>,
    /// Application config
    pub config: AppConfig,
    /// Tokens signed with the same secret as the app
    pub tokens: PositionTokens,
}

/// Configuration used by every test app unless overridden.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.token.secret = TEST_SECRET.to_string();
    config.store.provider = "memory".to_string();
    config
}

impl TestApp {
    /// Create a new test application with an empty queue
    pub fn new() -> Self {
        Self::with_config(test_config(), MemoryCounterStore::new())
    }

    /// Create a test application over preset counters
    pub fn with_counters(length: u64, cursor: u64) -> Self {
        Self::with_config(test_config(), MemoryCounterStore::with_values(length, cursor))
    }

    /// Create a test application with custom configuration
    pub fn with_config(config: AppConfig, store: MemoryCounterStore) -> Self {
        let origin = Arc::new(StubOrigin::default());
        let router = router_over(config.clone(), Arc::new(store.clone()), Arc::clone(&origin));
        let tokens = PositionTokens::new(&config.token).expect("Failed to build tokens");

        Self {
            router,
            store,
            origin,
            config,
            tokens,
        }
    }

    /// Number of requests that reached the origin
    pub fn origin_calls(&self) -> usize {
        self.origin.calls.load(Ordering::SeqCst)
    }

    /// Current counters
    pub async fn counters(&self) -> (u64, u64) {
        let snapshot = self.store.snapshot().await.expect("Failed to read counters");
        (snapshot.length, snapshot.cursor)
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> TestResponse {
        send(&self.router, method, path, headers, body).await
    }

    /// GET a page with an optional queue cookie
    pub async fn visit(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        match cookie {
            Some(cookie) => self.request("GET", path, &[("Cookie", cookie)], None).await,
            None => self.request("GET", path, &[], None).await,
        }
    }
}

/// Build a router over an arbitrary store.
pub fn router_over(
    config: AppConfig,
    store: Arc<dyn CounterStore>,
    origin: Arc<StubOrigin>,
) -> Router {
    let tokens = Arc::new(PositionTokens::new(&config.token).expect("Failed to build tokens"));
    let origin: Arc<dyn Origin> = origin;
    build_app(AppState::new(config, store, tokens, origin))
}

/// Send a request through a router
pub async fn send(
    router: &Router,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<Value>,
) -> TestResponse {
    let mut req = axum::http::Request::builder().method(method).uri(path);

    for (name, value) in headers {
        req = req.header(*name, *value);
    }

    let req = match body {
        Some(body) => req
            .header("Content-Type", "application/json")
            .body(Body::from(
                serde_json::to_string(&body).expect("Failed to serialize body"),
            )),
        None => req.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = router
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Failed to read body");
    let text = String::from_utf8_lossy(&body_bytes).to_string();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        text,
        body,
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub text: String,
    /// Parsed JSON body, `Null` when not JSON
    pub body: Value,
}

impl TestResponse {
    /// The `name=value` pair of the Set-Cookie header, if any
    pub fn cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|pair| pair.trim().to_string())
    }

    /// Raw Set-Cookie header
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
    }
}
