//! Forwarding admitted requests to the protected origin.

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderMap, HeaderName, header};
use axum::response::Response;
use tracing::debug;

use waitroom_core::config::OriginConfig;
use waitroom_core::error::{AppError, ErrorKind};
use waitroom_core::result::AppResult;

/// Headers that describe a single connection and must not be forwarded.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    header::HOST,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// The backend serving protected content.
#[async_trait]
pub trait Origin: Send + Sync + std::fmt::Debug + 'static {
    /// Forward a request unchanged and return the origin's response.
    async fn forward(&self, request: Request) -> AppResult<Response>;
}

/// HTTP origin reached through `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpOrigin {
    /// Shared HTTP client (connection pooling).
    client: reqwest::Client,
    /// Origin base URL without trailing slash.
    base_url: String,
    /// Largest request body forwarded.
    max_body_bytes: usize,
}

impl HttpOrigin {
    /// Build the client from configuration.
    pub fn new(config: &OriginConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build origin client", e)
            })?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Absolute origin URL for a request path and query.
    pub fn target_url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }
}

/// Copy headers, dropping hop-by-hop ones.
fn forwardable(headers: &HeaderMap) -> HeaderMap {
    let mut out = headers.clone();
    for name in HOP_BY_HOP.iter() {
        out.remove(name);
    }
    out
}

#[async_trait]
impl Origin for HttpOrigin {
    async fn forward(&self, request: Request) -> AppResult<Response> {
        let (parts, body) = request.into_parts();
        let body = axum::body::to_bytes(body, self.max_body_bytes)
            .await
            .map_err(|e| AppError::validation(format!("Request body rejected: {e}")))?;

        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let url = self.target_url(path_and_query);

        let upstream = self
            .client
            .request(parts.method.clone(), &url)
            .headers(forwardable(&parts.headers))
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Origin, "Origin request failed", e))?;

        let status = upstream.status();
        let headers = forwardable(upstream.headers());
        let bytes = upstream.bytes().await.map_err(|e| {
            AppError::with_source(ErrorKind::Origin, "Failed to read origin response", e)
        })?;

        debug!(method = %parts.method, url = %url, status = status.as_u16(), "Forwarded to origin");

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}
