//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use waitroom_core::error::{AppError, ErrorKind};

/// Retry hint for transient failures when the caller did not supply one.
pub const DEFAULT_RETRY_AFTER_SECONDS: u64 = 5;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError {
    /// The domain error.
    pub error: AppError,
    /// Seconds to put in `Retry-After` for transient failures.
    pub retry_after: Option<u64>,
}

impl ApiError {
    /// Override the `Retry-After` hint.
    pub fn retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            retry_after: None,
        }
    }
}

/// Status code and error code for an error kind.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Store | ErrorKind::ServiceUnavailable => {
            (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
        }
        ErrorKind::Origin => (StatusCode::BAD_GATEWAY, "ORIGIN_ERROR"),
        ErrorKind::Integrity => (StatusCode::INTERNAL_SERVER_ERROR, "INTEGRITY_ERROR"),
        ErrorKind::Configuration | ErrorKind::Internal => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.error.kind;
        let (status, error_code) = status_for(kind);

        if status.is_server_error() {
            tracing::error!(kind = %kind, error = %self.error.message, "Request failed");
        }

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: self.error.message.clone(),
        };

        let mut response = (status, Json(body)).into_response();

        if kind.is_transient() {
            let seconds = self.retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECONDS);
            if let Ok(value) = HeaderValue::from_str(&seconds.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        if kind == ErrorKind::Unauthorized {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"waitroom-admin\""),
            );
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_failure_is_503_with_retry_after() {
        let response = ApiError::from(AppError::store("down"))
            .retry_after(7)
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers()[header::RETRY_AFTER], "7");
    }

    #[test]
    fn test_timeout_uses_default_retry_after() {
        let response = ApiError::from(AppError::service_unavailable("slow")).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers()[header::RETRY_AFTER], "5");
    }

    #[test]
    fn test_integrity_is_500() {
        let response = ApiError::from(AppError::integrity("cursor > length")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(header::RETRY_AFTER).is_none());
    }

    #[test]
    fn test_unauthorized_challenges_basic() {
        let response = ApiError::from(AppError::unauthorized("no")).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    }

    #[test]
    fn test_origin_is_bad_gateway() {
        assert_eq!(status_for(ErrorKind::Origin).0, StatusCode::BAD_GATEWAY);
    }
}
