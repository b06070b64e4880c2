//! Admin handlers: queue status and cursor advancement.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use waitroom_core::error::AppError;

use crate::dto::request::AdvanceRequest;
use crate::dto::response::{ApiResponse, CursorResponse, HealthResponse, QueueStatusResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET {admin}/status
pub async fn status(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<QueueStatusResponse>>, ApiError> {
    let snapshot = state.advancer.status().await?;
    Ok(Json(ApiResponse::ok(snapshot.into())))
}

/// POST {admin}/advance
pub async fn advance(
    State(state): State<AppState>,
    Json(req): Json<AdvanceRequest>,
) -> Result<Json<ApiResponse<CursorResponse>>, ApiError> {
    let cursor = state.advancer.advance(req.amount).await?;
    Ok(Json(ApiResponse::ok(CursorResponse { cursor })))
}

/// POST {admin}/advance/all
pub async fn advance_all(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CursorResponse>>, ApiError> {
    let cursor = state.advancer.advance_all().await?;
    Ok(Json(ApiResponse::ok(CursorResponse { cursor })))
}

/// GET {admin}/health
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let reachable = match state.store.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "Counter store health check failed");
            false
        }
    };

    let (status, label) = if reachable {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(ApiResponse::ok(HealthResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: if reachable { "connected" } else { "unreachable" }.to_string(),
        })),
    )
}

/// Admin fallback for unknown admin paths.
pub async fn not_found() -> ApiError {
    AppError::not_found("Unknown admin route").into()
}
