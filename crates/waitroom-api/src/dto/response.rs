//! Response DTOs.

use serde::{Deserialize, Serialize};

use waitroom_core::types::QueueSnapshot;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Queue counters as seen by an operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueStatusResponse {
    /// Total visitors ever enqueued.
    pub length: u64,
    /// Total visitors admitted.
    pub cursor: u64,
    /// Visitors still waiting.
    pub waiting: u64,
}

impl From<QueueSnapshot> for QueueStatusResponse {
    fn from(snapshot: QueueSnapshot) -> Self {
        Self {
            length: snapshot.length,
            cursor: snapshot.cursor,
            waiting: snapshot.waiting(),
        }
    }
}

/// Cursor value after an advance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorResponse {
    /// New cursor.
    pub cursor: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Counter store reachability.
    pub store: String,
}
