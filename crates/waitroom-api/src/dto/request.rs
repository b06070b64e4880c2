//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Body of `POST {admin}/advance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceRequest {
    /// Number of visitors to let in.
    pub amount: u64,
}
