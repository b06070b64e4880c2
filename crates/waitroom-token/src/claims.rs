//! Position token payload.

use serde::{Deserialize, Serialize};

use waitroom_core::types::Position;

/// Payload signed into every position token: `{"position": n}`.
///
/// No expiry claim: the token lives exactly as long as the cookie holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionClaims {
    /// The visitor's queue position.
    pub position: Position,
}
