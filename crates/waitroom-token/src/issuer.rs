//! Position token creation.

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use tracing::trace;

use waitroom_core::error::AppError;
use waitroom_core::result::AppResult;
use waitroom_core::types::Position;

use super::claims::PositionClaims;

/// Creates signed position tokens.
#[derive(Clone)]
pub struct PositionTokenIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Header carrying the algorithm name.
    header: Header,
}

impl std::fmt::Debug for PositionTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionTokenIssuer")
            .field("algorithm", &self.header.alg)
            .finish()
    }
}

impl PositionTokenIssuer {
    /// Creates a new issuer.
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            header: Header::new(algorithm),
        }
    }

    /// Signs a token over `{position}`. Pure apart from the signature.
    pub fn issue(&self, position: Position) -> AppResult<String> {
        let claims = PositionClaims { position };
        let token = encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode position token: {e}")))?;
        trace!(position, "Signed position token");
        Ok(token)
    }
}
