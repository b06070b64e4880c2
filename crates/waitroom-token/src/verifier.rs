//! Position token validation.
//!
//! Verification never fails with an error. Anything that does not check out
//! is [`Verification::Invalid`], which callers treat exactly like a visitor
//! without a token.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use waitroom_core::types::Position;

use super::claims::PositionClaims;

/// Why a presented token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Not a three-part base64url JWS.
    Malformed,
    /// Signature does not match the configured secret.
    Signature,
    /// Header names an algorithm other than the configured one.
    Algorithm,
    /// Payload is not `{"position": <non-negative integer>}`.
    Payload,
}

/// Outcome of verifying a position token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The token is genuine and carries this position.
    Valid(Position),
    /// The token must be ignored.
    Invalid(InvalidReason),
}

impl Verification {
    /// The verified position, if any.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Valid(position) => Some(*position),
            Self::Invalid(_) => None,
        }
    }

    /// Whether the token was accepted.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// Verifies position tokens.
#[derive(Clone)]
pub struct PositionTokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for PositionTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionTokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish()
    }
}

impl PositionTokenVerifier {
    /// Creates a new verifier accepting only `algorithm`.
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Checks the signature (constant-time HMAC comparison) and decodes the
    /// position.
    pub fn verify(&self, token: &str) -> Verification {
        match decode::<PositionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Verification::Valid(data.claims.position),
            Err(e) => {
                let reason = match e.kind() {
                    JwtErrorKind::InvalidSignature => InvalidReason::Signature,
                    JwtErrorKind::InvalidAlgorithm | JwtErrorKind::InvalidAlgorithmName => {
                        InvalidReason::Algorithm
                    }
                    JwtErrorKind::Json(_) | JwtErrorKind::Utf8(_) => InvalidReason::Payload,
                    _ => InvalidReason::Malformed,
                };
                debug!(?reason, "Rejected position token");
                Verification::Invalid(reason)
            }
        }
    }
}
