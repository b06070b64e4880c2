//! # waitroom-token
//!
//! Position tokens: compact JWS credentials binding a visitor to a queue
//! position, verifiable without a store round trip.
//!
//! ## Modules
//!
//! - `claims`: the signed payload
//! - `issuer`: token signing
//! - `verifier`: token verification, returning an outcome rather than an error

pub mod claims;
pub mod issuer;
pub mod verifier;

use std::str::FromStr;

use jsonwebtoken::Algorithm;

use waitroom_core::config::{SUPPORTED_ALGORITHMS, TokenConfig};
use waitroom_core::error::AppError;
use waitroom_core::result::AppResult;
use waitroom_core::types::Position;

pub use claims::PositionClaims;
pub use issuer::PositionTokenIssuer;
pub use verifier::{InvalidReason, PositionTokenVerifier, Verification};

/// Issuer and verifier sharing one secret and algorithm.
#[derive(Debug, Clone)]
pub struct PositionTokens {
    issuer: PositionTokenIssuer,
    verifier: PositionTokenVerifier,
}

impl PositionTokens {
    /// Build both halves from configuration.
    ///
    /// Fails when the secret is empty or the algorithm is not an HMAC one.
    pub fn new(config: &TokenConfig) -> AppResult<Self> {
        if config.secret.is_empty() {
            return Err(AppError::configuration(
                "token.secret must be set to sign position tokens",
            ));
        }
        let algorithm = parse_algorithm(&config.algorithm)?;
        let secret = config.secret.as_bytes();

        Ok(Self {
            issuer: PositionTokenIssuer::new(secret, algorithm),
            verifier: PositionTokenVerifier::new(secret, algorithm),
        })
    }

    /// Sign a token for `position`.
    pub fn issue(&self, position: Position) -> AppResult<String> {
        self.issuer.issue(position)
    }

    /// Verify a presented token.
    pub fn verify(&self, token: &str) -> Verification {
        self.verifier.verify(token)
    }
}

/// Parse a configured algorithm name, accepting only [`SUPPORTED_ALGORITHMS`].
pub fn parse_algorithm(name: &str) -> AppResult<Algorithm> {
    if !SUPPORTED_ALGORITHMS.contains(&name) {
        return Err(AppError::configuration(format!(
            "Unsupported token algorithm '{name}'. Supported: {}",
            SUPPORTED_ALGORITHMS.join(", ")
        )));
    }
    Algorithm::from_str(name).map_err(|e| {
        AppError::configuration(format!("Invalid token algorithm '{name}': {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use waitroom_core::error::ErrorKind;

    fn config(secret: &str, algorithm: &str) -> TokenConfig {
        TokenConfig {
            secret: secret.to_string(),
            algorithm: algorithm.to_string(),
        }
    }

    #[test]
    fn test_round_trip_across_positions() {
        let tokens = PositionTokens::new(&config("secret", "HS256")).unwrap();
        for position in [0, 1, 5, 999_999, u64::MAX] {
            let token = tokens.issue(position).unwrap();
            assert_eq!(tokens.verify(&token), Verification::Valid(position));
        }
    }

    #[test]
    fn test_round_trip_all_algorithms() {
        for algorithm in SUPPORTED_ALGORITHMS {
            let tokens = PositionTokens::new(&config("k", algorithm)).unwrap();
            let token = tokens.issue(17).unwrap();
            assert_eq!(tokens.verify(&token).position(), Some(17));
        }
    }

    #[test]
    fn test_other_secret_is_invalid() {
        let ours = PositionTokens::new(&config("ours", "HS256")).unwrap();
        let theirs = PositionTokens::new(&config("theirs", "HS256")).unwrap();
        let token = theirs.issue(3).unwrap();
        assert_eq!(
            ours.verify(&token),
            Verification::Invalid(InvalidReason::Signature)
        );
    }

    #[test]
    fn test_algorithm_mismatch_is_invalid() {
        let hs256 = PositionTokens::new(&config("same", "HS256")).unwrap();
        let hs512 = PositionTokens::new(&config("same", "HS512")).unwrap();
        let token = hs512.issue(3).unwrap();
        assert!(!hs256.verify(&token).is_valid());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let err = PositionTokens::new(&config("", "HS256")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_asymmetric_algorithm_rejected() {
        assert!(parse_algorithm("RS256").is_err());
        assert!(parse_algorithm("ES256").is_err());
        assert!(parse_algorithm("none").is_err());
        assert!(parse_algorithm("hs256").is_err());
    }

    #[test]
    fn test_every_supported_name_parses() {
        for name in SUPPORTED_ALGORITHMS {
            let algorithm = parse_algorithm(name).unwrap();
            assert_eq!(format!("{algorithm:?}"), name);
        }
    }
}
