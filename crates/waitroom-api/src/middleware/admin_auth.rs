//! HTTP Basic auth for the admin routes.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use subtle::ConstantTimeEq;

use waitroom_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Fixed admin user name.
pub const ADMIN_USER: &str = "admin";

/// Rejects admin requests without `admin:<password>` Basic credentials.
///
/// When no password is configured the routes are open.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.config.admin.password.as_deref() else {
        return Ok(next.run(request).await);
    };

    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(decode_basic)
        .ok_or_else(|| AppError::unauthorized("Admin credentials required"))?;

    let (user, password) = presented;
    let user_ok = user.as_bytes().ct_eq(ADMIN_USER.as_bytes());
    let password_ok = password.as_bytes().ct_eq(expected.as_bytes());
    if !bool::from(user_ok & password_ok) {
        tracing::warn!("Rejected admin request with wrong credentials");
        return Err(AppError::unauthorized("Invalid admin credentials").into());
    }

    Ok(next.run(request).await)
}

/// Split `Basic base64(user:password)` into its parts.
fn decode_basic(value: &str) -> Option<(String, String)> {
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_basic() {
        let header = format!("Basic {}", STANDARD.encode("admin:pa:ss"));
        assert_eq!(
            decode_basic(&header),
            Some(("admin".to_string(), "pa:ss".to_string()))
        );
    }

    #[test]
    fn test_decode_rejects_other_schemes() {
        assert_eq!(decode_basic("Bearer abc"), None);
        assert_eq!(decode_basic("Basic !!!"), None);
    }
}
