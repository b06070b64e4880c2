//! The queue gate: every non-admin request passes through here.

use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use waitroom_service::Outcome;

use crate::error::ApiError;
use crate::session;
use crate::state::AppState;
use crate::view;

/// Fallback handler: admit to the origin or answer with the waiting room.
pub async fn gate(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
) -> Result<Response, ApiError> {
    let config = &state.config;
    let refresh = config.queue.refresh_interval_seconds;

    debug!(method = %request.method(), path = %request.uri().path(), "Received request");

    if config.origin.is_allowed(request.uri().path()) {
        return Ok(state.origin.forward(request).await?);
    }

    let presented = session::extract(&jar, &config.session);
    let admission = state
        .admission
        .admit(presented.as_deref())
        .await
        .map_err(|e| ApiError::from(e).retry_after(refresh))?;

    let response = match admission.outcome {
        Outcome::Admit => match state.origin.forward(request).await {
            Ok(response) => response,
            Err(e) => ApiError::from(e).into_response(),
        },
        Outcome::Deny { visitors_ahead } => view::waiting_room(visitors_ahead, refresh),
    };

    match admission.issued_token {
        Some(token) => {
            let jar = session::bind(jar, &token, &config.session)?;
            Ok((jar, response).into_response())
        }
        None => Ok(response),
    }
}
