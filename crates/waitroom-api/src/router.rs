//! Route definitions for the waiting-room gateway.
//!
//! Admin routes are nested under `admin.path`; everything else falls through
//! to the gate.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new();

    if state.config.admin.enabled {
        if state.config.admin.password.is_none() {
            tracing::warn!(
                path = %state.config.admin.path,
                "Admin routes are enabled without a password; anybody can advance the queue"
            );
        }
        let path = state.config.admin.path.trim_end_matches('/').to_string();
        router = router.nest(&path, admin_routes(state.clone()));
    }

    router.fallback(handlers::gate::gate).with_state(state)
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/status", get(handlers::admin::status))
        .route("/health", get(handlers::admin::health))
        .route("/advance", post(handlers::admin::advance))
        .route("/advance/all", post(handlers::admin::advance_all))
        .fallback(handlers::admin::not_found)
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::admin_auth::require_admin,
        ))
}
