//! Application builder: wires router + middleware + state into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use waitroom_core::config::AppConfig;
use waitroom_core::error::AppError;
use waitroom_core::traits::CounterStore;
use waitroom_service::CursorAdvancer;
use waitroom_store::StoreManager;
use waitroom_token::PositionTokens;
use waitroom_worker::AutoAdvancer;

use crate::middleware::logging::request_logging;
use crate::origin::{HttpOrigin, Origin};
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
}

/// Runs the waiting-room server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    // ── Step 1: Counter store ────────────────────────────────────
    tracing::info!(
        "Initializing counter store (provider: {})...",
        config.store.provider
    );
    let store: Arc<dyn CounterStore> = Arc::new(StoreManager::new(&config.store).await?);

    // ── Step 2: Position tokens ──────────────────────────────────
    let tokens = Arc::new(PositionTokens::new(&config.token)?);

    // ── Step 3: Protected origin ─────────────────────────────────
    let origin: Arc<dyn Origin> = Arc::new(HttpOrigin::new(&config.origin)?);
    tracing::info!("Protecting origin {}", config.origin.url);

    // ── Step 4: Shutdown channel & automatic advancer ────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let advancer_handle = AutoAdvancer::from_config(
        CursorAdvancer::new(Arc::clone(&store)),
        &config.queue,
    )
    .map(|auto| {
        let cancel = shutdown_rx.clone();
        tokio::spawn(async move { auto.run(cancel).await })
    });
    if advancer_handle.is_none() {
        tracing::info!("Automatic queue advancement disabled");
    }

    // ── Step 5: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::new(config, store, tokens, origin);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Waiting room listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if let Some(handle) = advancer_handle {
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Automatic advancer did not stop within the grace period");
        }
    }

    tracing::info!("Waiting room shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
