//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use waitroom_core::config::AppConfig;
use waitroom_core::traits::CounterStore;
use waitroom_service::{AdmissionService, CursorAdvancer};
use waitroom_token::PositionTokens;

use crate::origin::Origin;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks. None of them
/// hold queue state; that lives in the counter store.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Counter store (Redis or in-memory)
    pub store: Arc<dyn CounterStore>,
    /// Per-request admission decision
    pub admission: Arc<AdmissionService>,
    /// Cursor writer for the admin API
    pub advancer: Arc<CursorAdvancer>,
    /// Protected origin
    pub origin: Arc<dyn Origin>,
}

impl AppState {
    /// Wire the services from their dependencies.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn CounterStore>,
        tokens: Arc<PositionTokens>,
        origin: Arc<dyn Origin>,
    ) -> Self {
        let admission = Arc::new(AdmissionService::new(Arc::clone(&store), tokens));
        let advancer = Arc::new(CursorAdvancer::new(Arc::clone(&store)));
        Self {
            config: Arc::new(config),
            store,
            admission,
            advancer,
            origin,
        }
    }
}
