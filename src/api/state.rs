//! Application state for Axum handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::service::LabelService;
use crate::storage::traits::AllocationStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Storage backend.
    pub storage: Arc<dyn AllocationStore>,
    /// Label service.
    pub label_service: Arc<LabelService>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: Arc<AppConfig>, storage: Arc<dyn AllocationStore>) -> Self {
        let label_service = Arc::new(LabelService::new(
            config.scheme.clone(),
            Arc::clone(&storage),
        ));

        Self {
            config,
            storage,
            label_service,
        }
    }
}
