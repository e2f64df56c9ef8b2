//! Router setup and configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{health, label};
use crate::api::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    // Health and metrics routes
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/metrics", get(health::metrics));

    // Label generation routes
    let label_routes = Router::new()
        .route("/twoway", post(label::create_twoway))
        .route("/oneway", post(label::create_oneway));

    // Combine all routes
    Router::new()
        .merge(health_routes)
        .nest("/v1/labels", label_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
