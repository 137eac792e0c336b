pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::state::AppState;
use crate::tracking::handlers as tracking;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(analysis::handle_analyze))
        .route("/api/v1/score", post(analysis::handle_score))
        // Application tracking API
        .route(
            "/api/v1/applications",
            get(tracking::handle_list).post(tracking::handle_create),
        )
        .route(
            "/api/v1/applications/export",
            get(tracking::handle_export),
        )
        .route(
            "/api/v1/applications/import",
            post(tracking::handle_import),
        )
        .route(
            "/api/v1/applications/:id",
            delete(tracking::handle_delete).patch(tracking::handle_update),
        )
        .with_state(state)
}
