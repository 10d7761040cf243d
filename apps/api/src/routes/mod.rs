pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::optimize::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resume", get(handlers::handle_get_resume))
        .route("/api/v1/optimize", post(handlers::handle_optimize))
        .route(
            "/api/v1/form",
            get(handlers::handle_get_form).put(handlers::handle_put_form),
        )
        .route("/api/v1/export/resume", post(handlers::handle_export_resume))
        .route(
            "/api/v1/export/cover-letter",
            post(handlers::handle_export_cover_letter),
        )
        .with_state(state)
}
