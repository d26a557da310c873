pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/analyze-pdf", post(handlers::handle_analyze_pdf))
        .route("/analyze", post(handlers::handle_analyze_text))
        .layer(body_limit)
        .with_state(state)
}
