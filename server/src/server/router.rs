use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use super::api;
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        // --- Tags ---
        .route("/api/tags", get(api::tags::list_tags))
        .route("/api/tags/batch", post(api::tags::mint_batch))
        .route("/api/tags/{code}", get(api::tags::get_tag))
        .route("/api/tags/{code}/assign", post(api::tags::assign_tag))
        // --- Short-code redirect ---
        .route("/t/{code}", get(api::tags::redirect_tag))
        // --- Label sheets ---
        .route("/api/labels/sheet", get(api::labels::generate_sheet))
        .route("/api/labels/jobs", get(api::labels::list_jobs))
        // --- Middleware ---
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": "1.0.0"
    }))
}
