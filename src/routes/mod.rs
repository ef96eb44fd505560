pub mod health;
pub mod results;
pub mod seed;
pub mod tests;

use crate::AppState;
use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

/// Every `/api` endpoint plus the unmatched-route fallback. Static
/// assets and middleware layers are stacked on top in `main`.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/tests", get(tests::list_tests).post(tests::create_test))
        .route(
            "/api/tests/:id",
            get(tests::get_test_by_id)
                .put(tests::update_test)
                .delete(tests::delete_test),
        )
        .route("/api/results", post(results::submit_result))
        .route("/api/results/history", get(results::history))
        .route(
            "/api/results/test/:test_id",
            get(results::list_results_for_test),
        )
        .route("/api/results/:attempt_id", get(results::get_result))
        .route("/api/init-data", post(seed::init_data))
        .route("/api/health", get(health::health))
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "Route not found" })),
    )
}
