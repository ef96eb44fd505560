use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness plus store connectivity. The process is up as long as this
/// answers; `database` reflects whether the pool can still reach the
/// store.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    let body = json!({
        "success": true,
        "message": "Server is running",
        "database": database,
    });
    (StatusCode::OK, Json(body))
}
