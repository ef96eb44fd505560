use crate::{
    dto::test_dto::SeedTestsPayload, error::Result, services::test_service::SeedOutcome, AppState,
};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use validator::Validate;

/// One-shot seed: inserts the supplied tests only when the store holds
/// none, and otherwise reports how many already exist.
#[axum::debug_handler]
pub async fn init_data(
    State(state): State<AppState>,
    Json(payload): Json<SeedTestsPayload>,
) -> Result<impl IntoResponse> {
    for test in &payload.tests {
        test.validate()?;
    }

    let outcome = state.test_service.seed_tests(payload.tests).await?;

    let message = match outcome {
        SeedOutcome::Seeded(count) => format!("Initialized database with {} tests", count),
        SeedOutcome::AlreadyPopulated(count) => {
            format!("Database already contains {} tests", count)
        }
    };

    Ok(Json(json!({ "success": true, "message": message })))
}
