use crate::{dto::result_dto::CreateResultPayload, error::Result, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use validator::Validate;

#[axum::debug_handler]
pub async fn submit_result(
    State(state): State<AppState>,
    Json(payload): Json<CreateResultPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let result = state.result_service.submit_result(payload).await?;

    let response = json!({
        "success": true,
        "result": result,
        "message": "Result saved successfully",
    });
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn list_results_for_test(
    State(state): State<AppState>,
    Path(test_id): Path<String>,
) -> Result<impl IntoResponse> {
    let listed = state.result_service.list_results_for_test(&test_id).await?;
    Ok(Json(json!({
        "success": true,
        "results": listed.results,
        "stats": listed.stats,
    })))
}

pub async fn get_result(
    State(state): State<AppState>,
    Path(attempt_id): Path<String>,
) -> Result<impl IntoResponse> {
    let result = state
        .result_service
        .get_result_by_attempt_id(&attempt_id)
        .await?;
    Ok(Json(json!({ "success": true, "result": result })))
}

pub async fn history(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let history = state.result_service.history().await?;
    Ok(Json(json!({ "success": true, "history": history })))
}
