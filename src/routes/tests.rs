use crate::{
    dto::test_dto::{CreateTestPayload, UpdateTestPayload},
    error::Result,
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use validator::Validate;

pub async fn list_tests(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let tests = state.test_service.list_tests().await?;
    Ok(Json(json!({ "success": true, "tests": tests })))
}

pub async fn get_test_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let test = state.test_service.get_test_by_id(&id).await?;
    Ok(Json(json!({ "success": true, "test": test })))
}

#[axum::debug_handler]
pub async fn create_test(
    State(state): State<AppState>,
    Json(payload): Json<CreateTestPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let test = state.test_service.create_test(payload).await?;

    let response = json!({
        "success": true,
        "test": test,
        "message": "Test created successfully",
    });
    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn update_test(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTestPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let test = state.test_service.update_test(&id, payload).await?;

    let response = json!({
        "success": true,
        "test": test,
        "message": "Test updated successfully",
    });
    Ok(Json(response))
}

pub async fn delete_test(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.test_service.delete_test(&id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Test deleted successfully",
    })))
}
