use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use validator::Validate;

/// Attempt submission. The attempt id is never caller-supplied; the
/// server generates it on insert.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateResultPayload {
    #[validate(length(min = 1, message = "testId must not be empty"))]
    pub test_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub total_questions: i64,
    #[serde(default)]
    pub correct_answers: i64,
    #[serde(default)]
    pub wrong_answers: i64,
    #[serde(default)]
    pub skipped_questions: i64,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub time_taken: String,
    #[serde(default)]
    pub answers: BTreeMap<String, i64>,
    #[serde(default)]
    pub question_times: BTreeMap<String, f64>,
    #[serde(default)]
    pub detailed_results: Vec<JsonValue>,
    /// Optional; the server stamps the completion time when absent.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}
