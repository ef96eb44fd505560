use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::types::Json;
use sqlx::FromRow;
use std::collections::BTreeMap;

/// The record of one completed run through a Test.
///
/// `test_id` carries no foreign key: a result may outlive the test it
/// was taken against. `answers` maps question id to the chosen option
/// index and `question_times` maps question id to seconds spent;
/// `detailed_results` is whatever per-question records the client chose
/// to attach and is stored opaquely.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub attempt_id: String,
    pub test_id: String,
    pub user_id: Option<String>,
    pub total_questions: i64,
    pub correct_answers: i64,
    pub wrong_answers: i64,
    pub skipped_questions: i64,
    pub score: f64,
    pub percentage: f64,
    pub time_taken: String,
    pub answers: Json<BTreeMap<String, i64>>,
    pub question_times: Json<BTreeMap<String, f64>>,
    pub detailed_results: Json<Vec<JsonValue>>,
    pub completed_at: DateTime<Utc>,
}
