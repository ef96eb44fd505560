use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::Question;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestPayload {
    #[validate(length(min = 1, message = "Test id must not be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "Test name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Subject must not be empty"))]
    pub subject: String,
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration: i64,
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Optional; the server stamps the creation time when absent.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestPayload {
    // Using serde deserializer to trim and convert empty strings to None
    #[serde(default, deserialize_with = "trim_optional_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub subject: Option<String>,

    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration: Option<i64>,

    pub questions: Option<Vec<Question>>,
}

#[derive(Debug, Deserialize)]
pub struct SeedTestsPayload {
    #[serde(default)]
    pub tests: Vec<CreateTestPayload>,
}

// Custom deserializer to trim strings and convert empty strings to None
fn trim_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}
