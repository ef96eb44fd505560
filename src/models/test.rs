use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::models::question::Question;

/// A stored test definition. `id` is the external identifier the
/// browser client addresses tests by; it is the primary key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    pub id: String,
    pub name: String,
    pub subject: String,
    /// Duration in minutes.
    pub duration: i64,
    pub questions: Json<Vec<Question>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
