use crate::dto::result_dto::CreateResultPayload;
use crate::error::{Error, Result};
use crate::models::result::TestResult;
use crate::utils::time;
use crate::utils::token::generate_attempt_id;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::SqlitePool;
use std::collections::BTreeMap;

/// Aggregate over one test's result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultStats {
    pub attempts: i64,
    pub best: f64,
    pub last: f64,
    pub average: f64,
}

impl ResultStats {
    pub fn empty() -> Self {
        Self {
            attempts: 0,
            best: 0.0,
            last: 0.0,
            average: 0.0,
        }
    }
}

/// Per-test summary across all attempts, keyed by test id in the
/// history map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub attempts: i64,
    pub best: f64,
    pub last: f64,
    pub last_attempt_id: String,
}

#[derive(Debug, Serialize)]
pub struct ResultsForTest {
    pub results: Vec<TestResult>,
    pub stats: ResultStats,
}

#[derive(Clone)]
pub struct ResultService {
    pool: SqlitePool,
}

impl ResultService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn submit_result(&self, payload: CreateResultPayload) -> Result<TestResult> {
        let attempt_id = generate_attempt_id();
        let completed_at = payload.completed_at.unwrap_or_else(time::now);

        let result = sqlx::query_as::<_, TestResult>(
            r#"
            INSERT INTO results (
                attempt_id, test_id, user_id,
                total_questions, correct_answers, wrong_answers, skipped_questions,
                score, percentage, time_taken,
                answers, question_times, detailed_results, completed_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                attempt_id, test_id, user_id,
                total_questions, correct_answers, wrong_answers, skipped_questions,
                score, percentage, time_taken,
                answers, question_times, detailed_results, completed_at
            "#,
        )
        .bind(&attempt_id)
        .bind(&payload.test_id)
        .bind(&payload.user_id)
        .bind(payload.total_questions)
        .bind(payload.correct_answers)
        .bind(payload.wrong_answers)
        .bind(payload.skipped_questions)
        .bind(payload.score)
        .bind(payload.percentage)
        .bind(&payload.time_taken)
        .bind(Json(&payload.answers))
        .bind(Json(&payload.question_times))
        .bind(Json(&payload.detailed_results))
        .bind(completed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::Conflict(format!("Attempt id '{}' already exists", attempt_id))
            }
            other => other.into(),
        })?;

        Ok(result)
    }

    pub async fn list_results_for_test(&self, test_id: &str) -> Result<ResultsForTest> {
        let results = sqlx::query_as::<_, TestResult>(
            r#"
            SELECT
                attempt_id, test_id, user_id,
                total_questions, correct_answers, wrong_answers, skipped_questions,
                score, percentage, time_taken,
                answers, question_times, detailed_results, completed_at
            FROM results
            WHERE test_id = ?
            ORDER BY completed_at DESC
            "#,
        )
        .bind(test_id)
        .fetch_all(&self.pool)
        .await?;

        let stats = compute_stats(&results);
        Ok(ResultsForTest { results, stats })
    }

    pub async fn get_result_by_attempt_id(&self, attempt_id: &str) -> Result<TestResult> {
        let result = sqlx::query_as::<_, TestResult>(
            r#"
            SELECT
                attempt_id, test_id, user_id,
                total_questions, correct_answers, wrong_answers, skipped_questions,
                score, percentage, time_taken,
                answers, question_times, detailed_results, completed_at
            FROM results
            WHERE attempt_id = ?
            "#,
        )
        .bind(attempt_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Result not found".to_string()))?;

        Ok(result)
    }

    /// Folds every stored result, most recent first, into a per-test
    /// summary. Tests with no results never appear in the map.
    pub async fn history(&self) -> Result<BTreeMap<String, HistoryEntry>> {
        let results = sqlx::query_as::<_, TestResult>(
            r#"
            SELECT
                attempt_id, test_id, user_id,
                total_questions, correct_answers, wrong_answers, skipped_questions,
                score, percentage, time_taken,
                answers, question_times, detailed_results, completed_at
            FROM results
            ORDER BY completed_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut history: BTreeMap<String, HistoryEntry> = BTreeMap::new();
        for r in results {
            match history.get_mut(&r.test_id) {
                Some(entry) => {
                    entry.attempts += 1;
                    if r.percentage > entry.best {
                        entry.best = r.percentage;
                    }
                }
                None => {
                    // First row seen for this test is its most recent
                    // attempt thanks to the descending order.
                    history.insert(
                        r.test_id.clone(),
                        HistoryEntry {
                            attempts: 1,
                            best: r.percentage,
                            last: r.percentage,
                            last_attempt_id: r.attempt_id.clone(),
                        },
                    );
                }
            }
        }

        Ok(history)
    }
}

fn compute_stats(results: &[TestResult]) -> ResultStats {
    if results.is_empty() {
        return ResultStats::empty();
    }

    let attempts = results.len() as i64;
    let best = results
        .iter()
        .map(|r| r.percentage)
        .fold(0.0_f64, f64::max);
    let last = results[0].percentage;
    let sum: f64 = results.iter().map(|r| r.percentage).sum();
    let average = ((sum / attempts as f64) * 100.0).round() / 100.0;

    ResultStats {
        attempts,
        best,
        last,
        average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    fn sample_result(test_id: &str, percentage: f64) -> CreateResultPayload {
        CreateResultPayload {
            test_id: test_id.to_string(),
            user_id: Some("user-1".to_string()),
            total_questions: 10,
            correct_answers: (percentage / 10.0) as i64,
            wrong_answers: 10 - (percentage / 10.0) as i64,
            skipped_questions: 0,
            score: percentage / 10.0,
            percentage,
            time_taken: "12:34".to_string(),
            answers: BTreeMap::from([("1".to_string(), 2), ("2".to_string(), 0)]),
            question_times: BTreeMap::from([("1".to_string(), 34.5)]),
            detailed_results: vec![],
            completed_at: None,
        }
    }

    #[tokio::test]
    async fn submit_generates_attempt_id_and_round_trips() {
        let pool = setup_test_db().await;
        let service = ResultService::new(pool);

        let stored = service.submit_result(sample_result("t1", 70.0)).await.unwrap();
        assert!(stored.attempt_id.starts_with("attempt-"));
        assert_eq!(stored.test_id, "t1");
        assert_eq!(stored.answers.0.get("1"), Some(&2));

        let fetched = service
            .get_result_by_attempt_id(&stored.attempt_id)
            .await
            .unwrap();
        assert_eq!(fetched.percentage, 70.0);
        assert_eq!(fetched.time_taken, "12:34");

        let other = service.submit_result(sample_result("t1", 80.0)).await.unwrap();
        assert_ne!(other.attempt_id, stored.attempt_id);
    }

    #[tokio::test]
    async fn get_unknown_attempt_is_not_found() {
        let pool = setup_test_db().await;
        let service = ResultService::new(pool);

        let err = service
            .get_result_by_attempt_id("attempt-0-zzzzzzzzz")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn stats_cover_best_last_and_rounded_average() {
        let pool = setup_test_db().await;
        let service = ResultService::new(pool);

        let base = Utc::now();
        let mut first = sample_result("t1", 70.0);
        first.completed_at = Some(base - Duration::minutes(30));
        let mut second = sample_result("t1", 90.0);
        second.completed_at = Some(base - Duration::minutes(20));
        let mut third = sample_result("t1", 85.0);
        third.completed_at = Some(base - Duration::minutes(10));

        service.submit_result(first).await.unwrap();
        service.submit_result(second).await.unwrap();
        service.submit_result(third).await.unwrap();
        // A result for another test must not leak into t1's stats.
        service.submit_result(sample_result("t2", 10.0)).await.unwrap();

        let listed = service.list_results_for_test("t1").await.unwrap();
        assert_eq!(listed.results.len(), 3);
        assert_eq!(listed.results[0].percentage, 85.0);
        assert_eq!(listed.stats.attempts, 3);
        assert_eq!(listed.stats.best, 90.0);
        assert_eq!(listed.stats.last, 85.0);
        // (70 + 90 + 85) / 3 = 81.666... -> 81.67
        assert_eq!(listed.stats.average, 81.67);
    }

    #[tokio::test]
    async fn stats_for_empty_result_set_are_zero() {
        let pool = setup_test_db().await;
        let service = ResultService::new(pool);

        let listed = service.list_results_for_test("never-taken").await.unwrap();
        assert!(listed.results.is_empty());
        assert_eq!(listed.stats.attempts, 0);
        assert_eq!(listed.stats.best, 0.0);
        assert_eq!(listed.stats.last, 0.0);
        assert_eq!(listed.stats.average, 0.0);
    }

    #[tokio::test]
    async fn history_groups_by_test_and_skips_untaken_tests() {
        let pool = setup_test_db().await;
        let service = ResultService::new(pool);

        let base = Utc::now();
        let mut a1 = sample_result("math", 60.0);
        a1.completed_at = Some(base - Duration::hours(3));
        let mut a2 = sample_result("math", 95.0);
        a2.completed_at = Some(base - Duration::hours(2));
        let mut a3 = sample_result("math", 75.0);
        a3.completed_at = Some(base - Duration::hours(1));
        let mut b1 = sample_result("physics", 40.0);
        b1.completed_at = Some(base - Duration::hours(4));

        service.submit_result(a1).await.unwrap();
        service.submit_result(a2).await.unwrap();
        let latest_math = service.submit_result(a3).await.unwrap();
        service.submit_result(b1).await.unwrap();

        let history = service.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(!history.contains_key("chemistry"));

        let math = &history["math"];
        assert_eq!(math.attempts, 3);
        assert_eq!(math.best, 95.0);
        assert_eq!(math.last, 75.0);
        assert_eq!(math.last_attempt_id, latest_math.attempt_id);

        let physics = &history["physics"];
        assert_eq!(physics.attempts, 1);
        assert_eq!(physics.best, 40.0);
        assert_eq!(physics.last, 40.0);
    }
}
