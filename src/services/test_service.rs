use crate::dto::test_dto::{CreateTestPayload, UpdateTestPayload};
use crate::error::{Error, Result};
use crate::models::test::Test;
use crate::utils::time;
use sqlx::types::Json;
use sqlx::SqlitePool;

/// Outcome of the one-shot seed. The seed only ever inserts into an
/// empty store; a populated store reports its current count instead.
#[derive(Debug, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded(usize),
    AlreadyPopulated(i64),
}

#[derive(Clone)]
pub struct TestService {
    pool: SqlitePool,
}

impl TestService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_tests(&self) -> Result<Vec<Test>> {
        let tests = sqlx::query_as::<_, Test>(
            r#"
            SELECT id, name, subject, duration, questions, created_at, updated_at
            FROM tests
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tests)
    }

    pub async fn get_test_by_id(&self, id: &str) -> Result<Test> {
        let test = sqlx::query_as::<_, Test>(
            r#"
            SELECT id, name, subject, duration, questions, created_at, updated_at
            FROM tests
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Test not found".to_string()))?;

        Ok(test)
    }

    pub async fn create_test(&self, payload: CreateTestPayload) -> Result<Test> {
        let now = time::now();
        let created_at = payload.created_at.unwrap_or(now);

        let test = sqlx::query_as::<_, Test>(
            r#"
            INSERT INTO tests (id, name, subject, duration, questions, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, name, subject, duration, questions, created_at, updated_at
            "#,
        )
        .bind(&payload.id)
        .bind(&payload.name)
        .bind(&payload.subject)
        .bind(payload.duration)
        .bind(Json(&payload.questions))
        .bind(created_at)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::Conflict(format!("Test with id '{}' already exists", payload.id))
            }
            other => other.into(),
        })?;

        Ok(test)
    }

    pub async fn update_test(&self, id: &str, payload: UpdateTestPayload) -> Result<Test> {
        let questions_json = payload.questions.map(Json);

        let test = sqlx::query_as::<_, Test>(
            r#"
            UPDATE tests
            SET name = COALESCE(?, name),
                subject = COALESCE(?, subject),
                duration = COALESCE(?, duration),
                questions = COALESCE(?, questions),
                updated_at = ?
            WHERE id = ?
            RETURNING id, name, subject, duration, questions, created_at, updated_at
            "#,
        )
        .bind(payload.name)
        .bind(payload.subject)
        .bind(payload.duration)
        .bind(questions_json)
        .bind(time::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Test not found".to_string()))?;

        Ok(test)
    }

    /// Deletes the test and, on success, every result recorded against
    /// it. The cascade is best-effort: the test deletion stands even if
    /// removing the results fails.
    pub async fn delete_test(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM tests WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Test not found".to_string()));
        }

        if let Err(e) = sqlx::query("DELETE FROM results WHERE test_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            tracing::warn!(test_id = %id, error = ?e, "Failed to delete results for deleted test");
        }

        Ok(())
    }

    pub async fn seed_tests(&self, tests: Vec<CreateTestPayload>) -> Result<SeedOutcome> {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tests")
            .fetch_one(&self.pool)
            .await?;

        if existing > 0 {
            return Ok(SeedOutcome::AlreadyPopulated(existing));
        }

        let now = time::now();
        let inserted = tests.len();

        let mut tx = self.pool.begin().await?;
        for t in tests {
            sqlx::query(
                r#"
                INSERT INTO tests (id, name, subject, duration, questions, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&t.id)
            .bind(&t.name)
            .bind(&t.subject)
            .bind(t.duration)
            .bind(Json(&t.questions))
            .bind(t.created_at.unwrap_or(now))
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(SeedOutcome::Seeded(inserted))
    }
}
