use super::IAttemptRepo;
use exam_notifier_domain::Attempt;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresAttemptRepo {
    pool: PgPool,
}

impl PostgresAttemptRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AttemptRaw {
    attempt_uid: Uuid,
    test_ref: String,
    student_uid: Option<Uuid>,
    user_uid: Option<Uuid>,
    attempted_at: i64,
}

impl From<AttemptRaw> for Attempt {
    fn from(e: AttemptRaw) -> Self {
        Self {
            id: e.attempt_uid.into(),
            test_ref: e.test_ref,
            student_id: e.student_uid.map(|id| id.into()),
            user_id: e.user_uid.map(|id| id.into()),
            attempted_at: e.attempted_at,
        }
    }
}

#[async_trait::async_trait]
impl IAttemptRepo for PostgresAttemptRepo {
    async fn insert(&self, attempt: &Attempt) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO attempts(attempt_uid, test_ref, student_uid, user_uid, attempted_at)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(attempt.id.inner_ref())
        .bind(&attempt.test_ref)
        .bind(attempt.student_id.as_ref().map(|id| *id.inner_ref()))
        .bind(attempt.user_id.as_ref().map(|id| *id.inner_ref()))
        .bind(attempt.attempted_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert attempt: {:?}. DB returned error: {:?}",
                attempt, e
            );
            e
        })?;
        Ok(())
    }

    async fn find_for_tests(&self, test_refs: &[String]) -> anyhow::Result<Vec<Attempt>> {
        let attempts: Vec<AttemptRaw> = sqlx::query_as(
            r#"
            SELECT * FROM attempts
            WHERE test_ref = ANY($1)
            "#,
        )
        .bind(test_refs.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find attempts for tests: {:?} failed. DB returned error: {:?}",
                test_refs, e
            );
            e
        })?;
        Ok(attempts.into_iter().map(|a| a.into()).collect())
    }
}
