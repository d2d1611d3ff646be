use super::ITestRepo;
use exam_notifier_domain::{Test, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresTestRepo {
    pool: PgPool,
}

impl PostgresTestRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TestRaw {
    test_uid: Uuid,
    test_id: String,
    display_id: Option<String>,
    name: String,
    module: String,
    start_ts: Option<i64>,
    end_ts: Option<i64>,
    active: Option<bool>,
    student_uids: Vec<Uuid>,
    batch_ids: Vec<String>,
    course_ids: Vec<String>,
}

impl From<TestRaw> for Test {
    fn from(e: TestRaw) -> Self {
        Self {
            id: e.test_uid.into(),
            test_id: e.test_id,
            display_id: e.display_id,
            name: e.name,
            module: e.module,
            start_ts: e.start_ts,
            end_ts: e.end_ts,
            active: e.active,
            student_ids: e.student_uids.into_iter().map(|id| id.into()).collect(),
            batch_ids: e.batch_ids,
            course_ids: e.course_ids,
        }
    }
}

#[async_trait::async_trait]
impl ITestRepo for PostgresTestRepo {
    async fn insert(&self, test: &Test) -> anyhow::Result<()> {
        let student_uids = test
            .student_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();
        sqlx::query(
            r#"
            INSERT INTO tests
            (test_uid, test_id, display_id, name, module, start_ts, end_ts, active, student_uids, batch_ids, course_ids)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(test.id.inner_ref())
        .bind(&test.test_id)
        .bind(&test.display_id)
        .bind(&test.name)
        .bind(&test.module)
        .bind(test.start_ts)
        .bind(test.end_ts)
        .bind(test.active)
        .bind(student_uids)
        .bind(test.batch_ids.clone())
        .bind(test.course_ids.clone())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert test: {:?}. DB returned error: {:?}",
                test, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, test_id: &ID) -> anyhow::Result<Option<Test>> {
        let res: Option<TestRaw> = sqlx::query_as(
            r#"
            SELECT * FROM tests
            WHERE test_uid = $1
            "#,
        )
        .bind(test_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find test with id: {:?} failed. DB returned error: {:?}",
                test_id, e
            );
            e
        })?;
        Ok(res.map(|test| test.into()))
    }

    async fn find_active(&self, now: i64) -> anyhow::Result<Vec<Test>> {
        let tests: Vec<TestRaw> = sqlx::query_as(
            r#"
            SELECT * FROM tests
            WHERE (end_ts IS NULL OR end_ts > $1)
            AND (active IS NULL OR active)
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find active tests at: {} failed. DB returned error: {:?}",
                now, e
            );
            e
        })?;
        Ok(tests.into_iter().map(|t| t.into()).collect())
    }
}
