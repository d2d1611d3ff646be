use super::INotificationLogRepo;
use exam_notifier_domain::{NotificationLog, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;
use tracing::error;

pub struct PostgresNotificationLogRepo {
    pool: PgPool,
}

impl PostgresNotificationLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationLogRaw {
    log_uid: Uuid,
    student_uid: Uuid,
    test_uid: Uuid,
    channel: String,
    kind: String,
    success: bool,
    error: Option<String>,
    created: i64,
}

impl TryFrom<NotificationLogRaw> for NotificationLog {
    type Error = anyhow::Error;

    fn try_from(e: NotificationLogRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: e.log_uid.into(),
            student_id: e.student_uid.into(),
            test_id: e.test_uid.into(),
            channel: e.channel.parse()?,
            kind: e.kind.parse()?,
            success: e.success,
            error: e.error,
            created: e.created,
        })
    }
}

#[async_trait::async_trait]
impl INotificationLogRepo for PostgresNotificationLogRepo {
    async fn insert(&self, log: &NotificationLog) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notification_logs(log_uid, student_uid, test_uid, channel, kind, success, error, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(log.id.inner_ref())
        .bind(log.student_id.inner_ref())
        .bind(log.test_id.inner_ref())
        .bind(log.channel.as_str())
        .bind(log.kind.as_str())
        .bind(log.success)
        .bind(&log.error)
        .bind(log.created)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert notification log: {:?}. DB returned error: {:?}",
                log, e
            );
            e
        })?;
        Ok(())
    }

    async fn find_by_student(&self, student_id: &ID) -> anyhow::Result<Vec<NotificationLog>> {
        let logs: Vec<NotificationLogRaw> = sqlx::query_as(
            r#"
            SELECT * FROM notification_logs
            WHERE student_uid = $1
            ORDER BY created
            "#,
        )
        .bind(student_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find notification logs for student: {:?} failed. DB returned error: {:?}",
                student_id, e
            );
            e
        })?;
        logs.into_iter().map(NotificationLog::try_from).collect()
    }
}
