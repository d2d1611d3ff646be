mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationLogRepo;
pub use postgres::PostgresNotificationLogRepo;

use exam_notifier_domain::{NotificationLog, ID};

#[async_trait::async_trait]
pub trait INotificationLogRepo: Send + Sync {
    async fn insert(&self, log: &NotificationLog) -> anyhow::Result<()>;
    async fn find_by_student(&self, student_id: &ID) -> anyhow::Result<Vec<NotificationLog>>;
}

#[cfg(test)]
mod tests {
    use crate::NotifierContext;
    use exam_notifier_domain::{Channel, NotificationKind, NotificationLog, ID};

    fn log(student_id: &ID, channel: Channel, success: bool) -> NotificationLog {
        NotificationLog {
            id: ID::default(),
            student_id: student_id.clone(),
            test_id: ID::default(),
            channel,
            kind: NotificationKind::Reminder,
            success,
            error: if success {
                None
            } else {
                Some("Provider unavailable".into())
            },
            created: 10,
        }
    }

    #[tokio::test]
    async fn it_finds_logs_of_a_student() {
        let ctx = NotifierContext::create_inmemory();
        let student_id = ID::default();
        let sent = log(&student_id, Channel::Email, true);
        let failed = log(&student_id, Channel::Sms, false);
        let other = log(&ID::default(), Channel::Push, true);
        for l in &[&sent, &failed, &other] {
            ctx.repos.notification_logs.insert(l).await.unwrap();
        }

        let res = ctx
            .repos
            .notification_logs
            .find_by_student(&student_id)
            .await
            .unwrap();
        assert_eq!(res, vec![sent, failed]);
    }
}
