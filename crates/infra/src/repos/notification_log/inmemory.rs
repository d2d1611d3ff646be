use super::INotificationLogRepo;
use crate::repos::shared::inmemory_repo::*;
use exam_notifier_domain::{NotificationLog, ID};

pub struct InMemoryNotificationLogRepo {
    logs: std::sync::Mutex<Vec<NotificationLog>>,
}

impl InMemoryNotificationLogRepo {
    pub fn new() -> Self {
        Self {
            logs: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationLogRepo for InMemoryNotificationLogRepo {
    async fn insert(&self, log: &NotificationLog) -> anyhow::Result<()> {
        insert(log, &self.logs);
        Ok(())
    }

    async fn find_by_student(&self, student_id: &ID) -> anyhow::Result<Vec<NotificationLog>> {
        Ok(find_by(&self.logs, |l| &l.student_id == student_id))
    }
}
