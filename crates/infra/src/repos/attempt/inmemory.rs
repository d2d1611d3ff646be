use super::IAttemptRepo;
use crate::repos::shared::inmemory_repo::*;
use exam_notifier_domain::Attempt;

pub struct InMemoryAttemptRepo {
    attempts: std::sync::Mutex<Vec<Attempt>>,
}

impl InMemoryAttemptRepo {
    pub fn new() -> Self {
        Self {
            attempts: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAttemptRepo for InMemoryAttemptRepo {
    async fn insert(&self, attempt: &Attempt) -> anyhow::Result<()> {
        insert(attempt, &self.attempts);
        Ok(())
    }

    async fn find_for_tests(&self, test_refs: &[String]) -> anyhow::Result<Vec<Attempt>> {
        Ok(find_by(&self.attempts, |a| test_refs.contains(&a.test_ref)))
    }
}
