use super::ITestRepo;
use crate::repos::shared::inmemory_repo::*;
use exam_notifier_domain::{Test, ID};

pub struct InMemoryTestRepo {
    tests: std::sync::Mutex<Vec<Test>>,
}

impl InMemoryTestRepo {
    pub fn new() -> Self {
        Self {
            tests: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ITestRepo for InMemoryTestRepo {
    async fn insert(&self, test: &Test) -> anyhow::Result<()> {
        insert(test, &self.tests);
        Ok(())
    }

    async fn find(&self, test_id: &ID) -> anyhow::Result<Option<Test>> {
        Ok(find(test_id, &self.tests))
    }

    async fn find_active(&self, now: i64) -> anyhow::Result<Vec<Test>> {
        Ok(find_by(&self.tests, |t| t.is_active(now)))
    }
}
