mod inmemory;
mod postgres;

pub use inmemory::InMemoryTestRepo;
pub use postgres::PostgresTestRepo;

use exam_notifier_domain::{Test, ID};

#[async_trait::async_trait]
pub trait ITestRepo: Send + Sync {
    async fn insert(&self, test: &Test) -> anyhow::Result<()>;
    async fn find(&self, test_id: &ID) -> anyhow::Result<Option<Test>>;
    /// `Test`s that have not ended at `now` and are not deactivated
    async fn find_active(&self, now: i64) -> anyhow::Result<Vec<Test>>;
}

#[cfg(test)]
mod tests {
    use crate::NotifierContext;
    use exam_notifier_domain::Test;

    #[tokio::test]
    async fn it_finds_active_tests() {
        let ctx = NotifierContext::create_inmemory();
        let now = 1000;

        let open = Test::new("T1", "No deadline");
        let mut upcoming = Test::new("T2", "Upcoming");
        upcoming.end_ts = Some(now + 1);
        let mut ended = Test::new("T3", "Ended");
        ended.end_ts = Some(now);
        let mut deactivated = Test::new("T4", "Deactivated");
        deactivated.active = Some(false);

        for test in &[&open, &upcoming, &ended, &deactivated] {
            ctx.repos.tests.insert(test).await.unwrap();
        }

        let active = ctx.repos.tests.find_active(now).await.unwrap();
        assert_eq!(active, vec![open.clone(), upcoming]);

        assert_eq!(ctx.repos.tests.find(&open.id).await.unwrap(), Some(open));
        assert!(ctx.repos.tests.find(&Default::default()).await.unwrap().is_none());
    }
}
