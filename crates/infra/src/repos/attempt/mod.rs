mod inmemory;
mod postgres;

pub use inmemory::InMemoryAttemptRepo;
pub use postgres::PostgresAttemptRepo;

use exam_notifier_domain::Attempt;

#[async_trait::async_trait]
pub trait IAttemptRepo: Send + Sync {
    async fn insert(&self, attempt: &Attempt) -> anyhow::Result<()>;
    /// `Attempt`s referencing any of `test_refs`. Callers pass every
    /// reference key of the `Test`s they are interested in.
    async fn find_for_tests(&self, test_refs: &[String]) -> anyhow::Result<Vec<Attempt>>;
}
