mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;

use exam_notifier_domain::{User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    /// `User`s linking back to any of `student_ids`
    async fn find_by_student_ids(&self, student_ids: &[ID]) -> anyhow::Result<Vec<User>>;
}
