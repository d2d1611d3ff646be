mod attempt;
mod notification_log;
mod settings;
mod shared;
mod student;
mod subscription;
mod test;
mod user;

pub use attempt::IAttemptRepo;
use attempt::{InMemoryAttemptRepo, PostgresAttemptRepo};
pub use notification_log::INotificationLogRepo;
use notification_log::{InMemoryNotificationLogRepo, PostgresNotificationLogRepo};
pub use settings::ISettingsRepo;
use settings::{InMemorySettingsRepo, PostgresSettingsRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use student::IStudentRepo;
use student::{InMemoryStudentRepo, PostgresStudentRepo};
pub use subscription::ISubscriptionRepo;
use subscription::{InMemorySubscriptionRepo, PostgresSubscriptionRepo};
pub use test::ITestRepo;
use test::{InMemoryTestRepo, PostgresTestRepo};
use tracing::info;
pub use user::IUserRepo;
use user::{InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub tests: Arc<dyn ITestRepo>,
    pub students: Arc<dyn IStudentRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub attempts: Arc<dyn IAttemptRepo>,
    pub subscriptions: Arc<dyn ISubscriptionRepo>,
    pub settings: Arc<dyn ISettingsRepo>,
    pub notification_logs: Arc<dyn INotificationLogRepo>,
}

impl Repos {
    pub async fn create_postgres(
        connection_string: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            tests: Arc::new(PostgresTestRepo::new(pool.clone())),
            students: Arc::new(PostgresStudentRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            attempts: Arc::new(PostgresAttemptRepo::new(pool.clone())),
            subscriptions: Arc::new(PostgresSubscriptionRepo::new(pool.clone())),
            settings: Arc::new(PostgresSettingsRepo::new(pool.clone())),
            notification_logs: Arc::new(PostgresNotificationLogRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            tests: Arc::new(InMemoryTestRepo::new()),
            students: Arc::new(InMemoryStudentRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            attempts: Arc::new(InMemoryAttemptRepo::new()),
            subscriptions: Arc::new(InMemorySubscriptionRepo::new()),
            settings: Arc::new(InMemorySettingsRepo::new()),
            notification_logs: Arc::new(InMemoryNotificationLogRepo::new()),
        }
    }
}
