mod config;
mod repos;
mod services;
mod system;

pub use config::{BrevoConfig, BulkSmsConfig, Config, OneSignalConfig};
pub use repos::{
    IAttemptRepo, INotificationLogRepo, ISettingsRepo, IStudentRepo, ISubscriptionRepo,
    ITestRepo, IUserRepo, Repos,
};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, RealSys, RunGuard, RunPermit};
use tracing::{info, warn};

#[derive(Clone)]
pub struct NotifierContext {
    pub repos: Repos,
    pub delivery: Delivery,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    /// Shared by every trigger of a reminder pass
    pub run_guard: RunGuard,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl NotifierContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        Self {
            repos,
            delivery: Delivery::from_config(&config),
            config,
            sys: Arc::new(RealSys {}),
            run_guard: RunGuard::new(),
        }
    }

    /// Context where both persistence and delivery live in memory
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            delivery: Delivery::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            run_guard: RunGuard::new(),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> NotifierContext {
    match get_psql_connection_string() {
        Some(connection_string) => {
            info!("DATABASE_URL was found. Using postgres.");
            NotifierContext::create(ContextParams {
                postgres_connection_string: connection_string,
            })
            .await
        }
        None => {
            warn!("DATABASE_URL was not found. Using inmemory infrastructure, nothing will be persisted.");
            let config = Config::new();
            NotifierContext {
                delivery: Delivery::from_config(&config),
                config,
                ..NotifierContext::create_inmemory()
            }
        }
    }
}

fn get_psql_connection_string() -> Option<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING).ok()
}

/// Runs the embedded migrations. Does nothing without a `DATABASE_URL`.
pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string = match get_psql_connection_string() {
        Some(connection_string) => connection_string,
        None => return Ok(()),
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await?;

    sqlx::migrate!().run(&pool).await
}
