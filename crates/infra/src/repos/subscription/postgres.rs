use super::ISubscriptionRepo;
use exam_notifier_domain::{Subscription, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::{error, warn};

pub struct PostgresSubscriptionRepo {
    pool: PgPool,
}

impl PostgresSubscriptionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SubscriptionRaw {
    subscription_uid: Uuid,
    user_uid: Uuid,
    provider: String,
    token: String,
    active: bool,
}

impl SubscriptionRaw {
    fn into_domain(self) -> Option<Subscription> {
        let provider = match self.provider.parse() {
            Ok(provider) => provider,
            Err(e) => {
                warn!(
                    "Skipping push subscription: {} with unknown provider. Error: {:?}",
                    self.subscription_uid, e
                );
                return None;
            }
        };
        Some(Subscription {
            id: self.subscription_uid.into(),
            user_id: self.user_uid.into(),
            provider,
            token: self.token,
            active: self.active,
        })
    }
}

#[async_trait::async_trait]
impl ISubscriptionRepo for PostgresSubscriptionRepo {
    async fn insert(&self, subscription: &Subscription) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO push_subscriptions(subscription_uid, user_uid, provider, token, active)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(subscription.id.inner_ref())
        .bind(subscription.user_id.inner_ref())
        .bind(subscription.provider.as_str())
        .bind(&subscription.token)
        .bind(subscription.active)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert push subscription: {:?}. DB returned error: {:?}",
                subscription, e
            );
            e
        })?;
        Ok(())
    }

    async fn find_active_for_users(&self, user_ids: &[ID]) -> anyhow::Result<Vec<Subscription>> {
        let ids = user_ids.iter().map(|id| *id.inner_ref()).collect::<Vec<_>>();
        let subscriptions: Vec<SubscriptionRaw> = sqlx::query_as(
            r#"
            SELECT * FROM push_subscriptions
            WHERE user_uid = ANY($1) AND active
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find push subscriptions for users: {:?} failed. DB returned error: {:?}",
                user_ids, e
            );
            e
        })?;
        Ok(subscriptions
            .into_iter()
            .filter_map(|s| s.into_domain())
            .collect())
    }
}
