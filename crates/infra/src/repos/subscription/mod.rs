mod inmemory;
mod postgres;

pub use inmemory::InMemorySubscriptionRepo;
pub use postgres::PostgresSubscriptionRepo;

use exam_notifier_domain::{Subscription, ID};

#[async_trait::async_trait]
pub trait ISubscriptionRepo: Send + Sync {
    async fn insert(&self, subscription: &Subscription) -> anyhow::Result<()>;
    async fn find_active_for_users(&self, user_ids: &[ID]) -> anyhow::Result<Vec<Subscription>>;
}

#[cfg(test)]
mod tests {
    use crate::NotifierContext;
    use exam_notifier_domain::{PushProvider, Subscription, ID};

    #[tokio::test]
    async fn it_only_finds_active_subscriptions() {
        let ctx = NotifierContext::create_inmemory();
        let user_id = ID::new();
        let active = Subscription::new(user_id.clone(), PushProvider::OneSignal, "p1");
        let mut inactive = Subscription::new(user_id.clone(), PushProvider::WebPush, "w1");
        inactive.active = false;
        let other_user = Subscription::new(ID::new(), PushProvider::OneSignal, "p2");
        for subscription in &[&active, &inactive, &other_user] {
            ctx.repos.subscriptions.insert(subscription).await.unwrap();
        }

        let res = ctx
            .repos
            .subscriptions
            .find_active_for_users(&[user_id])
            .await
            .unwrap();
        assert_eq!(res, vec![active]);
    }
}
