use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::user_subscriptions::{InsertUserSubscriptionEntity, UserSubscriptionEntity},
    value_objects::user_subscriptions::SubscriberStatistics,
};

#[async_trait]
#[automock]
pub trait UserSubscriptionRepository {
    async fn insert(
        &self,
        insert_user_subscription_entity: InsertUserSubscriptionEntity,
    ) -> Result<UserSubscriptionEntity>;

    /// Every entitlement the member holds, most recent first.
    async fn list_by_member(&self, member_id: Uuid) -> Result<Vec<UserSubscriptionEntity>>;

    /// Paid entitlements sold by the trainer, most recent first.
    async fn list_completed_by_trainer(&self, trainer_id: Uuid)
    -> Result<Vec<UserSubscriptionEntity>>;

    async fn subscriber_statistics(
        &self,
        trainer_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<SubscriberStatistics>;

    /// Paid entitlement count per trainer. Trainers with none are absent.
    async fn count_completed_by_trainers(&self, trainer_ids: Vec<Uuid>)
    -> Result<Vec<(Uuid, i64)>>;

    /// Entitlements of any status referencing the tier.
    async fn count_by_subscription_plan(&self, subscription_plan_id: Uuid) -> Result<i64>;
}
