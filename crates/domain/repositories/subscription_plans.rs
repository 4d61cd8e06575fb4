use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::subscription_plans::{
    InsertSubscriptionPlanEntity, SubscriptionPlanEntity, SubscriptionPlanWithCreator,
    UpdateSubscriptionPlanEntity,
};

#[async_trait]
#[automock]
pub trait SubscriptionPlanRepository {
    async fn insert(
        &self,
        insert_subscription_plan_entity: InsertSubscriptionPlanEntity,
    ) -> Result<SubscriptionPlanEntity>;

    async fn find_by_id(&self, subscription_plan_id: Uuid)
    -> Result<Option<SubscriptionPlanEntity>>;

    async fn find_by_ids(
        &self,
        subscription_plan_ids: Vec<Uuid>,
    ) -> Result<Vec<SubscriptionPlanEntity>>;

    /// Every tier, active or not, with its creator's name.
    async fn list_all_with_creator(&self) -> Result<Vec<SubscriptionPlanWithCreator>>;

    async fn list_active(&self) -> Result<Vec<SubscriptionPlanEntity>>;

    async fn update(
        &self,
        subscription_plan_id: Uuid,
        update_subscription_plan_entity: UpdateSubscriptionPlanEntity,
    ) -> Result<Option<SubscriptionPlanEntity>>;

    async fn delete(&self, subscription_plan_id: Uuid) -> Result<bool>;
}
