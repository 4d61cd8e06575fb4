use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::diet_plans::{
    DietPlanEntity, InsertDietPlanEntity, UpdateDietPlanEntity,
};

#[async_trait]
#[automock]
pub trait DietPlanRepository {
    async fn insert(&self, insert_diet_plan_entity: InsertDietPlanEntity)
    -> Result<DietPlanEntity>;

    async fn find_by_id(&self, diet_plan_id: Uuid) -> Result<Option<DietPlanEntity>>;

    async fn find_by_ids(&self, diet_plan_ids: Vec<Uuid>) -> Result<Vec<DietPlanEntity>>;

    async fn list_by_trainer(&self, trainer_id: Uuid) -> Result<Vec<DietPlanEntity>>;

    async fn list_active_by_trainer(&self, trainer_id: Uuid) -> Result<Vec<DietPlanEntity>>;

    async fn list_active_by_trainers(&self, trainer_ids: Vec<Uuid>)
    -> Result<Vec<DietPlanEntity>>;

    /// Updates only when the plan belongs to `trainer_id`.
    async fn update_owned(
        &self,
        diet_plan_id: Uuid,
        trainer_id: Uuid,
        update_diet_plan_entity: UpdateDietPlanEntity,
    ) -> Result<Option<DietPlanEntity>>;

    async fn delete_owned(&self, diet_plan_id: Uuid, trainer_id: Uuid) -> Result<bool>;
}
