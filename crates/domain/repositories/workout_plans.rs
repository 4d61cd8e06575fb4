use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::workout_plans::{
    WorkoutPlanEntity, InsertWorkoutPlanEntity, UpdateWorkoutPlanEntity,
};

#[async_trait]
#[automock]
pub trait WorkoutPlanRepository {
    async fn insert(&self, insert_workout_plan_entity: InsertWorkoutPlanEntity)
    -> Result<WorkoutPlanEntity>;

    async fn find_by_id(&self, workout_plan_id: Uuid) -> Result<Option<WorkoutPlanEntity>>;

    async fn find_by_ids(&self, workout_plan_ids: Vec<Uuid>) -> Result<Vec<WorkoutPlanEntity>>;

    async fn list_by_trainer(&self, trainer_id: Uuid) -> Result<Vec<WorkoutPlanEntity>>;

    async fn list_active_by_trainer(&self, trainer_id: Uuid) -> Result<Vec<WorkoutPlanEntity>>;

    async fn list_active_by_trainers(&self, trainer_ids: Vec<Uuid>)
    -> Result<Vec<WorkoutPlanEntity>>;

    /// Updates only when the plan belongs to `trainer_id`.
    async fn update_owned(
        &self,
        workout_plan_id: Uuid,
        trainer_id: Uuid,
        update_workout_plan_entity: UpdateWorkoutPlanEntity,
    ) -> Result<Option<WorkoutPlanEntity>>;

    async fn delete_owned(&self, workout_plan_id: Uuid, trainer_id: Uuid) -> Result<bool>;
}
