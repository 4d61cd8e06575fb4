use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain;
use crate::infra::db::postgres::{postgres_connection::PgPoolSquad, schema::workout_plans};
use domain::{
    entities::workout_plans::{WorkoutPlanEntity, WorkoutPlanRow, InsertWorkoutPlanEntity, UpdateWorkoutPlanEntity},
    repositories::workout_plans::WorkoutPlanRepository,
};

pub struct WorkoutPlanPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl WorkoutPlanPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl WorkoutPlanRepository for WorkoutPlanPostgres {
    async fn insert(
        &self,
        insert_workout_plan_entity: InsertWorkoutPlanEntity,
    ) -> Result<WorkoutPlanEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = insert_into(workout_plans::table)
            .values(&insert_workout_plan_entity)
            .returning(WorkoutPlanRow::as_returning())
            .get_result::<WorkoutPlanRow>(&mut conn)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, workout_plan_id: Uuid) -> Result<Option<WorkoutPlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = workout_plans::table
            .filter(workout_plans::id.eq(workout_plan_id))
            .select(WorkoutPlanRow::as_select())
            .first::<WorkoutPlanRow>(&mut conn)
            .optional()?;

        Ok(row.map(WorkoutPlanEntity::from))
    }

    async fn find_by_ids(&self, workout_plan_ids: Vec<Uuid>) -> Result<Vec<WorkoutPlanEntity>> {
        if workout_plan_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = workout_plans::table
            .filter(workout_plans::id.eq_any(workout_plan_ids))
            .select(WorkoutPlanRow::as_select())
            .load::<WorkoutPlanRow>(&mut conn)?;

        Ok(rows.into_iter().map(WorkoutPlanEntity::from).collect())
    }

    async fn list_by_trainer(&self, trainer_id: Uuid) -> Result<Vec<WorkoutPlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = workout_plans::table
            .filter(workout_plans::trainer_id.eq(trainer_id))
            .order(workout_plans::created_at.desc())
            .select(WorkoutPlanRow::as_select())
            .load::<WorkoutPlanRow>(&mut conn)?;

        Ok(rows.into_iter().map(WorkoutPlanEntity::from).collect())
    }

    async fn list_active_by_trainer(&self, trainer_id: Uuid) -> Result<Vec<WorkoutPlanEntity>> {
        self.list_active_by_trainers(vec![trainer_id]).await
    }

    async fn list_active_by_trainers(
        &self,
        trainer_ids: Vec<Uuid>,
    ) -> Result<Vec<WorkoutPlanEntity>> {
        if trainer_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = workout_plans::table
            .filter(workout_plans::trainer_id.eq_any(trainer_ids))
            .filter(workout_plans::is_active.eq(true))
            .order(workout_plans::created_at.desc())
            .select(WorkoutPlanRow::as_select())
            .load::<WorkoutPlanRow>(&mut conn)?;

        Ok(rows.into_iter().map(WorkoutPlanEntity::from).collect())
    }

    async fn update_owned(
        &self,
        workout_plan_id: Uuid,
        trainer_id: Uuid,
        update_workout_plan_entity: UpdateWorkoutPlanEntity,
    ) -> Result<Option<WorkoutPlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = update(workout_plans::table)
            .filter(workout_plans::id.eq(workout_plan_id))
            .filter(workout_plans::trainer_id.eq(trainer_id))
            .set(&update_workout_plan_entity)
            .returning(WorkoutPlanRow::as_returning())
            .get_result::<WorkoutPlanRow>(&mut conn)
            .optional()?;

        Ok(row.map(WorkoutPlanEntity::from))
    }

    async fn delete_owned(&self, workout_plan_id: Uuid, trainer_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(workout_plans::table)
            .filter(workout_plans::id.eq(workout_plan_id))
            .filter(workout_plans::trainer_id.eq(trainer_id))
            .execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
