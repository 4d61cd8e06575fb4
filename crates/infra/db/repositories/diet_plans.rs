use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain;
use crate::infra::db::postgres::{postgres_connection::PgPoolSquad, schema::diet_plans};
use domain::{
    entities::diet_plans::{DietPlanEntity, DietPlanRow, InsertDietPlanEntity, UpdateDietPlanEntity},
    repositories::diet_plans::DietPlanRepository,
};

pub struct DietPlanPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl DietPlanPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl DietPlanRepository for DietPlanPostgres {
    async fn insert(
        &self,
        insert_diet_plan_entity: InsertDietPlanEntity,
    ) -> Result<DietPlanEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = insert_into(diet_plans::table)
            .values(&insert_diet_plan_entity)
            .returning(DietPlanRow::as_returning())
            .get_result::<DietPlanRow>(&mut conn)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, diet_plan_id: Uuid) -> Result<Option<DietPlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = diet_plans::table
            .filter(diet_plans::id.eq(diet_plan_id))
            .select(DietPlanRow::as_select())
            .first::<DietPlanRow>(&mut conn)
            .optional()?;

        Ok(row.map(DietPlanEntity::from))
    }

    async fn find_by_ids(&self, diet_plan_ids: Vec<Uuid>) -> Result<Vec<DietPlanEntity>> {
        if diet_plan_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = diet_plans::table
            .filter(diet_plans::id.eq_any(diet_plan_ids))
            .select(DietPlanRow::as_select())
            .load::<DietPlanRow>(&mut conn)?;

        Ok(rows.into_iter().map(DietPlanEntity::from).collect())
    }

    async fn list_by_trainer(&self, trainer_id: Uuid) -> Result<Vec<DietPlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = diet_plans::table
            .filter(diet_plans::trainer_id.eq(trainer_id))
            .order(diet_plans::created_at.desc())
            .select(DietPlanRow::as_select())
            .load::<DietPlanRow>(&mut conn)?;

        Ok(rows.into_iter().map(DietPlanEntity::from).collect())
    }

    async fn list_active_by_trainer(&self, trainer_id: Uuid) -> Result<Vec<DietPlanEntity>> {
        self.list_active_by_trainers(vec![trainer_id]).await
    }

    async fn list_active_by_trainers(
        &self,
        trainer_ids: Vec<Uuid>,
    ) -> Result<Vec<DietPlanEntity>> {
        if trainer_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = diet_plans::table
            .filter(diet_plans::trainer_id.eq_any(trainer_ids))
            .filter(diet_plans::is_active.eq(true))
            .order(diet_plans::created_at.desc())
            .select(DietPlanRow::as_select())
            .load::<DietPlanRow>(&mut conn)?;

        Ok(rows.into_iter().map(DietPlanEntity::from).collect())
    }

    async fn update_owned(
        &self,
        diet_plan_id: Uuid,
        trainer_id: Uuid,
        update_diet_plan_entity: UpdateDietPlanEntity,
    ) -> Result<Option<DietPlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = update(diet_plans::table)
            .filter(diet_plans::id.eq(diet_plan_id))
            .filter(diet_plans::trainer_id.eq(trainer_id))
            .set(&update_diet_plan_entity)
            .returning(DietPlanRow::as_returning())
            .get_result::<DietPlanRow>(&mut conn)
            .optional()?;

        Ok(row.map(DietPlanEntity::from))
    }

    async fn delete_owned(&self, diet_plan_id: Uuid, trainer_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(diet_plans::table)
            .filter(diet_plans::id.eq(diet_plan_id))
            .filter(diet_plans::trainer_id.eq(trainer_id))
            .execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
