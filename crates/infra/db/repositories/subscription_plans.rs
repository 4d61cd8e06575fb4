use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{accounts, subscription_plans},
    },
};
use domain::{
    entities::subscription_plans::{
        InsertSubscriptionPlanEntity, SubscriptionPlanEntity, SubscriptionPlanRow,
        SubscriptionPlanWithCreator, UpdateSubscriptionPlanEntity,
    },
    repositories::subscription_plans::SubscriptionPlanRepository,
};

pub struct SubscriptionPlanPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriptionPlanPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionPlanRepository for SubscriptionPlanPostgres {
    async fn insert(
        &self,
        insert_subscription_plan_entity: InsertSubscriptionPlanEntity,
    ) -> Result<SubscriptionPlanEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = insert_into(subscription_plans::table)
            .values(&insert_subscription_plan_entity)
            .returning(SubscriptionPlanRow::as_returning())
            .get_result::<SubscriptionPlanRow>(&mut conn)?;

        Ok(row.into())
    }

    async fn find_by_id(
        &self,
        subscription_plan_id: Uuid,
    ) -> Result<Option<SubscriptionPlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = subscription_plans::table
            .filter(subscription_plans::id.eq(subscription_plan_id))
            .select(SubscriptionPlanRow::as_select())
            .first::<SubscriptionPlanRow>(&mut conn)
            .optional()?;

        Ok(row.map(SubscriptionPlanEntity::from))
    }

    async fn find_by_ids(
        &self,
        subscription_plan_ids: Vec<Uuid>,
    ) -> Result<Vec<SubscriptionPlanEntity>> {
        if subscription_plan_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = subscription_plans::table
            .filter(subscription_plans::id.eq_any(subscription_plan_ids))
            .select(SubscriptionPlanRow::as_select())
            .load::<SubscriptionPlanRow>(&mut conn)?;

        Ok(rows.into_iter().map(SubscriptionPlanEntity::from).collect())
    }

    async fn list_all_with_creator(&self) -> Result<Vec<SubscriptionPlanWithCreator>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = subscription_plans::table
            .left_join(accounts::table)
            .order(subscription_plans::created_at.desc())
            .select((SubscriptionPlanRow::as_select(), accounts::name.nullable()))
            .load::<(SubscriptionPlanRow, Option<String>)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(row, creator_name)| SubscriptionPlanWithCreator {
                plan: row.into(),
                creator_name,
            })
            .collect())
    }

    async fn list_active(&self) -> Result<Vec<SubscriptionPlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = subscription_plans::table
            .filter(subscription_plans::is_active.eq(true))
            .order(subscription_plans::price.asc())
            .select(SubscriptionPlanRow::as_select())
            .load::<SubscriptionPlanRow>(&mut conn)?;

        Ok(rows.into_iter().map(SubscriptionPlanEntity::from).collect())
    }

    async fn update(
        &self,
        subscription_plan_id: Uuid,
        update_subscription_plan_entity: UpdateSubscriptionPlanEntity,
    ) -> Result<Option<SubscriptionPlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = update(subscription_plans::table)
            .filter(subscription_plans::id.eq(subscription_plan_id))
            .set(&update_subscription_plan_entity)
            .returning(SubscriptionPlanRow::as_returning())
            .get_result::<SubscriptionPlanRow>(&mut conn)
            .optional()?;

        Ok(row.map(SubscriptionPlanEntity::from))
    }

    async fn delete(&self, subscription_plan_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(subscription_plans::table)
            .filter(subscription_plans::id.eq(subscription_plan_id))
            .execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
