use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{
    RunQueryDsl,
    dsl::{count_star, sum},
    insert_into,
    prelude::*,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain;
use crate::infra::db::postgres::{postgres_connection::PgPoolSquad, schema::user_subscriptions};
use domain::{
    entities::user_subscriptions::{InsertUserSubscriptionEntity, UserSubscriptionEntity},
    repositories::user_subscriptions::UserSubscriptionRepository,
    value_objects::{
        enums::{payment_statuses::PaymentStatus, subscription_statuses::SubscriptionStatus},
        user_subscriptions::SubscriberStatistics,
    },
};

pub struct UserSubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UserSubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserSubscriptionRepository for UserSubscriptionPostgres {
    async fn insert(
        &self,
        insert_user_subscription_entity: InsertUserSubscriptionEntity,
    ) -> Result<UserSubscriptionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(user_subscriptions::table)
            .values(&insert_user_subscription_entity)
            .returning(UserSubscriptionEntity::as_returning())
            .get_result::<UserSubscriptionEntity>(&mut conn)?;

        Ok(result)
    }

    async fn list_by_member(&self, member_id: Uuid) -> Result<Vec<UserSubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = user_subscriptions::table
            .filter(user_subscriptions::member_id.eq(member_id))
            .order((
                user_subscriptions::created_at.desc(),
                user_subscriptions::id.desc(),
            ))
            .select(UserSubscriptionEntity::as_select())
            .load::<UserSubscriptionEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_completed_by_trainer(
        &self,
        trainer_id: Uuid,
    ) -> Result<Vec<UserSubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = user_subscriptions::table
            .filter(user_subscriptions::trainer_id.eq(trainer_id))
            .filter(user_subscriptions::payment_status.eq(PaymentStatus::Completed.as_str()))
            .order(user_subscriptions::created_at.desc())
            .select(UserSubscriptionEntity::as_select())
            .load::<UserSubscriptionEntity>(&mut conn)?;

        Ok(results)
    }

    async fn subscriber_statistics(
        &self,
        trainer_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<SubscriberStatistics> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let completed = user_subscriptions::table
            .filter(user_subscriptions::trainer_id.eq(trainer_id))
            .filter(user_subscriptions::payment_status.eq(PaymentStatus::Completed.as_str()));

        let (total_subscribers, total_revenue) = completed
            .clone()
            .select((count_star(), sum(user_subscriptions::amount)))
            .get_result::<(i64, Option<i64>)>(&mut conn)?;

        let active_subscribers = completed
            .filter(user_subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
            .filter(user_subscriptions::end_date.ge(now))
            .select(count_star())
            .get_result::<i64>(&mut conn)?;

        Ok(SubscriberStatistics {
            total_subscribers,
            total_revenue: total_revenue.unwrap_or(0),
            active_subscribers,
        })
    }

    async fn count_completed_by_trainers(
        &self,
        trainer_ids: Vec<Uuid>,
    ) -> Result<Vec<(Uuid, i64)>> {
        if trainer_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = user_subscriptions::table
            .filter(user_subscriptions::trainer_id.eq_any(trainer_ids))
            .filter(user_subscriptions::payment_status.eq(PaymentStatus::Completed.as_str()))
            .group_by(user_subscriptions::trainer_id)
            .select((user_subscriptions::trainer_id, count_star()))
            .load::<(Uuid, i64)>(&mut conn)?;

        Ok(results)
    }

    async fn count_by_subscription_plan(&self, subscription_plan_id: Uuid) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = user_subscriptions::table
            .filter(user_subscriptions::subscription_plan_id.eq(subscription_plan_id))
            .select(count_star())
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }
}
