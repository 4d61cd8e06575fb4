use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::user_subscriptions;

/// A member's purchased, time-boxed entitlement to one trainer and one tier.
#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = user_subscriptions)]
pub struct UserSubscriptionEntity {
    pub id: Uuid,
    pub member_id: Uuid,
    pub trainer_id: Uuid,
    pub subscription_plan_id: Uuid,
    pub diet_plan_id: Option<Uuid>,
    pub workout_plan_id: Option<Uuid>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub amount: i32,
    pub payment_status: String,
    pub status: String,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = user_subscriptions)]
pub struct InsertUserSubscriptionEntity {
    pub member_id: Uuid,
    pub trainer_id: Uuid,
    pub subscription_plan_id: Uuid,
    pub diet_plan_id: Option<Uuid>,
    pub workout_plan_id: Option<Uuid>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub amount: i32,
    pub payment_status: String,
    pub status: String,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
