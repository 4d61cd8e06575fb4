use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    entities::{
        accounts::AccountEntity, diet_plans::DietPlanEntity,
        subscription_plans::SubscriptionPlanEntity,
        user_subscriptions::{InsertUserSubscriptionEntity, UserSubscriptionEntity},
        workout_plans::WorkoutPlanEntity,
    },
    value_objects::{
        accounts::{MemberContactDto, TrainerSummaryDto},
        catalog::PlanSummaryDto,
        enums::{payment_statuses::PaymentStatus, subscription_statuses::SubscriptionStatus},
        subscription_plans::TierSummaryDto,
    },
};

const TRANSACTION_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubscribeModel {
    pub trainer_id: Uuid,
    pub subscription_plan_id: Uuid,
    #[serde(default)]
    pub diet_plan_id: Option<Uuid>,
    #[serde(default)]
    pub workout_plan_id: Option<Uuid>,
}

/// End of an entitlement that starts at `start` and lasts `duration_days` whole days.
pub fn entitlement_end_date(start: DateTime<Utc>, duration_days: i32) -> Result<DateTime<Utc>> {
    start
        .checked_add_signed(Duration::days(duration_days.into()))
        .context("failed to compute subscription end date")
}

/// Opaque reference for a subscribe action: `TXN` + unix millis + 9 base36 characters.
/// Not a payment reference; no gateway is involved.
pub fn generate_transaction_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..TRANSACTION_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("TXN{}{}", now.timestamp_millis(), suffix)
}

impl InsertUserSubscriptionEntity {
    /// Entitlement for a subscribe action. The charged amount is the tier price;
    /// attached diet or workout plans never change it.
    pub fn completed_purchase(
        member_id: Uuid,
        tier: &SubscriptionPlanEntity,
        trainer_id: Uuid,
        diet_plan_id: Option<Uuid>,
        workout_plan_id: Option<Uuid>,
        start_date: DateTime<Utc>,
    ) -> Result<Self> {
        let end_date = entitlement_end_date(start_date, tier.duration)?;
        Ok(Self {
            member_id,
            trainer_id,
            subscription_plan_id: tier.id,
            diet_plan_id,
            workout_plan_id,
            start_date,
            end_date,
            amount: tier.price,
            payment_status: PaymentStatus::Completed.to_string(),
            status: SubscriptionStatus::Active.to_string(),
            transaction_id: generate_transaction_id(start_date),
            created_at: start_date,
            updated_at: start_date,
        })
    }
}

impl UserSubscriptionEntity {
    pub fn status(&self) -> SubscriptionStatus {
        SubscriptionStatus::from_str(&self.status)
    }

    pub fn payment_status(&self) -> PaymentStatus {
        PaymentStatus::from_str(&self.payment_status)
    }

    /// `status` is never moved to expired by the system, so the end date decides.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.status() == SubscriptionStatus::Active && self.end_date > now
    }
}

/// Fields shared by every entitlement view.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSubscriptionDto {
    pub id: Uuid,
    pub member_id: Uuid,
    pub trainer_id: Uuid,
    pub subscription_plan_id: Uuid,
    pub diet_plan_id: Option<Uuid>,
    pub workout_plan_id: Option<Uuid>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub amount: i32,
    pub payment_status: PaymentStatus,
    pub status: SubscriptionStatus,
    pub is_current: bool,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

impl UserSubscriptionDto {
    pub fn from_entity(value: &UserSubscriptionEntity, now: DateTime<Utc>) -> Self {
        Self {
            id: value.id,
            member_id: value.member_id,
            trainer_id: value.trainer_id,
            subscription_plan_id: value.subscription_plan_id,
            diet_plan_id: value.diet_plan_id,
            workout_plan_id: value.workout_plan_id,
            start_date: value.start_date,
            end_date: value.end_date,
            amount: value.amount,
            payment_status: value.payment_status(),
            status: value.status(),
            is_current: value.is_current(now),
            transaction_id: value.transaction_id.clone(),
            created_at: value.created_at,
        }
    }
}

/// Entitlement returned by the subscribe action, with its references expanded.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedEntitlementDto {
    #[serde(flatten)]
    pub subscription: UserSubscriptionDto,
    pub trainer: TrainerSummaryDto,
    pub subscription_plan: TierSummaryDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet_plan: Option<PlanSummaryDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_plan: Option<PlanSummaryDto>,
}

impl SubscribedEntitlementDto {
    pub fn expand(
        subscription: &UserSubscriptionEntity,
        trainer: &AccountEntity,
        tier: &SubscriptionPlanEntity,
        diet_plan: Option<&DietPlanEntity>,
        workout_plan: Option<&WorkoutPlanEntity>,
    ) -> Self {
        Self {
            subscription: UserSubscriptionDto::from_entity(subscription, subscription.created_at),
            trainer: trainer.into(),
            subscription_plan: tier.into(),
            diet_plan: diet_plan.map(PlanSummaryDto::from),
            workout_plan: workout_plan.map(PlanSummaryDto::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponseDto {
    pub message: String,
    pub subscription: SubscribedEntitlementDto,
}

/// Completed entitlement as listed on the trainer's subscriber page.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainerSubscriberDto {
    #[serde(flatten)]
    pub subscription: UserSubscriptionDto,
    pub member: Option<MemberContactDto>,
    pub subscription_plan: Option<TierSummaryDto>,
    pub diet_plan_title: Option<String>,
    pub workout_plan_title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberStatistics {
    pub total_subscribers: i64,
    pub total_revenue: i64,
    pub active_subscribers: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainerSubscribersDto {
    pub subscriptions: Vec<TrainerSubscriberDto>,
    pub statistics: SubscriberStatistics,
}
