use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    entities::{
        accounts::AccountEntity, diet_plans::DietPlanEntity,
        subscription_plans::SubscriptionPlanEntity, user_subscriptions::UserSubscriptionEntity,
        workout_plans::WorkoutPlanEntity,
    },
    value_objects::{
        accounts::TrainerPublicDto,
        catalog::{DietPlanDto, WorkoutPlanDto},
        subscription_plans::SubscriptionPlanDto,
        user_subscriptions::UserSubscriptionDto,
    },
};

/// A member's entitlement with everything the member dashboard shows for it.
///
/// `subscription_plan`, `diet_plan` and `workout_plan` are what was bought.
/// `trainer_diet_plans` and `trainer_workout_plans` are the trainer's live
/// catalog at read time and may differ from what was bought.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberSubscriptionDto {
    #[serde(flatten)]
    pub subscription: UserSubscriptionDto,
    pub trainer: TrainerPublicDto,
    pub subscription_plan: SubscriptionPlanDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet_plan: Option<DietPlanDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_plan: Option<WorkoutPlanDto>,
    pub trainer_diet_plans: Vec<DietPlanDto>,
    pub trainer_workout_plans: Vec<WorkoutPlanDto>,
}

/// Records batch-loaded for one member's entitlement list.
#[derive(Debug, Clone, Default)]
pub struct MemberSubscriptionSources {
    pub subscriptions: Vec<UserSubscriptionEntity>,
    pub trainers: Vec<AccountEntity>,
    pub tiers: Vec<SubscriptionPlanEntity>,
    pub selected_diet_plans: Vec<DietPlanEntity>,
    pub selected_workout_plans: Vec<WorkoutPlanEntity>,
    pub trainer_diet_plans: Vec<DietPlanEntity>,
    pub trainer_workout_plans: Vec<WorkoutPlanEntity>,
}

impl MemberSubscriptionSources {
    pub fn trainer_ids(&self) -> Vec<Uuid> {
        unique(self.subscriptions.iter().map(|sub| sub.trainer_id))
    }

    pub fn tier_ids(&self) -> Vec<Uuid> {
        unique(self.subscriptions.iter().map(|sub| sub.subscription_plan_id))
    }

    pub fn selected_diet_plan_ids(&self) -> Vec<Uuid> {
        unique(self.subscriptions.iter().filter_map(|sub| sub.diet_plan_id))
    }

    pub fn selected_workout_plan_ids(&self) -> Vec<Uuid> {
        unique(self.subscriptions.iter().filter_map(|sub| sub.workout_plan_id))
    }
}

pub fn unique(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = ids.collect();
    ids.sort();
    ids.dedup();
    ids
}

/// Joins entitlements with their trainer, tier, selected plans and the trainer's
/// active catalog. Most recent entitlement first. A missing diet or workout plan
/// is omitted; an entitlement whose trainer or tier no longer resolves is dropped.
pub fn assemble_member_subscriptions(
    sources: MemberSubscriptionSources,
    now: DateTime<Utc>,
) -> Vec<MemberSubscriptionDto> {
    let trainers: HashMap<Uuid, AccountEntity> = sources
        .trainers
        .into_iter()
        .map(|trainer| (trainer.id, trainer))
        .collect();
    let tiers: HashMap<Uuid, SubscriptionPlanEntity> = sources
        .tiers
        .into_iter()
        .map(|tier| (tier.id, tier))
        .collect();
    let selected_diets: HashMap<Uuid, DietPlanEntity> = sources
        .selected_diet_plans
        .into_iter()
        .map(|plan| (plan.id, plan))
        .collect();
    let selected_workouts: HashMap<Uuid, WorkoutPlanEntity> = sources
        .selected_workout_plans
        .into_iter()
        .map(|plan| (plan.id, plan))
        .collect();

    let mut diet_catalog: HashMap<Uuid, Vec<DietPlanEntity>> = HashMap::new();
    for plan in sources.trainer_diet_plans.into_iter().filter(|plan| plan.is_active) {
        diet_catalog.entry(plan.trainer_id).or_default().push(plan);
    }
    for plans in diet_catalog.values_mut() {
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }

    let mut workout_catalog: HashMap<Uuid, Vec<WorkoutPlanEntity>> = HashMap::new();
    for plan in sources
        .trainer_workout_plans
        .into_iter()
        .filter(|plan| plan.is_active)
    {
        workout_catalog.entry(plan.trainer_id).or_default().push(plan);
    }
    for plans in workout_catalog.values_mut() {
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }

    let mut subscriptions = sources.subscriptions;
    subscriptions.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });

    subscriptions
        .iter()
        .filter_map(|subscription| {
            let trainer = trainers.get(&subscription.trainer_id)?;
            let tier = tiers.get(&subscription.subscription_plan_id)?;

            Some(MemberSubscriptionDto {
                subscription: UserSubscriptionDto::from_entity(subscription, now),
                trainer: trainer.into(),
                subscription_plan: tier.clone().into(),
                diet_plan: subscription
                    .diet_plan_id
                    .and_then(|id| selected_diets.get(&id))
                    .cloned()
                    .map(DietPlanDto::from),
                workout_plan: subscription
                    .workout_plan_id
                    .and_then(|id| selected_workouts.get(&id))
                    .cloned()
                    .map(WorkoutPlanDto::from),
                trainer_diet_plans: diet_catalog
                    .get(&trainer.id)
                    .map(|plans| plans.iter().cloned().map(DietPlanDto::from).collect())
                    .unwrap_or_default(),
                trainer_workout_plans: workout_catalog
                    .get(&trainer.id)
                    .map(|plans| plans.iter().cloned().map(WorkoutPlanDto::from).collect())
                    .unwrap_or_default(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn trainer(id: Uuid) -> AccountEntity {
        let now = Utc::now();
        AccountEntity {
            id,
            name: "Coach".to_string(),
            email: "coach@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: "trainer".to_string(),
            phone: None,
            date_of_birth: None,
            specialization: Some("strength".to_string()),
            experience: 5,
            membership_type: None,
            is_active: true,
            is_approved: true,
            approved_at: Some(now),
            approved_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn tier(id: Uuid) -> SubscriptionPlanEntity {
        let now = Utc::now();
        SubscriptionPlanEntity {
            id,
            name: "Gold".to_string(),
            description: "Monthly".to_string(),
            duration: 30,
            price: 5000,
            features: vec!["support".to_string()],
            plan_type: "premium".to_string(),
            is_active: true,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn diet(trainer_id: Uuid, title: &str, is_active: bool, age_days: i64) -> DietPlanEntity {
        let created_at = Utc::now() - Duration::days(age_days);
        DietPlanEntity {
            id: Uuid::new_v4(),
            trainer_id,
            title: title.to_string(),
            description: "Plan".to_string(),
            duration: 4,
            calories_per_day: 2000,
            meals: vec![],
            target_audience: "maintenance".to_string(),
            price: 800,
            is_active,
            created_at,
            updated_at: created_at,
        }
    }

    fn subscription(
        trainer_id: Uuid,
        tier_id: Uuid,
        diet_plan_id: Option<Uuid>,
        age_days: i64,
    ) -> UserSubscriptionEntity {
        let created_at = Utc::now() - Duration::days(age_days);
        UserSubscriptionEntity {
            id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
            trainer_id,
            subscription_plan_id: tier_id,
            diet_plan_id,
            workout_plan_id: None,
            start_date: created_at,
            end_date: created_at + Duration::days(30),
            amount: 5000,
            payment_status: "completed".to_string(),
            status: "active".to_string(),
            transaction_id: "TXN1".to_string(),
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn orders_most_recent_first() {
        let trainer_id = Uuid::new_v4();
        let tier_id = Uuid::new_v4();
        let older = subscription(trainer_id, tier_id, None, 10);
        let newer = subscription(trainer_id, tier_id, None, 1);

        let views = assemble_member_subscriptions(
            MemberSubscriptionSources {
                subscriptions: vec![older.clone(), newer.clone()],
                trainers: vec![trainer(trainer_id)],
                tiers: vec![tier(tier_id)],
                ..Default::default()
            },
            Utc::now(),
        );

        let ids: Vec<Uuid> = views.iter().map(|view| view.subscription.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[test]
    fn live_catalog_contains_only_active_plans_of_that_trainer() {
        let trainer_id = Uuid::new_v4();
        let other_trainer_id = Uuid::new_v4();
        let tier_id = Uuid::new_v4();
        let selected = diet(trainer_id, "Selected", true, 20);
        let added_later = diet(trainer_id, "Added later", true, 1);
        let deactivated = diet(trainer_id, "Deactivated", false, 5);
        let foreign = diet(other_trainer_id, "Foreign", true, 2);

        let views = assemble_member_subscriptions(
            MemberSubscriptionSources {
                subscriptions: vec![subscription(trainer_id, tier_id, Some(selected.id), 3)],
                trainers: vec![trainer(trainer_id)],
                tiers: vec![tier(tier_id)],
                selected_diet_plans: vec![selected.clone()],
                trainer_diet_plans: vec![
                    selected.clone(),
                    added_later.clone(),
                    deactivated,
                    foreign,
                ],
                ..Default::default()
            },
            Utc::now(),
        );

        assert_eq!(views.len(), 1);
        let view = &views[0];
        assert_eq!(view.diet_plan.as_ref().map(|plan| plan.id), Some(selected.id));
        let titles: Vec<&str> = view
            .trainer_diet_plans
            .iter()
            .map(|plan| plan.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Added later", "Selected"]);
        assert!(view.trainer_workout_plans.is_empty());
    }

    #[test]
    fn deleted_selected_plan_is_omitted() {
        let trainer_id = Uuid::new_v4();
        let tier_id = Uuid::new_v4();

        let views = assemble_member_subscriptions(
            MemberSubscriptionSources {
                subscriptions: vec![subscription(trainer_id, tier_id, Some(Uuid::new_v4()), 1)],
                trainers: vec![trainer(trainer_id)],
                tiers: vec![tier(tier_id)],
                ..Default::default()
            },
            Utc::now(),
        );

        assert_eq!(views.len(), 1);
        assert!(views[0].diet_plan.is_none());
        let json = serde_json::to_value(&views[0]).unwrap();
        assert!(json.get("dietPlan").is_none());
        assert_eq!(json["amount"], 5000);
    }

    #[test]
    fn unresolvable_trainer_drops_the_entitlement() {
        let tier_id = Uuid::new_v4();

        let views = assemble_member_subscriptions(
            MemberSubscriptionSources {
                subscriptions: vec![subscription(Uuid::new_v4(), tier_id, None, 1)],
                tiers: vec![tier(tier_id)],
                ..Default::default()
            },
            Utc::now(),
        );

        assert!(views.is_empty());
    }

    #[test]
    fn expired_by_date_is_not_current() {
        let trainer_id = Uuid::new_v4();
        let tier_id = Uuid::new_v4();
        let old = subscription(trainer_id, tier_id, None, 45);

        let views = assemble_member_subscriptions(
            MemberSubscriptionSources {
                subscriptions: vec![old],
                trainers: vec![trainer(trainer_id)],
                tiers: vec![tier(tier_id)],
                ..Default::default()
            },
            Utc::now(),
        );

        assert!(!views[0].subscription.is_current);
        assert_eq!(
            views[0].subscription.status,
            crate::domain::value_objects::enums::subscription_statuses::SubscriptionStatus::Active
        );
    }
}
