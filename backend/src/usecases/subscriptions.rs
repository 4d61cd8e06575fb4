use std::{collections::HashMap, sync::Arc};

use axum::http::StatusCode;
use chrono::Utc;
use crates::domain::{
    entities::{
        diet_plans::DietPlanEntity, user_subscriptions::InsertUserSubscriptionEntity,
        workout_plans::WorkoutPlanEntity,
    },
    repositories::{
        accounts::AccountRepository, diet_plans::DietPlanRepository,
        subscription_plans::SubscriptionPlanRepository,
        user_subscriptions::UserSubscriptionRepository, workout_plans::WorkoutPlanRepository,
    },
    value_objects::{
        accounts::MemberContactDto,
        member_subscriptions::{
            MemberSubscriptionDto, MemberSubscriptionSources, assemble_member_subscriptions,
            unique,
        },
        subscription_plans::TierSummaryDto,
        user_subscriptions::{
            SubscribeModel, SubscribeResponseDto, SubscribedEntitlementDto, TrainerSubscriberDto,
            TrainerSubscribersDto, UserSubscriptionDto,
        },
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("Subscription plan not found")]
    SubscriptionPlanNotFound,
    #[error("Trainer not found")]
    TrainerNotFound,
    #[error("Diet plan not found")]
    DietPlanNotFound,
    #[error("Workout plan not found")]
    WorkoutPlanNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SubscriptionError::SubscriptionPlanNotFound
            | SubscriptionError::TrainerNotFound
            | SubscriptionError::DietPlanNotFound
            | SubscriptionError::WorkoutPlanNotFound => StatusCode::NOT_FOUND,
            SubscriptionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

pub struct SubscriptionUseCase<A, P, D, W, S>
where
    A: AccountRepository + Send + Sync + 'static,
    P: SubscriptionPlanRepository + Send + Sync + 'static,
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    account_repo: Arc<A>,
    subscription_plan_repo: Arc<P>,
    diet_plan_repo: Arc<D>,
    workout_plan_repo: Arc<W>,
    user_subscription_repo: Arc<S>,
}

impl<A, P, D, W, S> SubscriptionUseCase<A, P, D, W, S>
where
    A: AccountRepository + Send + Sync + 'static,
    P: SubscriptionPlanRepository + Send + Sync + 'static,
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(
        account_repo: Arc<A>,
        subscription_plan_repo: Arc<P>,
        diet_plan_repo: Arc<D>,
        workout_plan_repo: Arc<W>,
        user_subscription_repo: Arc<S>,
    ) -> Self {
        Self {
            account_repo,
            subscription_plan_repo,
            diet_plan_repo,
            workout_plan_repo,
            user_subscription_repo,
        }
    }

    /// Records a completed purchase of a tier from a trainer, optionally bundling
    /// one of the trainer's diet and workout plans.
    pub async fn subscribe(
        &self,
        member_id: Uuid,
        model: SubscribeModel,
    ) -> UseCaseResult<SubscribeResponseDto> {
        let SubscribeModel {
            trainer_id,
            subscription_plan_id,
            diet_plan_id,
            workout_plan_id,
        } = model;
        info!(
            %member_id,
            %trainer_id,
            %subscription_plan_id,
            ?diet_plan_id,
            ?workout_plan_id,
            "subscriptions: subscribe requested"
        );

        let tier = self
            .subscription_plan_repo
            .find_by_id(subscription_plan_id)
            .await
            .map_err(|err| {
                error!(%subscription_plan_id, db_error = ?err, "subscriptions: failed to load tier");
                SubscriptionError::Internal(err)
            })?
            .filter(|tier| tier.is_active)
            .ok_or_else(|| {
                warn!(%member_id, %subscription_plan_id, "subscriptions: tier missing or inactive");
                SubscriptionError::SubscriptionPlanNotFound
            })?;

        let trainer = self
            .account_repo
            .find_by_id(trainer_id)
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "subscriptions: failed to load trainer");
                SubscriptionError::Internal(err)
            })?
            .filter(|account| account.is_public_trainer())
            .ok_or_else(|| {
                warn!(%member_id, %trainer_id, "subscriptions: trainer missing or not bookable");
                SubscriptionError::TrainerNotFound
            })?;

        let diet_plan = match diet_plan_id {
            Some(diet_plan_id) => Some(self.bookable_diet_plan(trainer_id, diet_plan_id).await?),
            None => None,
        };
        let workout_plan = match workout_plan_id {
            Some(workout_plan_id) => {
                Some(self.bookable_workout_plan(trainer_id, workout_plan_id).await?)
            }
            None => None,
        };

        let insert = InsertUserSubscriptionEntity::completed_purchase(
            member_id,
            &tier,
            trainer.id,
            diet_plan_id,
            workout_plan_id,
            Utc::now(),
        )?;

        let subscription = self
            .user_subscription_repo
            .insert(insert)
            .await
            .map_err(|err| {
                error!(%member_id, %trainer_id, db_error = ?err, "subscriptions: failed to persist subscription");
                SubscriptionError::Internal(err)
            })?;

        info!(
            %member_id,
            subscription_id = %subscription.id,
            transaction_id = %subscription.transaction_id,
            amount = subscription.amount,
            "subscriptions: subscription created"
        );

        Ok(SubscribeResponseDto {
            message: "Subscription created successfully".to_string(),
            subscription: SubscribedEntitlementDto::expand(
                &subscription,
                &trainer,
                &tier,
                diet_plan.as_ref(),
                workout_plan.as_ref(),
            ),
        })
    }

    async fn bookable_diet_plan(
        &self,
        trainer_id: Uuid,
        diet_plan_id: Uuid,
    ) -> UseCaseResult<DietPlanEntity> {
        self.diet_plan_repo
            .find_by_id(diet_plan_id)
            .await
            .map_err(|err| {
                error!(%diet_plan_id, db_error = ?err, "subscriptions: failed to load diet plan");
                SubscriptionError::Internal(err)
            })?
            .filter(|plan| plan.trainer_id == trainer_id && plan.is_active)
            .ok_or_else(|| {
                warn!(%trainer_id, %diet_plan_id, "subscriptions: diet plan not bookable with trainer");
                SubscriptionError::DietPlanNotFound
            })
    }

    async fn bookable_workout_plan(
        &self,
        trainer_id: Uuid,
        workout_plan_id: Uuid,
    ) -> UseCaseResult<WorkoutPlanEntity> {
        self.workout_plan_repo
            .find_by_id(workout_plan_id)
            .await
            .map_err(|err| {
                error!(%workout_plan_id, db_error = ?err, "subscriptions: failed to load workout plan");
                SubscriptionError::Internal(err)
            })?
            .filter(|plan| plan.trainer_id == trainer_id && plan.is_active)
            .ok_or_else(|| {
                warn!(%trainer_id, %workout_plan_id, "subscriptions: workout plan not bookable with trainer");
                SubscriptionError::WorkoutPlanNotFound
            })
    }

    pub async fn my_subscriptions(
        &self,
        member_id: Uuid,
    ) -> UseCaseResult<Vec<MemberSubscriptionDto>> {
        let subscriptions = self
            .user_subscription_repo
            .list_by_member(member_id)
            .await
            .map_err(|err| {
                error!(%member_id, db_error = ?err, "subscriptions: failed to list member subscriptions");
                SubscriptionError::Internal(err)
            })?;
        let subscription_count = subscriptions.len();

        let mut sources = MemberSubscriptionSources {
            subscriptions,
            ..Default::default()
        };
        let trainer_ids = sources.trainer_ids();

        sources.trainers = self
            .account_repo
            .find_by_ids(trainer_ids.clone())
            .await
            .map_err(SubscriptionError::Internal)?;
        sources.tiers = self
            .subscription_plan_repo
            .find_by_ids(sources.tier_ids())
            .await
            .map_err(SubscriptionError::Internal)?;
        sources.selected_diet_plans = self
            .diet_plan_repo
            .find_by_ids(sources.selected_diet_plan_ids())
            .await
            .map_err(SubscriptionError::Internal)?;
        sources.selected_workout_plans = self
            .workout_plan_repo
            .find_by_ids(sources.selected_workout_plan_ids())
            .await
            .map_err(SubscriptionError::Internal)?;
        sources.trainer_diet_plans = self
            .diet_plan_repo
            .list_active_by_trainers(trainer_ids.clone())
            .await
            .map_err(SubscriptionError::Internal)?;
        sources.trainer_workout_plans = self
            .workout_plan_repo
            .list_active_by_trainers(trainer_ids)
            .await
            .map_err(SubscriptionError::Internal)?;

        let views = assemble_member_subscriptions(sources, Utc::now());
        if views.len() < subscription_count {
            warn!(
                %member_id,
                skipped = subscription_count - views.len(),
                "subscriptions: skipped entitlements with unresolved trainer or tier"
            );
        }

        Ok(views)
    }

    pub async fn trainer_subscribers(&self, trainer_id: Uuid) -> UseCaseResult<TrainerSubscribersDto> {
        let now = Utc::now();
        let subscriptions = self
            .user_subscription_repo
            .list_completed_by_trainer(trainer_id)
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "subscriptions: failed to list subscribers");
                SubscriptionError::Internal(err)
            })?;

        let members: HashMap<Uuid, MemberContactDto> = self
            .account_repo
            .find_by_ids(unique(subscriptions.iter().map(|sub| sub.member_id)))
            .await
            .map_err(SubscriptionError::Internal)?
            .iter()
            .map(|member| (member.id, MemberContactDto::from(member)))
            .collect();
        let tiers: HashMap<Uuid, TierSummaryDto> = self
            .subscription_plan_repo
            .find_by_ids(unique(subscriptions.iter().map(|sub| sub.subscription_plan_id)))
            .await
            .map_err(SubscriptionError::Internal)?
            .iter()
            .map(|tier| (tier.id, TierSummaryDto::from(tier)))
            .collect();
        let diet_titles: HashMap<Uuid, String> = self
            .diet_plan_repo
            .find_by_ids(unique(subscriptions.iter().filter_map(|sub| sub.diet_plan_id)))
            .await
            .map_err(SubscriptionError::Internal)?
            .into_iter()
            .map(|plan| (plan.id, plan.title))
            .collect();
        let workout_titles: HashMap<Uuid, String> = self
            .workout_plan_repo
            .find_by_ids(unique(subscriptions.iter().filter_map(|sub| sub.workout_plan_id)))
            .await
            .map_err(SubscriptionError::Internal)?
            .into_iter()
            .map(|plan| (plan.id, plan.title))
            .collect();

        let statistics = self
            .user_subscription_repo
            .subscriber_statistics(trainer_id, now)
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "subscriptions: failed to compute statistics");
                SubscriptionError::Internal(err)
            })?;

        let subscriptions = subscriptions
            .iter()
            .map(|subscription| TrainerSubscriberDto {
                subscription: UserSubscriptionDto::from_entity(subscription, now),
                member: members.get(&subscription.member_id).cloned(),
                subscription_plan: tiers.get(&subscription.subscription_plan_id).cloned(),
                diet_plan_title: subscription
                    .diet_plan_id
                    .and_then(|id| diet_titles.get(&id).cloned()),
                workout_plan_title: subscription
                    .workout_plan_id
                    .and_then(|id| workout_titles.get(&id).cloned()),
            })
            .collect();

        Ok(TrainerSubscribersDto {
            subscriptions,
            statistics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};
    use crates::domain::{
        entities::{
            accounts::AccountEntity, subscription_plans::SubscriptionPlanEntity,
            user_subscriptions::UserSubscriptionEntity,
        },
        repositories::{
            accounts::MockAccountRepository, diet_plans::MockDietPlanRepository,
            subscription_plans::MockSubscriptionPlanRepository,
            user_subscriptions::MockUserSubscriptionRepository,
            workout_plans::MockWorkoutPlanRepository,
        },
        value_objects::{
            enums::{
                payment_statuses::PaymentStatus, subscription_statuses::SubscriptionStatus,
            },
            user_subscriptions::SubscriberStatistics,
        },
    };
    use mockall::predicate::eq;

    type TestUseCase = SubscriptionUseCase<
        MockAccountRepository,
        MockSubscriptionPlanRepository,
        MockDietPlanRepository,
        MockWorkoutPlanRepository,
        MockUserSubscriptionRepository,
    >;

    struct Mocks {
        accounts: MockAccountRepository,
        plans: MockSubscriptionPlanRepository,
        diets: MockDietPlanRepository,
        workouts: MockWorkoutPlanRepository,
        subscriptions: MockUserSubscriptionRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                accounts: MockAccountRepository::new(),
                plans: MockSubscriptionPlanRepository::new(),
                diets: MockDietPlanRepository::new(),
                workouts: MockWorkoutPlanRepository::new(),
                subscriptions: MockUserSubscriptionRepository::new(),
            }
        }

        fn into_usecase(self) -> TestUseCase {
            SubscriptionUseCase::new(
                Arc::new(self.accounts),
                Arc::new(self.plans),
                Arc::new(self.diets),
                Arc::new(self.workouts),
                Arc::new(self.subscriptions),
            )
        }
    }

    fn gold_tier() -> SubscriptionPlanEntity {
        let now = Utc::now();
        SubscriptionPlanEntity {
            id: Uuid::new_v4(),
            name: "Gold".to_string(),
            description: "Monthly coaching".to_string(),
            duration: 30,
            price: 5000,
            features: vec!["Weekly check-in".to_string()],
            plan_type: "premium".to_string(),
            is_active: true,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn approved_trainer(id: Uuid) -> AccountEntity {
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
            experience: 6,
            membership_type: None,
            is_active: true,
            is_approved: true,
            approved_at: Some(now),
            approved_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn diet_plan(trainer_id: Uuid, is_active: bool) -> DietPlanEntity {
        let now = Utc::now();
        DietPlanEntity {
            id: Uuid::new_v4(),
            trainer_id,
            title: "Lean cut".to_string(),
            description: "Deficit".to_string(),
            duration: 8,
            calories_per_day: 1800,
            meals: vec![],
            target_audience: "weight_loss".to_string(),
            price: 1200,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn persisted(insert: InsertUserSubscriptionEntity) -> UserSubscriptionEntity {
        UserSubscriptionEntity {
            id: Uuid::new_v4(),
            member_id: insert.member_id,
            trainer_id: insert.trainer_id,
            subscription_plan_id: insert.subscription_plan_id,
            diet_plan_id: insert.diet_plan_id,
            workout_plan_id: insert.workout_plan_id,
            start_date: insert.start_date,
            end_date: insert.end_date,
            amount: insert.amount,
            payment_status: insert.payment_status,
            status: insert.status,
            transaction_id: insert.transaction_id,
            created_at: insert.created_at,
            updated_at: insert.updated_at,
        }
    }

    fn expect_tier(mocks: &mut Mocks, tier: SubscriptionPlanEntity) {
        mocks
            .plans
            .expect_find_by_id()
            .with(eq(tier.id))
            .returning(move |_| {
                let tier = tier.clone();
                Box::pin(async move { Ok(Some(tier)) })
            });
    }

    fn expect_trainer(mocks: &mut Mocks, trainer: AccountEntity) {
        mocks
            .accounts
            .expect_find_by_id()
            .with(eq(trainer.id))
            .returning(move |_| {
                let trainer = trainer.clone();
                Box::pin(async move { Ok(Some(trainer)) })
            });
    }

    fn subscribe_model(trainer_id: Uuid, tier_id: Uuid) -> SubscribeModel {
        SubscribeModel {
            trainer_id,
            subscription_plan_id: tier_id,
            diet_plan_id: None,
            workout_plan_id: None,
        }
    }

    #[tokio::test]
    async fn gold_tier_purchase_charges_tier_price_for_thirty_days() {
        let tier = gold_tier();
        let tier_id = tier.id;
        let trainer_id = Uuid::new_v4();
        let plan = diet_plan(trainer_id, true);
        let diet_plan_id = plan.id;
        let member_id = Uuid::new_v4();

        let mut mocks = Mocks::new();
        expect_tier(&mut mocks, tier);
        expect_trainer(&mut mocks, approved_trainer(trainer_id));
        mocks
            .diets
            .expect_find_by_id()
            .with(eq(diet_plan_id))
            .returning(move |_| {
                let plan = plan.clone();
                Box::pin(async move { Ok(Some(plan)) })
            });
        mocks
            .subscriptions
            .expect_insert()
            .times(1)
            .returning(|insert| Box::pin(async move { Ok(persisted(insert)) }));

        let mut model = subscribe_model(trainer_id, tier_id);
        model.diet_plan_id = Some(diet_plan_id);

        let response = mocks.into_usecase().subscribe(member_id, model).await.unwrap();
        let entitlement = response.subscription;
        let subscription = &entitlement.subscription;

        assert_eq!(subscription.amount, 5000);
        assert_eq!(subscription.end_date - subscription.start_date, Duration::days(30));
        assert_eq!(subscription.payment_status, PaymentStatus::Completed);
        assert_eq!(subscription.status, SubscriptionStatus::Active);
        assert!(subscription.transaction_id.starts_with("TXN"));
        assert_eq!(subscription.member_id, member_id);
        assert_eq!(entitlement.subscription_plan.name, "Gold");
        assert_eq!(entitlement.diet_plan.map(|plan| plan.id), Some(diet_plan_id));
        assert!(entitlement.workout_plan.is_none());
    }

    #[tokio::test]
    async fn subscribing_twice_creates_two_entitlements() {
        let tier = gold_tier();
        let tier_id = tier.id;
        let trainer_id = Uuid::new_v4();

        let mut mocks = Mocks::new();
        expect_tier(&mut mocks, tier);
        expect_trainer(&mut mocks, approved_trainer(trainer_id));
        mocks
            .subscriptions
            .expect_insert()
            .times(2)
            .returning(|insert| Box::pin(async move { Ok(persisted(insert)) }));
        let usecase = mocks.into_usecase();

        let member_id = Uuid::new_v4();
        let first = usecase
            .subscribe(member_id, subscribe_model(trainer_id, tier_id))
            .await
            .unwrap();
        let second = usecase
            .subscribe(member_id, subscribe_model(trainer_id, tier_id))
            .await
            .unwrap();

        assert_ne!(
            first.subscription.subscription.transaction_id,
            second.subscription.subscription.transaction_id
        );
    }

    #[tokio::test]
    async fn diet_plan_of_another_trainer_is_rejected() {
        let tier = gold_tier();
        let tier_id = tier.id;
        let trainer_id = Uuid::new_v4();
        let foreign = diet_plan(Uuid::new_v4(), true);
        let foreign_id = foreign.id;

        let mut mocks = Mocks::new();
        expect_tier(&mut mocks, tier);
        expect_trainer(&mut mocks, approved_trainer(trainer_id));
        mocks.diets.expect_find_by_id().returning(move |_| {
            let foreign = foreign.clone();
            Box::pin(async move { Ok(Some(foreign)) })
        });
        mocks.subscriptions.expect_insert().never();

        let mut model = subscribe_model(trainer_id, tier_id);
        model.diet_plan_id = Some(foreign_id);

        let err = mocks
            .into_usecase()
            .subscribe(Uuid::new_v4(), model)
            .await
            .unwrap_err();

        assert!(matches!(err, SubscriptionError::DietPlanNotFound));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn inactive_tier_is_not_found() {
        let mut tier = gold_tier();
        tier.is_active = false;
        let tier_id = tier.id;

        let mut mocks = Mocks::new();
        expect_tier(&mut mocks, tier);
        mocks.subscriptions.expect_insert().never();

        let err = mocks
            .into_usecase()
            .subscribe(Uuid::new_v4(), subscribe_model(Uuid::new_v4(), tier_id))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Subscription plan not found");
    }

    #[tokio::test]
    async fn pending_trainer_cannot_be_booked() {
        let tier = gold_tier();
        let tier_id = tier.id;
        let trainer_id = Uuid::new_v4();
        let mut trainer = approved_trainer(trainer_id);
        trainer.is_approved = false;

        let mut mocks = Mocks::new();
        expect_tier(&mut mocks, tier);
        expect_trainer(&mut mocks, trainer);
        mocks.subscriptions.expect_insert().never();

        let err = mocks
            .into_usecase()
            .subscribe(Uuid::new_v4(), subscribe_model(trainer_id, tier_id))
            .await
            .unwrap_err();

        assert!(matches!(err, SubscriptionError::TrainerNotFound));
    }

    fn entitlement(
        member_id: Uuid,
        trainer_id: Uuid,
        tier_id: Uuid,
        diet_plan_id: Option<Uuid>,
        created_at: DateTime<Utc>,
    ) -> UserSubscriptionEntity {
        UserSubscriptionEntity {
            id: Uuid::new_v4(),
            member_id,
            trainer_id,
            subscription_plan_id: tier_id,
            diet_plan_id,
            workout_plan_id: None,
            start_date: created_at,
            end_date: created_at + Duration::days(30),
            amount: 5000,
            payment_status: "completed".to_string(),
            status: "active".to_string(),
            transaction_id: "TXN1700000000000abcdefghi".to_string(),
            created_at,
            updated_at: created_at,
        }
    }

    #[tokio::test]
    async fn my_subscriptions_show_live_catalog_and_keep_purchase() {
        let member_id = Uuid::new_v4();
        let trainer_id = Uuid::new_v4();
        let tier = gold_tier();
        let tier_id = tier.id;
        let selected = diet_plan(trainer_id, true);
        let selected_id = selected.id;
        let mut deactivated = selected.clone();
        deactivated.is_active = false;
        let sub = entitlement(member_id, trainer_id, tier_id, Some(selected_id), Utc::now());

        let mut mocks = Mocks::new();
        mocks
            .subscriptions
            .expect_list_by_member()
            .with(eq(member_id))
            .returning(move |_| {
                let sub = sub.clone();
                Box::pin(async move { Ok(vec![sub]) })
            });
        mocks
            .accounts
            .expect_find_by_ids()
            .returning(move |_| Box::pin(async move { Ok(vec![approved_trainer(trainer_id)]) }));
        mocks.plans.expect_find_by_ids().returning(move |_| {
            let tier = tier.clone();
            Box::pin(async move { Ok(vec![tier]) })
        });
        // The member bought the plan; the trainer deactivated it afterwards.
        let bought = deactivated.clone();
        mocks.diets.expect_find_by_ids().returning(move |_| {
            let bought = bought.clone();
            Box::pin(async move { Ok(vec![bought]) })
        });
        mocks.diets.expect_list_active_by_trainers().returning(move |_| {
            let deactivated = deactivated.clone();
            Box::pin(async move { Ok(vec![deactivated]) })
        });
        mocks
            .workouts
            .expect_find_by_ids()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        mocks
            .workouts
            .expect_list_active_by_trainers()
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let views = mocks.into_usecase().my_subscriptions(member_id).await.unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].diet_plan.as_ref().map(|plan| plan.id), Some(selected_id));
        assert!(views[0].trainer_diet_plans.is_empty());
        assert_eq!(views[0].subscription.amount, 5000);
    }

    #[tokio::test]
    async fn my_subscriptions_skip_entitlements_with_deleted_tier() {
        let member_id = Uuid::new_v4();
        let trainer_id = Uuid::new_v4();
        let sub = entitlement(member_id, trainer_id, Uuid::new_v4(), None, Utc::now());

        let mut mocks = Mocks::new();
        mocks.subscriptions.expect_list_by_member().returning(move |_| {
            let sub = sub.clone();
            Box::pin(async move { Ok(vec![sub]) })
        });
        mocks
            .accounts
            .expect_find_by_ids()
            .returning(move |_| Box::pin(async move { Ok(vec![approved_trainer(trainer_id)]) }));
        mocks
            .plans
            .expect_find_by_ids()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        mocks
            .diets
            .expect_find_by_ids()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        mocks
            .diets
            .expect_list_active_by_trainers()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        mocks
            .workouts
            .expect_find_by_ids()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        mocks
            .workouts
            .expect_list_active_by_trainers()
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let views = mocks.into_usecase().my_subscriptions(member_id).await.unwrap();

        assert!(views.is_empty());
    }

    #[tokio::test]
    async fn deleted_trainer_and_plan_leave_remaining_entitlements_readable() {
        let member_id = Uuid::new_v4();
        let kept_trainer = Uuid::new_v4();
        let tier = gold_tier();
        let tier_id = tier.id;
        let gone = entitlement(member_id, Uuid::new_v4(), tier_id, None, Utc::now());
        let kept = entitlement(member_id, kept_trainer, tier_id, Some(Uuid::new_v4()), Utc::now());
        let kept_id = kept.id;

        let mut mocks = Mocks::new();
        mocks.subscriptions.expect_list_by_member().returning(move |_| {
            let rows = vec![gone.clone(), kept.clone()];
            Box::pin(async move { Ok(rows) })
        });
        mocks
            .accounts
            .expect_find_by_ids()
            .returning(move |_| Box::pin(async move { Ok(vec![approved_trainer(kept_trainer)]) }));
        mocks.plans.expect_find_by_ids().returning(move |_| {
            let tier = tier.clone();
            Box::pin(async move { Ok(vec![tier]) })
        });
        // The selected diet plan was deleted by its trainer.
        mocks
            .diets
            .expect_find_by_ids()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        mocks
            .diets
            .expect_list_active_by_trainers()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        mocks
            .workouts
            .expect_find_by_ids()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        mocks
            .workouts
            .expect_list_active_by_trainers()
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let views = mocks.into_usecase().my_subscriptions(member_id).await.unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].subscription.id, kept_id);
        assert!(views[0].diet_plan.is_none());
    }

    #[tokio::test]
    async fn trainer_subscribers_join_member_and_tier() {
        let trainer_id = Uuid::new_v4();
        let member_id = Uuid::new_v4();
        let tier = gold_tier();
        let tier_id = tier.id;
        let sub = entitlement(member_id, trainer_id, tier_id, None, Utc::now());

        let mut mocks = Mocks::new();
        mocks
            .subscriptions
            .expect_list_completed_by_trainer()
            .with(eq(trainer_id))
            .returning(move |_| {
                let sub = sub.clone();
                Box::pin(async move { Ok(vec![sub]) })
            });
        mocks.accounts.expect_find_by_ids().returning(move |_| {
            let mut member = approved_trainer(member_id);
            member.role = "member".to_string();
            member.name = "Member".to_string();
            Box::pin(async move { Ok(vec![member]) })
        });
        mocks.plans.expect_find_by_ids().returning(move |_| {
            let tier = tier.clone();
            Box::pin(async move { Ok(vec![tier]) })
        });
        mocks
            .diets
            .expect_find_by_ids()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        mocks
            .workouts
            .expect_find_by_ids()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        mocks
            .subscriptions
            .expect_subscriber_statistics()
            .returning(|_, _| {
                Box::pin(async {
                    Ok(SubscriberStatistics {
                        total_subscribers: 1,
                        total_revenue: 5000,
                        active_subscribers: 1,
                    })
                })
            });

        let page = mocks
            .into_usecase()
            .trainer_subscribers(trainer_id)
            .await
            .unwrap();

        assert_eq!(page.statistics.total_revenue, 5000);
        assert_eq!(page.subscriptions.len(), 1);
        let row = &page.subscriptions[0];
        assert_eq!(row.member.as_ref().map(|m| m.name.as_str()), Some("Member"));
        assert_eq!(row.subscription_plan.as_ref().map(|t| t.price), Some(5000));
        assert!(row.diet_plan_title.is_none());
    }

    #[tokio::test]
    async fn deleted_member_keeps_entitlement_on_subscriber_list() {
        let trainer_id = Uuid::new_v4();
        let tier = gold_tier();
        let tier_id = tier.id;
        let sub = entitlement(Uuid::new_v4(), trainer_id, tier_id, None, Utc::now());
        let sub_id = sub.id;

        let mut mocks = Mocks::new();
        mocks
            .subscriptions
            .expect_list_completed_by_trainer()
            .returning(move |_| {
                let sub = sub.clone();
                Box::pin(async move { Ok(vec![sub]) })
            });
        // Account row is gone; the entitlement row is not.
        mocks
            .accounts
            .expect_find_by_ids()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        mocks.plans.expect_find_by_ids().returning(move |_| {
            let tier = tier.clone();
            Box::pin(async move { Ok(vec![tier]) })
        });
        mocks
            .diets
            .expect_find_by_ids()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        mocks
            .workouts
            .expect_find_by_ids()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        mocks
            .subscriptions
            .expect_subscriber_statistics()
            .returning(|_, _| {
                Box::pin(async {
                    Ok(SubscriberStatistics {
                        total_subscribers: 1,
                        total_revenue: 5000,
                        active_subscribers: 1,
                    })
                })
            });

        let page = mocks
            .into_usecase()
            .trainer_subscribers(trainer_id)
            .await
            .unwrap();

        assert_eq!(page.subscriptions.len(), 1);
        assert_eq!(page.subscriptions[0].subscription.id, sub_id);
        assert!(page.subscriptions[0].member.is_none());
        assert_eq!(page.statistics.total_revenue, 5000);
    }
}
