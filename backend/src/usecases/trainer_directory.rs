use std::{collections::HashMap, sync::Arc};

use axum::http::StatusCode;
use crates::domain::{
    repositories::{
        accounts::AccountRepository, diet_plans::DietPlanRepository,
        user_subscriptions::UserSubscriptionRepository, workout_plans::WorkoutPlanRepository,
    },
    value_objects::{
        accounts::{TrainerPublicDto, TrainerSearchQuery},
        catalog::{DietPlanDto, WorkoutPlanDto},
        trainers::{TrainerProfileDto, TrainerWithCatalogDto},
    },
};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TrainerDirectoryError {
    #[error("Trainer not found")]
    TrainerNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl TrainerDirectoryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TrainerDirectoryError::TrainerNotFound => StatusCode::NOT_FOUND,
            TrainerDirectoryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, TrainerDirectoryError>;

/// Read side of the trainer catalog: member browsing and public profiles.
pub struct TrainerDirectoryUseCase<A, D, W, U>
where
    A: AccountRepository + Send + Sync + 'static,
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
    U: UserSubscriptionRepository + Send + Sync + 'static,
{
    account_repo: Arc<A>,
    diet_plan_repo: Arc<D>,
    workout_plan_repo: Arc<W>,
    user_subscription_repo: Arc<U>,
}

impl<A, D, W, U> TrainerDirectoryUseCase<A, D, W, U>
where
    A: AccountRepository + Send + Sync + 'static,
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
    U: UserSubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(
        account_repo: Arc<A>,
        diet_plan_repo: Arc<D>,
        workout_plan_repo: Arc<W>,
        user_subscription_repo: Arc<U>,
    ) -> Self {
        Self {
            account_repo,
            diet_plan_repo,
            workout_plan_repo,
            user_subscription_repo,
        }
    }

    pub async fn browse_trainers(
        &self,
        query: TrainerSearchQuery,
    ) -> UseCaseResult<Vec<TrainerWithCatalogDto>> {
        let trainers = self
            .account_repo
            .list_public_trainers(query.to_filter())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "trainer_directory: failed to list trainers");
                TrainerDirectoryError::Internal(err)
            })?;
        let trainer_ids: Vec<Uuid> = trainers.iter().map(|trainer| trainer.id).collect();

        let mut diet_plans: HashMap<Uuid, Vec<DietPlanDto>> = HashMap::new();
        for plan in self
            .diet_plan_repo
            .list_active_by_trainers(trainer_ids.clone())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "trainer_directory: failed to load diet plans");
                TrainerDirectoryError::Internal(err)
            })?
        {
            diet_plans.entry(plan.trainer_id).or_default().push(plan.into());
        }

        let mut workout_plans: HashMap<Uuid, Vec<WorkoutPlanDto>> = HashMap::new();
        for plan in self
            .workout_plan_repo
            .list_active_by_trainers(trainer_ids.clone())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "trainer_directory: failed to load workout plans");
                TrainerDirectoryError::Internal(err)
            })?
        {
            workout_plans.entry(plan.trainer_id).or_default().push(plan.into());
        }

        let subscriber_counts: HashMap<Uuid, i64> = self
            .user_subscription_repo
            .count_completed_by_trainers(trainer_ids)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "trainer_directory: failed to count subscribers");
                TrainerDirectoryError::Internal(err)
            })?
            .into_iter()
            .collect();

        let cards: Vec<TrainerWithCatalogDto> = trainers
            .iter()
            .map(|trainer| {
                TrainerWithCatalogDto::new(
                    TrainerPublicDto::from(trainer),
                    diet_plans.remove(&trainer.id).unwrap_or_default(),
                    workout_plans.remove(&trainer.id).unwrap_or_default(),
                    subscriber_counts.get(&trainer.id).copied().unwrap_or(0),
                )
            })
            .collect();

        info!(trainer_count = cards.len(), "trainer_directory: trainers listed");
        Ok(cards)
    }

    pub async fn trainer_profile(&self, trainer_id: Uuid) -> UseCaseResult<TrainerProfileDto> {
        let trainer = self
            .account_repo
            .find_by_id(trainer_id)
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "trainer_directory: failed to load trainer");
                TrainerDirectoryError::Internal(err)
            })?
            .filter(|account| account.is_public_trainer())
            .ok_or(TrainerDirectoryError::TrainerNotFound)?;

        let diet_plans = self
            .diet_plan_repo
            .list_active_by_trainer(trainer_id)
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "trainer_directory: failed to load diet plans");
                TrainerDirectoryError::Internal(err)
            })?;

        let workout_plans = self
            .workout_plan_repo
            .list_active_by_trainer(trainer_id)
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "trainer_directory: failed to load workout plans");
                TrainerDirectoryError::Internal(err)
            })?;

        let subscriber_count = self
            .user_subscription_repo
            .count_completed_by_trainers(vec![trainer_id])
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "trainer_directory: failed to count subscribers");
                TrainerDirectoryError::Internal(err)
            })?
            .into_iter()
            .find(|(id, _)| *id == trainer_id)
            .map(|(_, count)| count)
            .unwrap_or(0);

        Ok(TrainerProfileDto {
            trainer: TrainerPublicDto::from(&trainer),
            diet_plans: diet_plans.into_iter().map(DietPlanDto::from).collect(),
            workout_plans: workout_plans.into_iter().map(WorkoutPlanDto::from).collect(),
            subscriber_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crates::domain::{
        entities::{accounts::AccountEntity, diet_plans::DietPlanEntity},
        repositories::{
            accounts::MockAccountRepository, diet_plans::MockDietPlanRepository,
            user_subscriptions::MockUserSubscriptionRepository,
            workout_plans::MockWorkoutPlanRepository,
        },
    };

    fn trainer(id: Uuid, is_approved: bool) -> AccountEntity {
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
            experience: 4,
            membership_type: None,
            is_active: true,
            is_approved,
            approved_at: None,
            approved_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn diet(trainer_id: Uuid) -> DietPlanEntity {
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
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn browse_attaches_catalog_and_counts_per_trainer() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let mut accounts = MockAccountRepository::new();
        accounts.expect_list_public_trainers().returning(move |_| {
            Box::pin(async move { Ok(vec![trainer(first, true), trainer(second, true)]) })
        });
        let mut diet_plans = MockDietPlanRepository::new();
        diet_plans
            .expect_list_active_by_trainers()
            .returning(move |_| Box::pin(async move { Ok(vec![diet(first), diet(first)]) }));
        let mut workout_plans = MockWorkoutPlanRepository::new();
        workout_plans
            .expect_list_active_by_trainers()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        let mut subscriptions = MockUserSubscriptionRepository::new();
        subscriptions
            .expect_count_completed_by_trainers()
            .returning(move |_| Box::pin(async move { Ok(vec![(second, 3)]) }));

        let usecase = TrainerDirectoryUseCase::new(
            Arc::new(accounts),
            Arc::new(diet_plans),
            Arc::new(workout_plans),
            Arc::new(subscriptions),
        );
        let cards = usecase
            .browse_trainers(TrainerSearchQuery::default())
            .await
            .unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].diet_plan_count, 2);
        assert_eq!(cards[0].subscriber_count, 0);
        assert_eq!(cards[1].diet_plan_count, 0);
        assert_eq!(cards[1].subscriber_count, 3);
    }

    #[tokio::test]
    async fn unapproved_trainer_has_no_public_profile() {
        let trainer_id = Uuid::new_v4();
        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_find_by_id()
            .returning(move |id| Box::pin(async move { Ok(Some(trainer(id, false))) }));

        let usecase = TrainerDirectoryUseCase::new(
            Arc::new(accounts),
            Arc::new(MockDietPlanRepository::new()),
            Arc::new(MockWorkoutPlanRepository::new()),
            Arc::new(MockUserSubscriptionRepository::new()),
        );
        let err = usecase.trainer_profile(trainer_id).await.unwrap_err();

        assert!(matches!(err, TrainerDirectoryError::TrainerNotFound));
    }
}
