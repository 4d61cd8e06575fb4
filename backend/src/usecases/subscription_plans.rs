use std::sync::Arc;

use axum::http::StatusCode;
use crates::domain::{
    repositories::{
        subscription_plans::SubscriptionPlanRepository,
        user_subscriptions::UserSubscriptionRepository,
    },
    value_objects::subscription_plans::{
        AdminSubscriptionPlanDto, CreateSubscriptionPlanModel, SubscriptionPlanDto,
        UpdateSubscriptionPlanModel,
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SubscriptionPlanError {
    #[error("Subscription plan not found")]
    NotFound,
    #[error("Subscription plan is used by existing subscriptions")]
    InUse,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionPlanError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SubscriptionPlanError::NotFound => StatusCode::NOT_FOUND,
            SubscriptionPlanError::InUse => StatusCode::BAD_REQUEST,
            SubscriptionPlanError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionPlanError>;

pub struct SubscriptionPlanUseCase<P, U>
where
    P: SubscriptionPlanRepository + Send + Sync + 'static,
    U: UserSubscriptionRepository + Send + Sync + 'static,
{
    subscription_plan_repo: Arc<P>,
    user_subscription_repo: Arc<U>,
}

impl<P, U> SubscriptionPlanUseCase<P, U>
where
    P: SubscriptionPlanRepository + Send + Sync + 'static,
    U: UserSubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(subscription_plan_repo: Arc<P>, user_subscription_repo: Arc<U>) -> Self {
        Self {
            subscription_plan_repo,
            user_subscription_repo,
        }
    }

    pub async fn create(
        &self,
        admin_id: Uuid,
        model: CreateSubscriptionPlanModel,
    ) -> UseCaseResult<SubscriptionPlanDto> {
        let insert = model
            .to_entity(admin_id)
            .map_err(|err| SubscriptionPlanError::Internal(err.into()))?;

        let plan = self
            .subscription_plan_repo
            .insert(insert)
            .await
            .map_err(|err| {
                error!(%admin_id, db_error = ?err, "subscription_plans: failed to create tier");
                SubscriptionPlanError::Internal(err)
            })?;

        info!(%admin_id, plan_id = %plan.id, name = %plan.name, "subscription_plans: tier created");
        Ok(plan.into())
    }

    pub async fn list_all(&self) -> UseCaseResult<Vec<AdminSubscriptionPlanDto>> {
        let plans = self
            .subscription_plan_repo
            .list_all_with_creator()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "subscription_plans: failed to list tiers");
                SubscriptionPlanError::Internal(err)
            })?;

        Ok(plans.into_iter().map(AdminSubscriptionPlanDto::from).collect())
    }

    pub async fn list_active(&self) -> UseCaseResult<Vec<SubscriptionPlanDto>> {
        let plans = self
            .subscription_plan_repo
            .list_active()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "subscription_plans: failed to list active tiers");
                SubscriptionPlanError::Internal(err)
            })?;

        Ok(plans.into_iter().map(SubscriptionPlanDto::from).collect())
    }

    pub async fn update(
        &self,
        plan_id: Uuid,
        model: UpdateSubscriptionPlanModel,
    ) -> UseCaseResult<SubscriptionPlanDto> {
        let changes = model
            .to_entity()
            .map_err(|err| SubscriptionPlanError::Internal(err.into()))?;

        let plan = self
            .subscription_plan_repo
            .update(plan_id, changes)
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "subscription_plans: failed to update tier");
                SubscriptionPlanError::Internal(err)
            })?
            .ok_or(SubscriptionPlanError::NotFound)?;

        info!(%plan_id, is_active = plan.is_active, "subscription_plans: tier updated");
        Ok(plan.into())
    }

    pub async fn delete(&self, plan_id: Uuid) -> UseCaseResult<()> {
        let references = self
            .user_subscription_repo
            .count_by_subscription_plan(plan_id)
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "subscription_plans: failed to count references");
                SubscriptionPlanError::Internal(err)
            })?;
        if references > 0 {
            warn!(%plan_id, references, "subscription_plans: tier still referenced");
            return Err(SubscriptionPlanError::InUse);
        }

        let deleted = self
            .subscription_plan_repo
            .delete(plan_id)
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "subscription_plans: failed to delete tier");
                SubscriptionPlanError::Internal(err)
            })?;
        if !deleted {
            return Err(SubscriptionPlanError::NotFound);
        }

        info!(%plan_id, "subscription_plans: tier deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crates::domain::{
        entities::subscription_plans::{SubscriptionPlanEntity, SubscriptionPlanWithCreator},
        repositories::{
            subscription_plans::MockSubscriptionPlanRepository,
            user_subscriptions::MockUserSubscriptionRepository,
        },
        value_objects::enums::plan_types::PlanType,
    };
    use mockall::predicate::eq;

    fn gold(created_by: Option<Uuid>) -> SubscriptionPlanEntity {
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
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_stamps_the_creating_admin() {
        let admin_id = Uuid::new_v4();
        let mut plans = MockSubscriptionPlanRepository::new();
        plans
            .expect_insert()
            .withf(move |insert| insert.created_by == Some(admin_id) && insert.is_active)
            .returning(move |_| Box::pin(async move { Ok(gold(Some(admin_id))) }));

        let usecase =
            SubscriptionPlanUseCase::new(Arc::new(plans), Arc::new(MockUserSubscriptionRepository::new()));
        let plan = usecase
            .create(
                admin_id,
                CreateSubscriptionPlanModel {
                    name: "Gold".to_string(),
                    description: "Monthly coaching".to_string(),
                    duration: 30,
                    price: 5000,
                    features: vec!["Weekly check-in".to_string()],
                    plan_type: PlanType::Premium,
                    is_active: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(plan.created_by, Some(admin_id));
        assert_eq!(plan.plan_type, "premium");
    }

    #[tokio::test]
    async fn listing_carries_creator_names() {
        let mut plans = MockSubscriptionPlanRepository::new();
        plans.expect_list_all_with_creator().returning(|| {
            Box::pin(async {
                Ok(vec![SubscriptionPlanWithCreator {
                    plan: gold(None),
                    creator_name: Some("Root".to_string()),
                }])
            })
        });

        let usecase =
            SubscriptionPlanUseCase::new(Arc::new(plans), Arc::new(MockUserSubscriptionRepository::new()));
        let listed = usecase.list_all().await.unwrap();

        assert_eq!(listed[0].created_by_name.as_deref(), Some("Root"));
    }

    #[tokio::test]
    async fn referenced_tier_cannot_be_deleted() {
        let plan_id = Uuid::new_v4();
        let mut plans = MockSubscriptionPlanRepository::new();
        plans.expect_delete().never();
        let mut subscriptions = MockUserSubscriptionRepository::new();
        subscriptions
            .expect_count_by_subscription_plan()
            .with(eq(plan_id))
            .returning(|_| Box::pin(async { Ok(2) }));

        let usecase = SubscriptionPlanUseCase::new(Arc::new(plans), Arc::new(subscriptions));
        let err = usecase.delete(plan_id).await.unwrap_err();

        assert!(matches!(err, SubscriptionPlanError::InUse));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn updating_missing_tier_is_not_found() {
        let mut plans = MockSubscriptionPlanRepository::new();
        plans
            .expect_update()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let usecase =
            SubscriptionPlanUseCase::new(Arc::new(plans), Arc::new(MockUserSubscriptionRepository::new()));
        let err = usecase
            .update(Uuid::new_v4(), UpdateSubscriptionPlanModel::default())
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
