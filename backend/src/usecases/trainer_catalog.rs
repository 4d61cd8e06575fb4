use std::sync::Arc;

use axum::http::StatusCode;
use crates::domain::{
    repositories::{diet_plans::DietPlanRepository, workout_plans::WorkoutPlanRepository},
    value_objects::catalog::{
        CreateDietPlanModel, CreateWorkoutPlanModel, DietPlanDto, UpdateDietPlanModel,
        UpdateWorkoutPlanModel, WorkoutPlanDto,
    },
};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TrainerCatalogError {
    #[error("Diet plan not found")]
    DietPlanNotFound,
    #[error("Workout plan not found")]
    WorkoutPlanNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl TrainerCatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TrainerCatalogError::DietPlanNotFound | TrainerCatalogError::WorkoutPlanNotFound => {
                StatusCode::NOT_FOUND
            }
            TrainerCatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, TrainerCatalogError>;

/// Diet and workout plan management, always scoped to the calling trainer.
pub struct TrainerCatalogUseCase<D, W>
where
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
{
    diet_plan_repo: Arc<D>,
    workout_plan_repo: Arc<W>,
}

impl<D, W> TrainerCatalogUseCase<D, W>
where
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
{
    pub fn new(diet_plan_repo: Arc<D>, workout_plan_repo: Arc<W>) -> Self {
        Self {
            diet_plan_repo,
            workout_plan_repo,
        }
    }

    pub async fn create_diet_plan(
        &self,
        trainer_id: Uuid,
        model: CreateDietPlanModel,
    ) -> UseCaseResult<DietPlanDto> {
        let insert = model
            .to_entity(trainer_id)
            .map_err(|err| TrainerCatalogError::Internal(err.into()))?;

        let plan = self.diet_plan_repo.insert(insert).await.map_err(|err| {
            error!(%trainer_id, db_error = ?err, "trainer_catalog: failed to create diet plan");
            TrainerCatalogError::Internal(err)
        })?;

        info!(%trainer_id, diet_plan_id = %plan.id, "trainer_catalog: diet plan created");
        Ok(plan.into())
    }

    pub async fn list_diet_plans(&self, trainer_id: Uuid) -> UseCaseResult<Vec<DietPlanDto>> {
        let plans = self
            .diet_plan_repo
            .list_by_trainer(trainer_id)
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "trainer_catalog: failed to list diet plans");
                TrainerCatalogError::Internal(err)
            })?;

        Ok(plans.into_iter().map(DietPlanDto::from).collect())
    }

    pub async fn update_diet_plan(
        &self,
        trainer_id: Uuid,
        diet_plan_id: Uuid,
        model: UpdateDietPlanModel,
    ) -> UseCaseResult<DietPlanDto> {
        let changes = model
            .to_entity()
            .map_err(|err| TrainerCatalogError::Internal(err.into()))?;

        let plan = self
            .diet_plan_repo
            .update_owned(diet_plan_id, trainer_id, changes)
            .await
            .map_err(|err| {
                error!(%trainer_id, %diet_plan_id, db_error = ?err, "trainer_catalog: failed to update diet plan");
                TrainerCatalogError::Internal(err)
            })?
            .ok_or(TrainerCatalogError::DietPlanNotFound)?;

        info!(%trainer_id, %diet_plan_id, is_active = plan.is_active, "trainer_catalog: diet plan updated");
        Ok(plan.into())
    }

    pub async fn delete_diet_plan(&self, trainer_id: Uuid, diet_plan_id: Uuid) -> UseCaseResult<()> {
        let deleted = self
            .diet_plan_repo
            .delete_owned(diet_plan_id, trainer_id)
            .await
            .map_err(|err| {
                error!(%trainer_id, %diet_plan_id, db_error = ?err, "trainer_catalog: failed to delete diet plan");
                TrainerCatalogError::Internal(err)
            })?;
        if !deleted {
            return Err(TrainerCatalogError::DietPlanNotFound);
        }

        info!(%trainer_id, %diet_plan_id, "trainer_catalog: diet plan deleted");
        Ok(())
    }

    pub async fn create_workout_plan(
        &self,
        trainer_id: Uuid,
        model: CreateWorkoutPlanModel,
    ) -> UseCaseResult<WorkoutPlanDto> {
        let insert = model
            .to_entity(trainer_id)
            .map_err(|err| TrainerCatalogError::Internal(err.into()))?;

        let plan = self.workout_plan_repo.insert(insert).await.map_err(|err| {
            error!(%trainer_id, db_error = ?err, "trainer_catalog: failed to create workout plan");
            TrainerCatalogError::Internal(err)
        })?;

        info!(%trainer_id, workout_plan_id = %plan.id, "trainer_catalog: workout plan created");
        Ok(plan.into())
    }

    pub async fn list_workout_plans(&self, trainer_id: Uuid) -> UseCaseResult<Vec<WorkoutPlanDto>> {
        let plans = self
            .workout_plan_repo
            .list_by_trainer(trainer_id)
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "trainer_catalog: failed to list workout plans");
                TrainerCatalogError::Internal(err)
            })?;

        Ok(plans.into_iter().map(WorkoutPlanDto::from).collect())
    }

    pub async fn update_workout_plan(
        &self,
        trainer_id: Uuid,
        workout_plan_id: Uuid,
        model: UpdateWorkoutPlanModel,
    ) -> UseCaseResult<WorkoutPlanDto> {
        let changes = model
            .to_entity()
            .map_err(|err| TrainerCatalogError::Internal(err.into()))?;

        let plan = self
            .workout_plan_repo
            .update_owned(workout_plan_id, trainer_id, changes)
            .await
            .map_err(|err| {
                error!(%trainer_id, %workout_plan_id, db_error = ?err, "trainer_catalog: failed to update workout plan");
                TrainerCatalogError::Internal(err)
            })?
            .ok_or(TrainerCatalogError::WorkoutPlanNotFound)?;

        info!(%trainer_id, %workout_plan_id, is_active = plan.is_active, "trainer_catalog: workout plan updated");
        Ok(plan.into())
    }

    pub async fn delete_workout_plan(
        &self,
        trainer_id: Uuid,
        workout_plan_id: Uuid,
    ) -> UseCaseResult<()> {
        let deleted = self
            .workout_plan_repo
            .delete_owned(workout_plan_id, trainer_id)
            .await
            .map_err(|err| {
                error!(%trainer_id, %workout_plan_id, db_error = ?err, "trainer_catalog: failed to delete workout plan");
                TrainerCatalogError::Internal(err)
            })?;
        if !deleted {
            return Err(TrainerCatalogError::WorkoutPlanNotFound);
        }

        info!(%trainer_id, %workout_plan_id, "trainer_catalog: workout plan deleted");
        Ok(())
    }
}
