use crate::{
    auth::TrainerUser,
    axum_http::{
        error_responses::AppError, request_params::PathId, validated_json::ValidatedJson,
    },
    usecases::{
        subscriptions::SubscriptionUseCase, trainer_catalog::TrainerCatalogUseCase,
        trainer_directory::TrainerDirectoryUseCase,
    },
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use crates::{
    domain::{
        repositories::{
            accounts::AccountRepository, diet_plans::DietPlanRepository,
            subscription_plans::SubscriptionPlanRepository,
            user_subscriptions::UserSubscriptionRepository,
            workout_plans::WorkoutPlanRepository,
        },
        value_objects::catalog::{
            CreateDietPlanModel, CreateWorkoutPlanModel, UpdateDietPlanModel,
            UpdateWorkoutPlanModel,
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            accounts::AccountPostgres, diet_plans::DietPlanPostgres,
            subscription_plans::SubscriptionPlanPostgres,
            user_subscriptions::UserSubscriptionPostgres, workout_plans::WorkoutPlanPostgres,
        },
    },
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let account_repository = Arc::new(AccountPostgres::new(Arc::clone(&db_pool)));
    let diet_plan_repository = Arc::new(DietPlanPostgres::new(Arc::clone(&db_pool)));
    let workout_plan_repository = Arc::new(WorkoutPlanPostgres::new(Arc::clone(&db_pool)));
    let subscription_plan_repository =
        Arc::new(SubscriptionPlanPostgres::new(Arc::clone(&db_pool)));
    let user_subscription_repository =
        Arc::new(UserSubscriptionPostgres::new(Arc::clone(&db_pool)));

    let catalog_usecase = TrainerCatalogUseCase::new(
        Arc::clone(&diet_plan_repository),
        Arc::clone(&workout_plan_repository),
    );
    let subscription_usecase = SubscriptionUseCase::new(
        Arc::clone(&account_repository),
        subscription_plan_repository,
        Arc::clone(&diet_plan_repository),
        Arc::clone(&workout_plan_repository),
        Arc::clone(&user_subscription_repository),
    );
    let directory_usecase = TrainerDirectoryUseCase::new(
        account_repository,
        diet_plan_repository,
        workout_plan_repository,
        user_subscription_repository,
    );

    let catalog = Router::new()
        .route("/diet-plans", get(list_diet_plans).post(create_diet_plan))
        .route("/diet-plans/:id", put(update_diet_plan).delete(delete_diet_plan))
        .route(
            "/workout-plans",
            get(list_workout_plans).post(create_workout_plan),
        )
        .route(
            "/workout-plans/:id",
            put(update_workout_plan).delete(delete_workout_plan),
        )
        .with_state(Arc::new(catalog_usecase));

    let subscribers = Router::new()
        .route("/subscribers", get(subscribers))
        .with_state(Arc::new(subscription_usecase));

    let profile = Router::new()
        .route("/profile/:id", get(public_profile))
        .with_state(Arc::new(directory_usecase));

    catalog.merge(subscribers).merge(profile)
}

pub async fn list_diet_plans<D, W>(
    State(usecase): State<Arc<TrainerCatalogUseCase<D, W>>>,
    TrainerUser(trainer): TrainerUser,
) -> impl IntoResponse
where
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
{
    match usecase.list_diet_plans(trainer.user_id).await {
        Ok(plans) => Json(plans).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn create_diet_plan<D, W>(
    State(usecase): State<Arc<TrainerCatalogUseCase<D, W>>>,
    TrainerUser(trainer): TrainerUser,
    ValidatedJson(model): ValidatedJson<CreateDietPlanModel>,
) -> impl IntoResponse
where
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
{
    info!(trainer_id = %trainer.user_id, "trainer: create diet plan request received");
    match usecase.create_diet_plan(trainer.user_id, model).await {
        Ok(plan) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Diet plan created successfully",
                "dietPlan": plan,
            })),
        )
            .into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn update_diet_plan<D, W>(
    State(usecase): State<Arc<TrainerCatalogUseCase<D, W>>>,
    TrainerUser(trainer): TrainerUser,
    PathId(diet_plan_id): PathId,
    ValidatedJson(model): ValidatedJson<UpdateDietPlanModel>,
) -> impl IntoResponse
where
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
{
    info!(trainer_id = %trainer.user_id, %diet_plan_id, "trainer: update diet plan request received");
    match usecase
        .update_diet_plan(trainer.user_id, diet_plan_id, model)
        .await
    {
        Ok(plan) => Json(json!({
            "message": "Diet plan updated successfully",
            "dietPlan": plan,
        }))
        .into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn delete_diet_plan<D, W>(
    State(usecase): State<Arc<TrainerCatalogUseCase<D, W>>>,
    TrainerUser(trainer): TrainerUser,
    PathId(diet_plan_id): PathId,
) -> impl IntoResponse
where
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
{
    info!(trainer_id = %trainer.user_id, %diet_plan_id, "trainer: delete diet plan request received");
    match usecase.delete_diet_plan(trainer.user_id, diet_plan_id).await {
        Ok(()) => Json(json!({ "message": "Diet plan deleted successfully" })).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn list_workout_plans<D, W>(
    State(usecase): State<Arc<TrainerCatalogUseCase<D, W>>>,
    TrainerUser(trainer): TrainerUser,
) -> impl IntoResponse
where
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
{
    match usecase.list_workout_plans(trainer.user_id).await {
        Ok(plans) => Json(plans).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn create_workout_plan<D, W>(
    State(usecase): State<Arc<TrainerCatalogUseCase<D, W>>>,
    TrainerUser(trainer): TrainerUser,
    ValidatedJson(model): ValidatedJson<CreateWorkoutPlanModel>,
) -> impl IntoResponse
where
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
{
    info!(trainer_id = %trainer.user_id, "trainer: create workout plan request received");
    match usecase.create_workout_plan(trainer.user_id, model).await {
        Ok(plan) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Workout plan created successfully",
                "workoutPlan": plan,
            })),
        )
            .into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn update_workout_plan<D, W>(
    State(usecase): State<Arc<TrainerCatalogUseCase<D, W>>>,
    TrainerUser(trainer): TrainerUser,
    PathId(workout_plan_id): PathId,
    ValidatedJson(model): ValidatedJson<UpdateWorkoutPlanModel>,
) -> impl IntoResponse
where
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
{
    info!(trainer_id = %trainer.user_id, %workout_plan_id, "trainer: update workout plan request received");
    match usecase
        .update_workout_plan(trainer.user_id, workout_plan_id, model)
        .await
    {
        Ok(plan) => Json(json!({
            "message": "Workout plan updated successfully",
            "workoutPlan": plan,
        }))
        .into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn delete_workout_plan<D, W>(
    State(usecase): State<Arc<TrainerCatalogUseCase<D, W>>>,
    TrainerUser(trainer): TrainerUser,
    PathId(workout_plan_id): PathId,
) -> impl IntoResponse
where
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
{
    info!(trainer_id = %trainer.user_id, %workout_plan_id, "trainer: delete workout plan request received");
    match usecase
        .delete_workout_plan(trainer.user_id, workout_plan_id)
        .await
    {
        Ok(()) => Json(json!({ "message": "Workout plan deleted successfully" })).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn subscribers<A, P, D, W, U>(
    State(usecase): State<Arc<SubscriptionUseCase<A, P, D, W, U>>>,
    TrainerUser(trainer): TrainerUser,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    P: SubscriptionPlanRepository + Send + Sync + 'static,
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
    U: UserSubscriptionRepository + Send + Sync + 'static,
{
    info!(trainer_id = %trainer.user_id, "trainer: subscribers request received");
    match usecase.trainer_subscribers(trainer.user_id).await {
        Ok(page) => Json(page).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn public_profile<A, D, W, U>(
    State(usecase): State<Arc<TrainerDirectoryUseCase<A, D, W, U>>>,
    PathId(trainer_id): PathId,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
    U: UserSubscriptionRepository + Send + Sync + 'static,
{
    match usecase.trainer_profile(trainer_id).await {
        Ok(profile) => Json(profile).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
