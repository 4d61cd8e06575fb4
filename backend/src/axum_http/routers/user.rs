use crate::{
    auth::MemberUser,
    axum_http::{
        error_responses::AppError, request_params::QueryParams, validated_json::ValidatedJson,
    },
    usecases::{
        subscription_plans::SubscriptionPlanUseCase, subscriptions::SubscriptionUseCase,
        trainer_directory::TrainerDirectoryUseCase,
    },
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use crates::{
    domain::{
        repositories::{
            accounts::AccountRepository, diet_plans::DietPlanRepository,
            subscription_plans::SubscriptionPlanRepository,
            user_subscriptions::UserSubscriptionRepository,
            workout_plans::WorkoutPlanRepository,
        },
        value_objects::{accounts::TrainerSearchQuery, user_subscriptions::SubscribeModel},
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

    let directory_usecase = TrainerDirectoryUseCase::new(
        Arc::clone(&account_repository),
        Arc::clone(&diet_plan_repository),
        Arc::clone(&workout_plan_repository),
        Arc::clone(&user_subscription_repository),
    );
    let subscription_plan_usecase = SubscriptionPlanUseCase::new(
        Arc::clone(&subscription_plan_repository),
        Arc::clone(&user_subscription_repository),
    );
    let subscription_usecase = SubscriptionUseCase::new(
        account_repository,
        subscription_plan_repository,
        diet_plan_repository,
        workout_plan_repository,
        user_subscription_repository,
    );

    let trainers = Router::new()
        .route("/trainers", get(browse_trainers))
        .with_state(Arc::new(directory_usecase));

    let tiers = Router::new()
        .route("/subscription-plans", get(active_subscription_plans))
        .with_state(Arc::new(subscription_plan_usecase));

    let subscriptions = Router::new()
        .route("/subscribe", post(subscribe))
        .route("/my-subscriptions", get(my_subscriptions))
        .with_state(Arc::new(subscription_usecase));

    trainers.merge(tiers).merge(subscriptions)
}

pub async fn browse_trainers<A, D, W, U>(
    State(usecase): State<Arc<TrainerDirectoryUseCase<A, D, W, U>>>,
    MemberUser(member): MemberUser,
    QueryParams(query): QueryParams<TrainerSearchQuery>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
    U: UserSubscriptionRepository + Send + Sync + 'static,
{
    info!(member_id = %member.user_id, "user: browse trainers request received");
    match usecase.browse_trainers(query).await {
        Ok(trainers) => Json(trainers).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn active_subscription_plans<P, U>(
    State(usecase): State<Arc<SubscriptionPlanUseCase<P, U>>>,
    MemberUser(_member): MemberUser,
) -> impl IntoResponse
where
    P: SubscriptionPlanRepository + Send + Sync + 'static,
    U: UserSubscriptionRepository + Send + Sync + 'static,
{
    match usecase.list_active().await {
        Ok(plans) => Json(plans).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn subscribe<A, P, D, W, U>(
    State(usecase): State<Arc<SubscriptionUseCase<A, P, D, W, U>>>,
    MemberUser(member): MemberUser,
    ValidatedJson(model): ValidatedJson<SubscribeModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    P: SubscriptionPlanRepository + Send + Sync + 'static,
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
    U: UserSubscriptionRepository + Send + Sync + 'static,
{
    match usecase.subscribe(member.user_id, model).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn my_subscriptions<A, P, D, W, U>(
    State(usecase): State<Arc<SubscriptionUseCase<A, P, D, W, U>>>,
    MemberUser(member): MemberUser,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    P: SubscriptionPlanRepository + Send + Sync + 'static,
    D: DietPlanRepository + Send + Sync + 'static,
    W: WorkoutPlanRepository + Send + Sync + 'static,
    U: UserSubscriptionRepository + Send + Sync + 'static,
{
    info!(member_id = %member.user_id, "user: my subscriptions request received");
    match usecase.my_subscriptions(member.user_id).await {
        Ok(subscriptions) => Json(subscriptions).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
