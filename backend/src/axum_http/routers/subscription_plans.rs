use crate::{
    auth::AdminUser,
    axum_http::{
        error_responses::AppError, request_params::PathId, validated_json::ValidatedJson,
    },
    usecases::subscription_plans::SubscriptionPlanUseCase,
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
            subscription_plans::SubscriptionPlanRepository,
            user_subscriptions::UserSubscriptionRepository,
        },
        value_objects::subscription_plans::{
            CreateSubscriptionPlanModel, UpdateSubscriptionPlanModel,
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            subscription_plans::SubscriptionPlanPostgres,
            user_subscriptions::UserSubscriptionPostgres,
        },
    },
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscription_plan_repository = SubscriptionPlanPostgres::new(Arc::clone(&db_pool));
    let user_subscription_repository = UserSubscriptionPostgres::new(Arc::clone(&db_pool));
    let usecase = SubscriptionPlanUseCase::new(
        Arc::new(subscription_plan_repository),
        Arc::new(user_subscription_repository),
    );

    Router::new()
        .route("/", get(list_subscription_plans).post(create_subscription_plan))
        .route(
            "/:id",
            put(update_subscription_plan).delete(delete_subscription_plan),
        )
        .with_state(Arc::new(usecase))
}

pub async fn list_subscription_plans<P, U>(
    State(usecase): State<Arc<SubscriptionPlanUseCase<P, U>>>,
    AdminUser(_admin): AdminUser,
) -> impl IntoResponse
where
    P: SubscriptionPlanRepository + Send + Sync + 'static,
    U: UserSubscriptionRepository + Send + Sync + 'static,
{
    match usecase.list_all().await {
        Ok(plans) => Json(plans).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn create_subscription_plan<P, U>(
    State(usecase): State<Arc<SubscriptionPlanUseCase<P, U>>>,
    AdminUser(admin): AdminUser,
    ValidatedJson(model): ValidatedJson<CreateSubscriptionPlanModel>,
) -> impl IntoResponse
where
    P: SubscriptionPlanRepository + Send + Sync + 'static,
    U: UserSubscriptionRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.user_id, "subscription_plans: create request received");
    match usecase.create(admin.user_id, model).await {
        Ok(plan) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Subscription plan created successfully",
                "subscriptionPlan": plan,
            })),
        )
            .into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn update_subscription_plan<P, U>(
    State(usecase): State<Arc<SubscriptionPlanUseCase<P, U>>>,
    AdminUser(admin): AdminUser,
    PathId(plan_id): PathId,
    ValidatedJson(model): ValidatedJson<UpdateSubscriptionPlanModel>,
) -> impl IntoResponse
where
    P: SubscriptionPlanRepository + Send + Sync + 'static,
    U: UserSubscriptionRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.user_id, %plan_id, "subscription_plans: update request received");
    match usecase.update(plan_id, model).await {
        Ok(plan) => Json(json!({
            "message": "Subscription plan updated successfully",
            "subscriptionPlan": plan,
        }))
        .into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn delete_subscription_plan<P, U>(
    State(usecase): State<Arc<SubscriptionPlanUseCase<P, U>>>,
    AdminUser(admin): AdminUser,
    PathId(plan_id): PathId,
) -> impl IntoResponse
where
    P: SubscriptionPlanRepository + Send + Sync + 'static,
    U: UserSubscriptionRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.user_id, %plan_id, "subscription_plans: delete request received");
    match usecase.delete(plan_id).await {
        Ok(()) => {
            Json(json!({ "message": "Subscription plan deleted successfully" })).into_response()
        }
        Err(err) => AppError::from(err).into_response(),
    }
}
