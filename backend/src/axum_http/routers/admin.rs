use crate::{
    auth::AdminUser,
    axum_http::{
        error_responses::AppError,
        request_params::{PathId, QueryParams},
        validated_json::ValidatedJson,
    },
    usecases::admin::AdminUseCase,
};
use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, put},
};
use crates::{
    domain::{
        repositories::accounts::AccountRepository,
        value_objects::accounts::{ListAccountsQuery, UpdateAccountModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::accounts::AccountPostgres,
    },
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let account_repository = AccountPostgres::new(Arc::clone(&db_pool));
    let usecase = AdminUseCase::new(Arc::new(account_repository));

    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id/profile", get(user_profile))
        .route("/users/:id", put(update_user).delete(delete_user))
        .route("/trainers/pending", get(pending_trainers))
        .route("/trainers/:id/approve", put(approve_trainer))
        .route("/reports/statistics", get(statistics))
        .with_state(Arc::new(usecase))
}

pub async fn list_users<A>(
    State(usecase): State<Arc<AdminUseCase<A>>>,
    AdminUser(admin): AdminUser,
    QueryParams(query): QueryParams<ListAccountsQuery>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.user_id, "admin: list users request received");
    match usecase.list_users(query).await {
        Ok(page) => Json(page).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn user_profile<A>(
    State(usecase): State<Arc<AdminUseCase<A>>>,
    AdminUser(_admin): AdminUser,
    PathId(user_id): PathId,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
{
    match usecase.get_profile(user_id).await {
        Ok(user) => Json(user).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn update_user<A>(
    State(usecase): State<Arc<AdminUseCase<A>>>,
    AdminUser(admin): AdminUser,
    PathId(user_id): PathId,
    ValidatedJson(model): ValidatedJson<UpdateAccountModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.user_id, %user_id, "admin: update user request received");
    match usecase.update_user(user_id, model).await {
        Ok(user) => Json(json!({
            "message": "User updated successfully",
            "user": user,
        }))
        .into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn delete_user<A>(
    State(usecase): State<Arc<AdminUseCase<A>>>,
    AdminUser(admin): AdminUser,
    PathId(user_id): PathId,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.user_id, %user_id, "admin: delete user request received");
    match usecase.delete_user(admin.user_id, user_id).await {
        Ok(()) => Json(json!({ "message": "User deleted successfully" })).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn pending_trainers<A>(
    State(usecase): State<Arc<AdminUseCase<A>>>,
    AdminUser(_admin): AdminUser,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
{
    match usecase.pending_trainers().await {
        Ok(trainers) => Json(trainers).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn approve_trainer<A>(
    State(usecase): State<Arc<AdminUseCase<A>>>,
    AdminUser(admin): AdminUser,
    PathId(trainer_id): PathId,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.user_id, %trainer_id, "admin: approve trainer request received");
    match usecase.approve_trainer(admin.user_id, trainer_id).await {
        Ok(trainer) => Json(json!({
            "message": "Trainer approved successfully",
            "trainer": trainer,
        }))
        .into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn statistics<A>(
    State(usecase): State<Arc<AdminUseCase<A>>>,
    AdminUser(_admin): AdminUser,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
{
    match usecase.statistics().await {
        Ok(statistics) => Json(statistics).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
