use crate::{
    auth::JwtKeys,
    axum_http::{error_responses::AppError, validated_json::ValidatedJson},
    config::config_model::DotEnvyConfig,
    usecases::accounts::AccountUseCase,
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use crates::{
    domain::{
        repositories::accounts::AccountRepository,
        value_objects::accounts::{LoginModel, RegisterAccountModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::accounts::AccountPostgres,
    },
};
use std::sync::Arc;
use tracing::info;

pub fn routes(
    db_pool: Arc<PgPoolSquad>,
    config: Arc<DotEnvyConfig>,
    jwt_keys: Arc<JwtKeys>,
) -> Router {
    let account_repository = AccountPostgres::new(Arc::clone(&db_pool));
    let usecase = AccountUseCase::new(
        Arc::new(account_repository),
        jwt_keys,
        config.auth.allow_admin_registration,
    );

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(Arc::new(usecase))
}

pub async fn register<A>(
    State(usecase): State<Arc<AccountUseCase<A>>>,
    ValidatedJson(model): ValidatedJson<RegisterAccountModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
{
    info!("auth: register request received");
    match usecase.register(model).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn login<A>(
    State(usecase): State<Arc<AccountUseCase<A>>>,
    ValidatedJson(model): ValidatedJson<LoginModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
{
    info!("auth: login request received");
    match usecase.login(model).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
