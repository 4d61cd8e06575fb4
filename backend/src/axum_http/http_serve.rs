use crate::{
    auth::{Authenticator, JwtKeys},
    axum_http::{default_routers, routers},
    config::config_model::DotEnvyConfig,
};
use anyhow::Result;
use axum::{
    Extension, Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use crates::infra::db::{
    postgres::postgres_connection::PgPoolSquad, repositories::accounts::AccountPostgres,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

pub fn api_router(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Router {
    let jwt_keys = Arc::new(JwtKeys::new(
        &config.auth.jwt_secret,
        config.auth.jwt_ttl_hours,
    ));
    let authenticator = Authenticator::new(
        Arc::clone(&jwt_keys),
        Arc::new(AccountPostgres::new(Arc::clone(&db_pool))),
    );

    let admin = routers::admin::routes(Arc::clone(&db_pool)).nest(
        "/subscription-plans",
        routers::subscription_plans::routes(Arc::clone(&db_pool)),
    );

    Router::new()
        .nest(
            "/api/auth",
            routers::auth::routes(Arc::clone(&db_pool), Arc::clone(&config), jwt_keys),
        )
        .nest("/api/admin", admin)
        .nest("/api/trainer", routers::trainer::routes(Arc::clone(&db_pool)))
        .nest("/api/user", routers::user::routes(Arc::clone(&db_pool)))
        .route("/api/health-check", get(default_routers::health_check))
        .fallback(default_routers::not_found)
        .layer(Extension(authenticator))
}

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Result<()> {
    let app = api_router(Arc::clone(&config), db_pool)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.backend_server.timeout,
        )))
        .layer(RequestBodyLimitLayer::new(
            (config.backend_server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.backend_server.port));
    let listener = TcpListener::bind(addr).await?;

    info!(stage = %config.stage, "Server is running on port {}", config.backend_server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = ?err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = ?err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
