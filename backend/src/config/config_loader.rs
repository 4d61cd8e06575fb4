use anyhow::{Context, Result};

use super::{
    config_model::{Auth, BackendServer, Database, DotEnvyConfig},
    stage::Stage,
};

const DEFAULT_JWT_TTL_HOURS: i64 = 24;
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = BackendServer {
        port: required("SERVER_PORT_BACKEND")?
            .parse()
            .context("SERVER_PORT_BACKEND is invalid")?,
        body_limit: required("SERVER_BODY_LIMIT")?
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: required("SERVER_TIMEOUT")?
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let database = Database {
        url: required("DATABASE_URL")?,
        max_connections: match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .context("DATABASE_MAX_CONNECTIONS is invalid")?,
            Err(_) => DEFAULT_DATABASE_MAX_CONNECTIONS,
        },
    };

    let auth = Auth {
        jwt_secret: required("JWT_SECRET")?,
        jwt_ttl_hours: match std::env::var("JWT_TTL_HOURS") {
            Ok(raw) => raw.parse().context("JWT_TTL_HOURS is invalid")?,
            Err(_) => DEFAULT_JWT_TTL_HOURS,
        },
        allow_admin_registration: std::env::var("ALLOW_ADMIN_REGISTRATION")
            .map(|raw| parse_flag(&raw))
            .unwrap_or(false),
    };

    Ok(DotEnvyConfig {
        backend_server,
        database,
        auth,
        stage: get_stage(),
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or("".to_string());
    Stage::try_from(&stage_str).unwrap_or_default()
}

fn required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("{key} is invalid"))
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
