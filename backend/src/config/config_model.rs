use super::stage::Stage;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub backend_server: BackendServer,
    pub database: Database,
    pub auth: Auth,
    pub stage: Stage,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct Auth {
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub allow_admin_registration: bool,
}
