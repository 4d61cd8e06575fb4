pub mod password;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{Duration, Utc};
use crates::domain::{
    repositories::accounts::AccountRepository,
    value_objects::enums::account_roles::AccountRole,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

use crate::axum_http::error_responses::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 signing keys and token lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, account_id: Uuid, role: AccountRole) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("failed to sign access token")
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(token, &self.decoding, &validation)
            .context("JWT validation failed")?;

        Ok(token_data.claims)
    }
}

/// Caller resolved from a bearer token against the live account record.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: AccountRole,
    pub name: String,
    pub email: String,
}

/// Resolves bearer tokens. Installed as a request extension by the HTTP layer.
#[derive(Clone)]
pub struct Authenticator {
    keys: Arc<JwtKeys>,
    accounts: Arc<dyn AccountRepository + Send + Sync>,
}

impl Authenticator {
    pub fn new(keys: Arc<JwtKeys>, accounts: Arc<dyn AccountRepository + Send + Sync>) -> Self {
        Self { keys, accounts }
    }

    pub async fn authenticate(&self, token: &str) -> Result<AuthUser, AppError> {
        let claims = self.keys.verify(token).map_err(|err| {
            warn!(error = %err, "auth: rejected bearer token");
            AppError::Unauthorized("Invalid token".to_string())
        })?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid user ID in token".to_string()))?;

        let account = self
            .accounts
            .find_by_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "auth: failed to load account");
                AppError::Internal(err)
            })?
            .ok_or_else(|| AppError::Unauthorized("Invalid token".to_string()))?;

        if !account.is_active {
            return Err(AppError::Unauthorized("Account is deactivated".to_string()));
        }

        let role = account
            .role()
            .ok_or_else(|| AppError::Unauthorized("Invalid token".to_string()))?;

        Ok(AuthUser {
            user_id: account.id,
            role,
            name: account.name,
            email: account.email,
        })
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Access denied. No token provided.".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid Authorization header".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization header format".to_string()))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let authenticator = parts
            .extensions
            .get::<Authenticator>()
            .cloned()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("authenticator is not installed")))?;

        let token = bearer_token(parts)?;
        authenticator.authenticate(token).await
    }
}

fn require_role(user: AuthUser, role: AccountRole, denied: &str) -> Result<AuthUser, AppError> {
    if user.role != role {
        warn!(user_id = %user.user_id, role = %user.role, required = %role, "auth: role check failed");
        return Err(AppError::Forbidden(denied.to_string()));
    }
    Ok(user)
}

#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require_role(user, AccountRole::Admin, "Access denied. Admins only.").map(AdminUser)
    }
}

#[derive(Debug, Clone)]
pub struct TrainerUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for TrainerUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require_role(user, AccountRole::Trainer, "Access denied. Trainers only.").map(TrainerUser)
    }
}

#[derive(Debug, Clone)]
pub struct MemberUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for MemberUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require_role(user, AccountRole::Member, "Access denied. Users only.").map(MemberUser)
    }
}
