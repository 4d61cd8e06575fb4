use std::sync::Arc;

use anyhow::anyhow;
use axum::http::StatusCode;
use crates::domain::{
    entities::accounts::{AccountEntity, InsertAccountEntity, LoginDenial, normalize_email},
    repositories::accounts::AccountRepository,
    value_objects::{
        accounts::{AccountSummaryDto, AuthResponseDto, LoginModel, RegisterAccountModel},
        enums::account_roles::AccountRole,
    },
};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::auth::{
    JwtKeys,
    password::{hash_password, verify_password},
};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("User already exists with this email")]
    UserAlreadyExists,
    #[error("Admin registration is disabled")]
    AdminRegistrationDisabled,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account is deactivated")]
    Deactivated,
    #[error("Your account is pending admin approval")]
    PendingApproval,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AccountError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::UserAlreadyExists => StatusCode::BAD_REQUEST,
            AccountError::AdminRegistrationDisabled => StatusCode::FORBIDDEN,
            AccountError::InvalidCredentials
            | AccountError::Deactivated
            | AccountError::PendingApproval => StatusCode::UNAUTHORIZED,
            AccountError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LoginDenial> for AccountError {
    fn from(denial: LoginDenial) -> Self {
        match denial {
            LoginDenial::Deactivated => AccountError::Deactivated,
            LoginDenial::PendingApproval => AccountError::PendingApproval,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, AccountError>;

/// True when the error chain ends in a Postgres unique violation.
pub(crate) fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<DieselError>(),
        Some(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _))
    )
}

pub struct AccountUseCase<A>
where
    A: AccountRepository + Send + Sync + 'static,
{
    account_repo: Arc<A>,
    jwt_keys: Arc<JwtKeys>,
    allow_admin_registration: bool,
}

impl<A> AccountUseCase<A>
where
    A: AccountRepository + Send + Sync + 'static,
{
    pub fn new(account_repo: Arc<A>, jwt_keys: Arc<JwtKeys>, allow_admin_registration: bool) -> Self {
        Self {
            account_repo,
            jwt_keys,
            allow_admin_registration,
        }
    }

    pub async fn register(&self, model: RegisterAccountModel) -> UseCaseResult<AuthResponseDto> {
        let role = model.role();
        let email = normalize_email(&model.email);
        info!(%role, %email, "accounts: registration requested");

        if role == AccountRole::Admin && !self.allow_admin_registration {
            warn!(%email, "accounts: admin self-registration refused");
            return Err(AccountError::AdminRegistrationDisabled);
        }

        let existing = self
            .account_repo
            .find_by_email(email.clone())
            .await
            .map_err(|err| {
                error!(%email, db_error = ?err, "accounts: failed to look up email");
                AccountError::Internal(err)
            })?;
        if existing.is_some() {
            info!(%email, "accounts: email already registered");
            return Err(AccountError::UserAlreadyExists);
        }

        let password = model.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|err| anyhow!("password hashing task failed: {err}"))??;

        let insert = InsertAccountEntity::for_role(
            role,
            model.name.clone(),
            &email,
            password_hash,
            model.profile(),
        );

        let account = self.account_repo.insert(insert).await.map_err(|err| {
            if is_unique_violation(&err) {
                info!(%email, "accounts: email registered concurrently");
                return AccountError::UserAlreadyExists;
            }
            error!(%email, db_error = ?err, "accounts: failed to insert account");
            AccountError::Internal(err)
        })?;

        info!(
            user_id = %account.id,
            %role,
            is_approved = account.is_approved,
            "accounts: account registered"
        );

        if !account.can_login() {
            return Ok(AuthResponseDto {
                message: "Registration successful. Your account is pending admin approval."
                    .to_string(),
                token: None,
                user: AccountSummaryDto::from(&account),
            });
        }

        let token = self.issue_token(&account)?;
        Ok(AuthResponseDto {
            message: "User registered successfully".to_string(),
            token: Some(token),
            user: AccountSummaryDto::from(&account),
        })
    }

    pub async fn login(&self, model: LoginModel) -> UseCaseResult<AuthResponseDto> {
        let email = normalize_email(&model.email);

        let account = self
            .account_repo
            .find_by_email(email.clone())
            .await
            .map_err(|err| {
                error!(%email, db_error = ?err, "accounts: failed to look up email");
                AccountError::Internal(err)
            })?
            .ok_or_else(|| {
                info!(%email, "accounts: login for unknown email");
                AccountError::InvalidCredentials
            })?;

        let password = model.password;
        let password_hash = account.password_hash.clone();
        let verified =
            tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
                .await
                .map_err(|err| anyhow!("password verification task failed: {err}"))?;
        if !verified {
            info!(user_id = %account.id, "accounts: wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        if let Some(denial) = account.login_denial() {
            info!(user_id = %account.id, ?denial, "accounts: login denied");
            return Err(denial.into());
        }

        let token = self.issue_token(&account)?;
        info!(user_id = %account.id, "accounts: login succeeded");

        Ok(AuthResponseDto {
            message: "Login successful".to_string(),
            token: Some(token),
            user: AccountSummaryDto::from(&account),
        })
    }

    fn issue_token(&self, account: &AccountEntity) -> UseCaseResult<String> {
        let role = account
            .role()
            .ok_or_else(|| anyhow!("account {} has unknown role {}", account.id, account.role))?;
        Ok(self.jwt_keys.issue(account.id, role)?)
    }
}
