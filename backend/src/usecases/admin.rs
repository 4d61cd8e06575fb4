use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use crates::domain::{
    repositories::accounts::AccountRepository,
    value_objects::{
        accounts::{AccountDto, ListAccountsQuery, PaginatedAccountsDto, UpdateAccountModel},
        statistics::AccountStatistics,
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::accounts::is_unique_violation;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("User not found")]
    UserNotFound,
    #[error("Trainer not found")]
    TrainerNotFound,
    #[error("Cannot delete your own account")]
    CannotDeleteSelf,
    #[error("User already exists with this email")]
    EmailTaken,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AdminError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdminError::UserNotFound | AdminError::TrainerNotFound => StatusCode::NOT_FOUND,
            AdminError::CannotDeleteSelf | AdminError::EmailTaken => StatusCode::BAD_REQUEST,
            AdminError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, AdminError>;

pub struct AdminUseCase<A>
where
    A: AccountRepository + Send + Sync + 'static,
{
    account_repo: Arc<A>,
}

impl<A> AdminUseCase<A>
where
    A: AccountRepository + Send + Sync + 'static,
{
    pub fn new(account_repo: Arc<A>) -> Self {
        Self { account_repo }
    }

    pub async fn list_users(&self, query: ListAccountsQuery) -> UseCaseResult<PaginatedAccountsDto> {
        let filter = query.to_filter();
        let (accounts, total) = self.account_repo.list(filter).await.map_err(|err| {
            error!(db_error = ?err, "admin: failed to list accounts");
            AdminError::Internal(err)
        })?;

        Ok(PaginatedAccountsDto::new(
            accounts.into_iter().map(AccountDto::from).collect(),
            total,
            query.page(),
            query.limit(),
        ))
    }

    pub async fn get_profile(&self, user_id: Uuid) -> UseCaseResult<AccountDto> {
        let account = self
            .account_repo
            .find_by_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "admin: failed to load account");
                AdminError::Internal(err)
            })?
            .ok_or(AdminError::UserNotFound)?;

        Ok(account.into())
    }

    pub async fn update_user(
        &self,
        user_id: Uuid,
        model: UpdateAccountModel,
    ) -> UseCaseResult<AccountDto> {
        if let Some(email) = model.normalized_email() {
            let holder = self
                .account_repo
                .find_by_email(email)
                .await
                .map_err(|err| {
                    error!(%user_id, db_error = ?err, "admin: failed to check email");
                    AdminError::Internal(err)
                })?;
            if holder.is_some_and(|holder| holder.id != user_id) {
                info!(%user_id, "admin: email already used by another account");
                return Err(AdminError::EmailTaken);
            }
        }

        let account = self
            .account_repo
            .update(user_id, model.to_entity())
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    return AdminError::EmailTaken;
                }
                error!(%user_id, db_error = ?err, "admin: failed to update account");
                AdminError::Internal(err)
            })?
            .ok_or(AdminError::UserNotFound)?;

        info!(%user_id, is_active = account.is_active, "admin: account updated");
        Ok(account.into())
    }

    pub async fn delete_user(&self, admin_id: Uuid, user_id: Uuid) -> UseCaseResult<()> {
        self.account_repo
            .find_by_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "admin: failed to load account");
                AdminError::Internal(err)
            })?
            .ok_or(AdminError::UserNotFound)?;

        if user_id == admin_id {
            warn!(%admin_id, "admin: refused to delete own account");
            return Err(AdminError::CannotDeleteSelf);
        }

        let deleted = self.account_repo.delete(user_id).await.map_err(|err| {
            error!(%user_id, db_error = ?err, "admin: failed to delete account");
            AdminError::Internal(err)
        })?;
        if !deleted {
            return Err(AdminError::UserNotFound);
        }

        info!(%admin_id, %user_id, "admin: account deleted");
        Ok(())
    }

    pub async fn pending_trainers(&self) -> UseCaseResult<Vec<AccountDto>> {
        let trainers = self
            .account_repo
            .list_pending_trainers()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "admin: failed to list pending trainers");
                AdminError::Internal(err)
            })?;

        Ok(trainers.into_iter().map(AccountDto::from).collect())
    }

    pub async fn approve_trainer(&self, admin_id: Uuid, trainer_id: Uuid) -> UseCaseResult<AccountDto> {
        let trainer = self
            .account_repo
            .approve_trainer(trainer_id, admin_id, Utc::now())
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "admin: failed to approve trainer");
                AdminError::Internal(err)
            })?
            .ok_or(AdminError::TrainerNotFound)?;

        info!(%admin_id, %trainer_id, "admin: trainer approved");
        Ok(trainer.into())
    }

    pub async fn statistics(&self) -> UseCaseResult<AccountStatistics> {
        let statistics = self.account_repo.statistics().await.map_err(|err| {
            error!(db_error = ?err, "admin: failed to compute statistics");
            AdminError::Internal(err)
        })?;

        Ok(statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::{
        entities::accounts::AccountEntity,
        repositories::accounts::MockAccountRepository,
        value_objects::enums::account_roles::AccountRole,
    };
    use mockall::predicate::eq;

    fn account(id: Uuid, role: AccountRole) -> AccountEntity {
        let now = Utc::now();
        AccountEntity {
            id,
            name: "Alex".to_string(),
            email: format!("{id}@example.com"),
            password_hash: "hash".to_string(),
            role: role.to_string(),
            phone: None,
            date_of_birth: None,
            specialization: None,
            experience: 0,
            membership_type: None,
            is_active: true,
            is_approved: role != AccountRole::Trainer,
            approved_at: None,
            approved_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn admin_cannot_delete_self() {
        let admin_id = Uuid::new_v4();
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_id().with(eq(admin_id)).returning(move |id| {
            Box::pin(async move { Ok(Some(account(id, AccountRole::Admin))) })
        });
        repo.expect_delete().never();

        let usecase = AdminUseCase::new(Arc::new(repo));
        let err = usecase.delete_user(admin_id, admin_id).await.unwrap_err();

        assert!(matches!(err, AdminError::CannotDeleteSelf));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn admin_can_delete_another_admin() {
        let admin_id = Uuid::new_v4();
        let other_admin_id = Uuid::new_v4();
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_id()
            .with(eq(other_admin_id))
            .returning(move |id| Box::pin(async move { Ok(Some(account(id, AccountRole::Admin))) }));
        repo.expect_delete()
            .with(eq(other_admin_id))
            .times(1)
            .returning(|_| Box::pin(async { Ok(true) }));

        let usecase = AdminUseCase::new(Arc::new(repo));

        assert!(usecase.delete_user(admin_id, other_admin_id).await.is_ok());
    }

    #[tokio::test]
    async fn deleting_unknown_user_is_not_found() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = AdminUseCase::new(Arc::new(repo));
        let err = usecase
            .delete_user(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn approving_unknown_trainer_is_not_found() {
        let mut repo = MockAccountRepository::new();
        repo.expect_approve_trainer()
            .returning(|_, _, _| Box::pin(async { Ok(None) }));

        let usecase = AdminUseCase::new(Arc::new(repo));
        let err = usecase
            .approve_trainer(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, AdminError::TrainerNotFound));
    }

    #[tokio::test]
    async fn approval_records_the_approving_admin() {
        let admin_id = Uuid::new_v4();
        let trainer_id = Uuid::new_v4();
        let mut repo = MockAccountRepository::new();
        repo.expect_approve_trainer()
            .withf(move |id, approver, _| *id == trainer_id && *approver == admin_id)
            .returning(|id, approver, at| {
                let mut trainer = account(id, AccountRole::Trainer);
                trainer.is_approved = true;
                trainer.approved_by = Some(approver);
                trainer.approved_at = Some(at);
                Box::pin(async move { Ok(Some(trainer)) })
            });

        let usecase = AdminUseCase::new(Arc::new(repo));
        let trainer = usecase.approve_trainer(admin_id, trainer_id).await.unwrap();

        assert!(trainer.is_approved);
        assert_eq!(trainer.approved_by, Some(admin_id));
    }

    #[tokio::test]
    async fn update_rejects_email_of_another_account() {
        let user_id = Uuid::new_v4();
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Box::pin(async { Ok(Some(account(Uuid::new_v4(), AccountRole::Member))) }));
        repo.expect_update().never();

        let usecase = AdminUseCase::new(Arc::new(repo));
        let err = usecase
            .update_user(
                user_id,
                UpdateAccountModel {
                    email: Some("taken@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AdminError::EmailTaken));
    }

    #[tokio::test]
    async fn list_users_reports_pages() {
        let mut repo = MockAccountRepository::new();
        repo.expect_list()
            .withf(|filter| filter.limit == 10 && filter.offset == 10)
            .returning(|_| {
                Box::pin(async {
                    Ok((vec![account(Uuid::new_v4(), AccountRole::Member)], 21))
                })
            });

        let usecase = AdminUseCase::new(Arc::new(repo));
        let page = usecase
            .list_users(ListAccountsQuery {
                page: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.users.len(), 1);
    }
}
