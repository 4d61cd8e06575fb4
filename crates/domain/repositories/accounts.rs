use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::accounts::{AccountEntity, InsertAccountEntity, UpdateAccountEntity},
    value_objects::{
        accounts::{ListAccountsFilter, TrainerSearchFilter},
        statistics::AccountStatistics,
    },
};

#[async_trait]
#[automock]
pub trait AccountRepository {
    async fn find_by_id(&self, account_id: Uuid) -> Result<Option<AccountEntity>>;

    async fn find_by_email(&self, email: String) -> Result<Option<AccountEntity>>;

    async fn find_by_ids(&self, account_ids: Vec<Uuid>) -> Result<Vec<AccountEntity>>;

    async fn insert(&self, insert_account_entity: InsertAccountEntity) -> Result<AccountEntity>;

    async fn update(
        &self,
        account_id: Uuid,
        update_account_entity: UpdateAccountEntity,
    ) -> Result<Option<AccountEntity>>;

    /// Returns false when nothing was deleted.
    async fn delete(&self, account_id: Uuid) -> Result<bool>;

    /// One page of accounts, newest first, plus the total matching count.
    async fn list(&self, filter: ListAccountsFilter) -> Result<(Vec<AccountEntity>, i64)>;

    async fn list_pending_trainers(&self) -> Result<Vec<AccountEntity>>;

    /// Marks a pending trainer approved. An already approved trainer is returned
    /// untouched. Returns None when no trainer has that id.
    async fn approve_trainer(
        &self,
        trainer_id: Uuid,
        approved_by: Uuid,
        approved_at: DateTime<Utc>,
    ) -> Result<Option<AccountEntity>>;

    /// Approved and active trainers matching the filter.
    async fn list_public_trainers(&self, filter: TrainerSearchFilter)
    -> Result<Vec<AccountEntity>>;

    async fn statistics(&self) -> Result<AccountStatistics>;
}
