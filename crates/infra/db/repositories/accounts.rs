use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{
    RunQueryDsl, delete, dsl::count_star, insert_into, pg::Pg, prelude::*, sql_query,
    sql_types::{BigInt, Int4},
    update,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::accounts},
};
use domain::{
    entities::accounts::{AccountEntity, InsertAccountEntity, UpdateAccountEntity},
    repositories::accounts::AccountRepository,
    value_objects::{
        accounts::{ListAccountsFilter, TrainerSearchFilter},
        enums::account_roles::AccountRole,
        statistics::{AccountStatistics, MonthlyRegistrations},
    },
};

#[derive(Debug, QueryableByName)]
struct MonthlyRegistrationsRow {
    #[diesel(sql_type = Int4)]
    year: i32,
    #[diesel(sql_type = Int4)]
    month: i32,
    #[diesel(sql_type = BigInt)]
    count: i64,
}

const MONTHLY_REGISTRATIONS_SQL: &str = "\
    SELECT EXTRACT(YEAR FROM created_at)::int4 AS year, \
           EXTRACT(MONTH FROM created_at)::int4 AS month, \
           COUNT(*) AS count \
    FROM accounts \
    GROUP BY 1, 2 \
    ORDER BY 1 DESC, 2 DESC \
    LIMIT 12";

pub struct AccountPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AccountPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn filtered_accounts(filter: &ListAccountsFilter) -> accounts::BoxedQuery<'static, Pg> {
    let mut query = accounts::table.into_boxed();

    if let Some(role) = filter.role {
        query = query.filter(accounts::role.eq(role.as_str()));
    }

    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        query = query.filter(
            accounts::name
                .ilike(pattern.clone())
                .or(accounts::email.ilike(pattern)),
        );
    }

    query
}

#[async_trait]
impl AccountRepository for AccountPostgres {
    async fn find_by_id(&self, account_id: Uuid) -> Result<Option<AccountEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = accounts::table
            .filter(accounts::id.eq(account_id))
            .select(AccountEntity::as_select())
            .first::<AccountEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_email(&self, email: String) -> Result<Option<AccountEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = accounts::table
            .filter(accounts::email.eq(email))
            .select(AccountEntity::as_select())
            .first::<AccountEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_ids(&self, account_ids: Vec<Uuid>) -> Result<Vec<AccountEntity>> {
        if account_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = accounts::table
            .filter(accounts::id.eq_any(account_ids))
            .select(AccountEntity::as_select())
            .load::<AccountEntity>(&mut conn)?;

        Ok(results)
    }

    async fn insert(&self, insert_account_entity: InsertAccountEntity) -> Result<AccountEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(accounts::table)
            .values(&insert_account_entity)
            .returning(AccountEntity::as_returning())
            .get_result::<AccountEntity>(&mut conn)?;

        Ok(result)
    }

    async fn update(
        &self,
        account_id: Uuid,
        update_account_entity: UpdateAccountEntity,
    ) -> Result<Option<AccountEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(accounts::table)
            .filter(accounts::id.eq(account_id))
            .set(&update_account_entity)
            .returning(AccountEntity::as_returning())
            .get_result::<AccountEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn delete(&self, account_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(accounts::table)
            .filter(accounts::id.eq(account_id))
            .execute(&mut conn)?;

        Ok(deleted > 0)
    }

    async fn list(&self, filter: ListAccountsFilter) -> Result<(Vec<AccountEntity>, i64)> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = filtered_accounts(&filter)
            .count()
            .get_result::<i64>(&mut conn)?;

        let results = filtered_accounts(&filter)
            .order((accounts::created_at.desc(), accounts::id.desc()))
            .limit(filter.limit)
            .offset(filter.offset)
            .load::<AccountEntity>(&mut conn)?;

        Ok((results, total))
    }

    async fn list_pending_trainers(&self) -> Result<Vec<AccountEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = accounts::table
            .filter(accounts::role.eq(AccountRole::Trainer.as_str()))
            .filter(accounts::is_approved.eq(false))
            .order(accounts::created_at.desc())
            .select(AccountEntity::as_select())
            .load::<AccountEntity>(&mut conn)?;

        Ok(results)
    }

    async fn approve_trainer(
        &self,
        trainer_id: Uuid,
        approved_by: Uuid,
        approved_at: DateTime<Utc>,
    ) -> Result<Option<AccountEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = conn.transaction::<Option<AccountEntity>, diesel::result::Error, _>(|tx| {
            let trainer = accounts::table
                .filter(accounts::id.eq(trainer_id))
                .filter(accounts::role.eq(AccountRole::Trainer.as_str()))
                .select(AccountEntity::as_select())
                .for_update()
                .first::<AccountEntity>(tx)
                .optional()?;

            let Some(trainer) = trainer else {
                return Ok(None);
            };

            if trainer.is_approved {
                return Ok(Some(trainer));
            }

            let approved = update(accounts::table)
                .filter(accounts::id.eq(trainer_id))
                .set((
                    accounts::is_approved.eq(true),
                    accounts::approved_at.eq(Some(approved_at)),
                    accounts::approved_by.eq(Some(approved_by)),
                    accounts::updated_at.eq(approved_at),
                ))
                .returning(AccountEntity::as_returning())
                .get_result::<AccountEntity>(tx)?;

            Ok(Some(approved))
        })?;

        Ok(result)
    }

    async fn list_public_trainers(
        &self,
        filter: TrainerSearchFilter,
    ) -> Result<Vec<AccountEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = accounts::table
            .filter(accounts::role.eq(AccountRole::Trainer.as_str()))
            .filter(accounts::is_approved.eq(true))
            .filter(accounts::is_active.eq(true))
            .into_boxed();

        if let Some(search) = &filter.search {
            let pattern = like_pattern(search);
            query = query.filter(
                accounts::name
                    .ilike(pattern.clone())
                    .or(accounts::specialization.ilike(pattern)),
            );
        }

        if let Some(specialization) = &filter.specialization {
            query = query.filter(accounts::specialization.ilike(like_pattern(specialization)));
        }

        let results = query
            .order(accounts::created_at.desc())
            .load::<AccountEntity>(&mut conn)?;

        Ok(results)
    }

    async fn statistics(&self) -> Result<AccountStatistics> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total_users = accounts::table
            .filter(accounts::role.eq(AccountRole::Member.as_str()))
            .select(count_star())
            .get_result::<i64>(&mut conn)?;

        let total_trainers = accounts::table
            .filter(accounts::role.eq(AccountRole::Trainer.as_str()))
            .select(count_star())
            .get_result::<i64>(&mut conn)?;

        let approved_trainers = accounts::table
            .filter(accounts::role.eq(AccountRole::Trainer.as_str()))
            .filter(accounts::is_approved.eq(true))
            .select(count_star())
            .get_result::<i64>(&mut conn)?;

        let active_users = accounts::table
            .filter(accounts::is_active.eq(true))
            .select(count_star())
            .get_result::<i64>(&mut conn)?;

        let inactive_users = accounts::table
            .filter(accounts::is_active.eq(false))
            .select(count_star())
            .get_result::<i64>(&mut conn)?;

        let monthly_stats = sql_query(MONTHLY_REGISTRATIONS_SQL)
            .load::<MonthlyRegistrationsRow>(&mut conn)?
            .into_iter()
            .map(|row| MonthlyRegistrations {
                year: row.year,
                month: row.month,
                count: row.count,
            })
            .collect();

        Ok(AccountStatistics {
            total_users,
            total_trainers,
            approved_trainers,
            pending_trainers: total_trainers - approved_trainers,
            active_users,
            inactive_users,
            monthly_stats,
        })
    }
}
