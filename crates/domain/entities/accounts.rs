use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    domain::value_objects::enums::account_roles::AccountRole,
    infra::db::postgres::schema::accounts,
};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = accounts)]
pub struct AccountEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String, // always stored lower-cased
    pub password_hash: String,
    pub role: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub specialization: Option<String>,
    pub experience: i32,
    pub membership_type: Option<String>,
    pub is_active: bool,
    pub is_approved: bool,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Why an account may not log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginDenial {
    Deactivated,
    PendingApproval,
}

impl AccountEntity {
    pub fn role(&self) -> Option<AccountRole> {
        AccountRole::from_str(&self.role)
    }

    pub fn is_trainer(&self) -> bool {
        self.role() == Some(AccountRole::Trainer)
    }

    /// A trainer is visible to members and bookable only while approved and active.
    pub fn is_public_trainer(&self) -> bool {
        self.is_trainer() && self.is_approved && self.is_active
    }

    pub fn login_denial(&self) -> Option<LoginDenial> {
        if !self.is_active {
            return Some(LoginDenial::Deactivated);
        }
        if self.is_trainer() && !self.is_approved {
            return Some(LoginDenial::PendingApproval);
        }
        None
    }

    pub fn can_login(&self) -> bool {
        self.login_denial().is_none()
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub struct InsertAccountEntity {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub specialization: Option<String>,
    pub experience: i32,
    pub membership_type: Option<String>,
    pub is_active: bool,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields supplied at registration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountProfile {
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub specialization: Option<String>,
    pub experience: Option<i32>,
    pub membership_type: Option<String>,
}

impl InsertAccountEntity {
    /// Builds a new account row with role-derived defaults: trainers start
    /// unapproved, every other role is approved on creation.
    pub fn for_role(
        role: AccountRole,
        name: String,
        email: &str,
        password_hash: String,
        profile: AccountProfile,
    ) -> Self {
        let now = Utc::now();
        Self {
            name: name.trim().to_string(),
            email: normalize_email(email),
            password_hash,
            role: role.to_string(),
            phone: profile.phone,
            date_of_birth: profile.date_of_birth,
            specialization: profile.specialization,
            experience: profile.experience.unwrap_or(0),
            membership_type: profile.membership_type,
            is_active: true,
            is_approved: role != AccountRole::Trainer,
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = accounts)]
pub struct UpdateAccountEntity {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub specialization: Option<String>,
    pub experience: Option<i32>,
    pub membership_type: Option<String>,
    pub is_active: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}
