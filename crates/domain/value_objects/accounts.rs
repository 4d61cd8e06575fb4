use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    entities::accounts::{AccountEntity, AccountProfile, UpdateAccountEntity, normalize_email},
    value_objects::{enums::account_roles::AccountRole, validation::not_blank},
};

pub const DEFAULT_PAGE_LIMIT: i64 = 10;
pub const MAX_PAGE_LIMIT: i64 = 100;
/// Highest page whose offset still fits in an `i64` at the largest limit.
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_LIMIT;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterAccountModel {
    #[validate(length(max = 100, message = "Name is too long"), custom(function = "not_blank"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default, alias = "userType")]
    pub role: Option<AccountRole>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub specialization: Option<String>,
    #[validate(range(min = 0, message = "Experience cannot be negative"))]
    pub experience: Option<i32>,
    pub membership_type: Option<String>,
}

impl RegisterAccountModel {
    pub fn role(&self) -> AccountRole {
        self.role.unwrap_or(AccountRole::Member)
    }

    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            phone: self.phone.clone(),
            date_of_birth: self.date_of_birth,
            specialization: self.specialization.clone(),
            experience: self.experience,
            membership_type: self.membership_type.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginModel {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Account as shown to admins and to the account owner. Never carries the password hash.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
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

impl From<AccountEntity> for AccountDto {
    fn from(value: AccountEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            role: value.role,
            phone: value.phone,
            date_of_birth: value.date_of_birth,
            specialization: value.specialization,
            experience: value.experience,
            membership_type: value.membership_type,
            is_active: value.is_active,
            is_approved: value.is_approved,
            approved_at: value.approved_at,
            approved_by: value.approved_by,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummaryDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_approved: bool,
}

impl From<&AccountEntity> for AccountSummaryDto {
    fn from(value: &AccountEntity) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            email: value.email.clone(),
            role: value.role.clone(),
            is_approved: value.is_approved,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseDto {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub user: AccountSummaryDto,
}

/// Public trainer profile: what members and anonymous visitors may see.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainerPublicDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub experience: i32,
    pub created_at: DateTime<Utc>,
}

impl From<&AccountEntity> for TrainerPublicDto {
    fn from(value: &AccountEntity) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            email: value.email.clone(),
            phone: value.phone.clone(),
            specialization: value.specialization.clone(),
            experience: value.experience,
            created_at: value.created_at,
        }
    }
}

/// Trainer reference expanded in a freshly created entitlement.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainerSummaryDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub specialization: Option<String>,
}

impl From<&AccountEntity> for TrainerSummaryDto {
    fn from(value: &AccountEntity) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            email: value.email.clone(),
            specialization: value.specialization.clone(),
        }
    }
}

/// Member contact details shown to the trainer they subscribed to.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberContactDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<&AccountEntity> for MemberContactDto {
    fn from(value: &AccountEntity) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            email: value.email.clone(),
            phone: value.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateAccountModel {
    #[validate(length(max = 100, message = "Name is too long"), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub specialization: Option<String>,
    #[validate(range(min = 0, message = "Experience cannot be negative"))]
    pub experience: Option<i32>,
    pub membership_type: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateAccountModel {
    pub fn normalized_email(&self) -> Option<String> {
        self.email.as_deref().map(normalize_email)
    }

    pub fn to_entity(&self) -> UpdateAccountEntity {
        UpdateAccountEntity {
            name: self.name.as_ref().map(|name| name.trim().to_string()),
            email: self.normalized_email(),
            phone: self.phone.clone(),
            date_of_birth: self.date_of_birth,
            specialization: self.specialization.clone(),
            experience: self.experience,
            membership_type: self.membership_type.clone(),
            is_active: self.is_active,
            updated_at: Some(Utc::now()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAccountsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    #[serde(alias = "userType")]
    pub role: Option<AccountRole>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListAccountsFilter {
    pub role: Option<AccountRole>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl ListAccountsQuery {
    pub fn page(&self) -> i64 {
        self.page
            .filter(|page| *page >= 1)
            .unwrap_or(1)
            .min(MAX_PAGE)
    }

    pub fn limit(&self) -> i64 {
        self.limit
            .filter(|limit| *limit >= 1)
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .min(MAX_PAGE_LIMIT)
    }

    pub fn to_filter(&self) -> ListAccountsFilter {
        ListAccountsFilter {
            role: self.role,
            search: non_blank(self.search.as_deref()),
            limit: self.limit(),
            offset: (self.page() - 1).saturating_mul(self.limit()),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedAccountsDto {
    pub users: Vec<AccountDto>,
    pub total_pages: i64,
    pub current_page: i64,
    pub total: i64,
}

impl PaginatedAccountsDto {
    pub fn new(users: Vec<AccountDto>, total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self {
            users,
            total_pages,
            current_page: page,
            total,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainerSearchQuery {
    pub search: Option<String>,
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainerSearchFilter {
    pub search: Option<String>,
    pub specialization: Option<String>,
}

impl TrainerSearchQuery {
    pub fn to_filter(&self) -> TrainerSearchFilter {
        TrainerSearchFilter {
            search: non_blank(self.search.as_deref()),
            specialization: non_blank(self.specialization.as_deref()),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_defaults_to_member_role() {
        let model: RegisterAccountModel = serde_json::from_value(json!({
            "name": "Ana",
            "email": "ana@example.com",
            "password": "secret1"
        }))
        .unwrap();

        assert!(model.validate().is_ok());
        assert_eq!(model.role(), AccountRole::Member);
    }

    #[test]
    fn short_password_fails_validation() {
        let model: RegisterAccountModel = serde_json::from_value(json!({
            "name": "Ana",
            "email": "ana@example.com",
            "password": "123"
        }))
        .unwrap();

        assert!(model.validate().is_err());
    }

    #[test]
    fn whitespace_name_fails_validation() {
        let model: RegisterAccountModel = serde_json::from_value(json!({
            "name": "   ",
            "email": "ana@example.com",
            "password": "secret1"
        }))
        .unwrap();
        assert!(model.validate().is_err());

        let model: UpdateAccountModel =
            serde_json::from_value(json!({ "name": "\t\n" })).unwrap();
        assert!(model.validate().is_err());
    }

    #[test]
    fn legacy_user_type_field_is_accepted() {
        let model: RegisterAccountModel = serde_json::from_value(json!({
            "name": "Tom",
            "email": "tom@example.com",
            "password": "secret1",
            "userType": "trainer"
        }))
        .unwrap();

        assert_eq!(model.role(), AccountRole::Trainer);
    }

    #[test]
    fn pagination_is_clamped() {
        let query = ListAccountsQuery {
            page: Some(0),
            limit: Some(1000),
            role: None,
            search: Some("   ".to_string()),
        };
        let filter = query.to_filter();

        assert_eq!(filter.limit, MAX_PAGE_LIMIT);
        assert_eq!(filter.offset, 0);
        assert_eq!(filter.search, None);

        let query = ListAccountsQuery {
            page: Some(3),
            limit: None,
            ..Default::default()
        };
        assert_eq!(query.to_filter().offset, 20);
    }

    #[test]
    fn huge_page_number_yields_a_valid_offset() {
        let query = ListAccountsQuery {
            page: Some(i64::MAX),
            limit: Some(10),
            ..Default::default()
        };
        let filter = query.to_filter();

        assert_eq!(query.page(), MAX_PAGE);
        assert_eq!(filter.offset, (MAX_PAGE - 1) * 10);
        assert!(filter.offset > 0);

        let query = ListAccountsQuery {
            page: Some(i64::MAX),
            limit: Some(MAX_PAGE_LIMIT),
            ..Default::default()
        };
        assert!(query.to_filter().offset > 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PaginatedAccountsDto::new(vec![], 21, 1, 10).total_pages, 3);
        assert_eq!(PaginatedAccountsDto::new(vec![], 0, 1, 10).total_pages, 0);
    }
}
