pub mod account_roles;
pub mod difficulties;
pub mod meal_types;
pub mod payment_statuses;
pub mod plan_types;
pub mod subscription_statuses;
pub mod target_audiences;
