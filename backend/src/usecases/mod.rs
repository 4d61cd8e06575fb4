pub mod accounts;
pub mod admin;
pub mod subscription_plans;
pub mod subscriptions;
pub mod trainer_catalog;
pub mod trainer_directory;
