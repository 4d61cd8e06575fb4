pub mod accounts;
pub mod catalog;
pub mod enums;
pub mod member_subscriptions;
pub mod statistics;
pub mod subscription_plans;
pub mod trainers;
pub mod user_subscriptions;
pub mod validation;
