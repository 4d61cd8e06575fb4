pub mod admin;
pub mod auth;
pub mod subscription_plans;
pub mod trainer;
pub mod user;
