pub mod accounts;
pub mod diet_plans;
pub mod subscription_plans;
pub mod user_subscriptions;
pub mod workout_plans;
