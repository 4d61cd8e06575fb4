use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::warn;
use uuid::Uuid;

use crate::infra::db::postgres::schema::subscription_plans;

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionPlanEntity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub duration: i32, // days
    pub price: i32,
    pub features: Vec<String>,
    pub plan_type: String,
    pub is_active: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw row used for Diesel queries. Features stay as JSON and are parsed into a string list.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = subscription_plans)]
pub struct SubscriptionPlanRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub duration: i32,
    pub price: i32,
    pub features: serde_json::Value,
    pub plan_type: String,
    pub is_active: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SubscriptionPlanRow> for SubscriptionPlanEntity {
    fn from(value: SubscriptionPlanRow) -> Self {
        let features = match serde_json::from_value(value.features) {
            Ok(features) => features,
            Err(err) => {
                warn!(
                    subscription_plan_id = %value.id,
                    error = %err,
                    "subscription_plans: malformed features column"
                );
                Vec::new()
            }
        };

        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            duration: value.duration,
            price: value.price,
            features,
            plan_type: value.plan_type,
            is_active: value.is_active,
            created_by: value.created_by,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscription_plans)]
pub struct InsertSubscriptionPlanEntity {
    pub name: String,
    pub description: String,
    pub duration: i32,
    pub price: i32,
    pub features: serde_json::Value,
    pub plan_type: String,
    pub is_active: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = subscription_plans)]
pub struct UpdateSubscriptionPlanEntity {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub price: Option<i32>,
    pub features: Option<serde_json::Value>,
    pub plan_type: Option<String>,
    pub is_active: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Tier listing row for admins, joined with the creator's display name.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionPlanWithCreator {
    pub plan: SubscriptionPlanEntity,
    pub creator_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(features: serde_json::Value) -> SubscriptionPlanRow {
        SubscriptionPlanRow {
            id: Uuid::new_v4(),
            name: "Gold".to_string(),
            description: "Monthly coaching".to_string(),
            duration: 30,
            price: 5000,
            features,
            plan_type: "premium".to_string(),
            is_active: true,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn features_column_is_parsed_into_strings() {
        let entity = SubscriptionPlanEntity::from(row(json!(["support", "chat"])));
        assert_eq!(entity.features, vec!["support", "chat"]);
    }

    #[test]
    fn malformed_features_column_falls_back_to_empty() {
        let entity = SubscriptionPlanEntity::from(row(json!({ "support": true })));
        assert!(entity.features.is_empty());
        assert_eq!(entity.name, "Gold");
    }
}
