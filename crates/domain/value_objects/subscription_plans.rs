use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::{
    entities::subscription_plans::{
        InsertSubscriptionPlanEntity, SubscriptionPlanEntity, SubscriptionPlanWithCreator,
        UpdateSubscriptionPlanEntity,
    },
    value_objects::{enums::plan_types::PlanType, validation::not_blank},
};

/// A hundred years; keeps `start + duration` well inside the timestamp range.
pub const MAX_TIER_DURATION_DAYS: i32 = 36_500;

#[allow(clippy::ptr_arg)]
fn validate_features(features: &Vec<String>) -> Result<(), ValidationError> {
    if features.is_empty() {
        return Err(ValidationError::new("features_empty")
            .with_message("At least one feature is required".into()));
    }
    if features.iter().any(|feature| feature.trim().is_empty()) {
        return Err(ValidationError::new("feature_blank")
            .with_message("Features cannot be blank".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateSubscriptionPlanModel {
    #[validate(length(max = 100, message = "Name is too long"), custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    /// Length of the entitlement in days.
    #[validate(range(
        min = 1,
        max = MAX_TIER_DURATION_DAYS,
        message = "Duration must be between 1 and 36500 days"
    ))]
    pub duration: i32,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i32,
    #[validate(custom(function = "validate_features"))]
    pub features: Vec<String>,
    pub plan_type: PlanType,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl CreateSubscriptionPlanModel {
    pub fn to_entity(&self, created_by: Uuid) -> serde_json::Result<InsertSubscriptionPlanEntity> {
        let now = Utc::now();
        Ok(InsertSubscriptionPlanEntity {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            duration: self.duration,
            price: self.price,
            features: serde_json::to_value(trimmed(&self.features))?,
            plan_type: self.plan_type.to_string(),
            is_active: self.is_active.unwrap_or(true),
            created_by: Some(created_by),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateSubscriptionPlanModel {
    #[validate(length(max = 100, message = "Name is too long"), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
    #[validate(range(
        min = 1,
        max = MAX_TIER_DURATION_DAYS,
        message = "Duration must be between 1 and 36500 days"
    ))]
    pub duration: Option<i32>,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: Option<i32>,
    #[validate(custom(function = "validate_features"))]
    pub features: Option<Vec<String>>,
    pub plan_type: Option<PlanType>,
    pub is_active: Option<bool>,
}

impl UpdateSubscriptionPlanModel {
    pub fn to_entity(&self) -> serde_json::Result<UpdateSubscriptionPlanEntity> {
        let features = match &self.features {
            Some(features) => Some(serde_json::to_value(trimmed(features))?),
            None => None,
        };

        Ok(UpdateSubscriptionPlanEntity {
            name: self.name.as_ref().map(|name| name.trim().to_string()),
            description: self
                .description
                .as_ref()
                .map(|description| description.trim().to_string()),
            duration: self.duration,
            price: self.price,
            features,
            plan_type: self.plan_type.map(|plan_type| plan_type.to_string()),
            is_active: self.is_active,
            updated_at: Some(Utc::now()),
        })
    }
}

fn trimmed(features: &[String]) -> Vec<String> {
    features
        .iter()
        .map(|feature| feature.trim().to_string())
        .collect()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlanDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub duration: i32,
    pub price: i32,
    pub features: Vec<String>,
    pub plan_type: String,
    pub is_active: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SubscriptionPlanEntity> for SubscriptionPlanDto {
    fn from(value: SubscriptionPlanEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            duration: value.duration,
            price: value.price,
            features: value.features,
            plan_type: value.plan_type,
            is_active: value.is_active,
            created_by: value.created_by,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminSubscriptionPlanDto {
    #[serde(flatten)]
    pub plan: SubscriptionPlanDto,
    pub created_by_name: Option<String>,
}

impl From<SubscriptionPlanWithCreator> for AdminSubscriptionPlanDto {
    fn from(value: SubscriptionPlanWithCreator) -> Self {
        Self {
            plan: value.plan.into(),
            created_by_name: value.creator_name,
        }
    }
}

/// Tier reference expanded in a freshly created entitlement.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TierSummaryDto {
    pub id: Uuid,
    pub name: String,
    pub duration: i32,
    pub price: i32,
    pub features: Vec<String>,
}

impl From<&SubscriptionPlanEntity> for TierSummaryDto {
    fn from(value: &SubscriptionPlanEntity) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            duration: value.duration,
            price: value.price,
            features: value.features.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn gold_tier_is_valid() {
        let model: CreateSubscriptionPlanModel = serde_json::from_value(json!({
            "name": "Gold",
            "description": "Monthly coaching",
            "duration": 30,
            "price": 5000,
            "features": ["support"],
            "planType": "premium"
        }))
        .unwrap();

        assert!(model.validate().is_ok());
        let admin_id = Uuid::new_v4();
        let entity = model.to_entity(admin_id).unwrap();
        assert_eq!(entity.plan_type, "premium");
        assert_eq!(entity.created_by, Some(admin_id));
        assert!(entity.is_active);
    }

    #[test]
    fn empty_features_fail_validation() {
        let model: CreateSubscriptionPlanModel = serde_json::from_value(json!({
            "name": "Gold",
            "description": "Monthly coaching",
            "duration": 30,
            "price": 5000,
            "features": [],
            "planType": "premium"
        }))
        .unwrap();

        assert!(model.validate().is_err());
    }

    #[test]
    fn duration_beyond_a_century_fails_validation() {
        let model: CreateSubscriptionPlanModel = serde_json::from_value(json!({
            "name": "Gold",
            "description": "Monthly coaching",
            "duration": i32::MAX,
            "price": 5000,
            "features": ["support"],
            "planType": "premium"
        }))
        .unwrap();
        assert!(model.validate().is_err());

        let model: UpdateSubscriptionPlanModel =
            serde_json::from_value(json!({ "duration": MAX_TIER_DURATION_DAYS + 1 })).unwrap();
        assert!(model.validate().is_err());

        let model: UpdateSubscriptionPlanModel =
            serde_json::from_value(json!({ "duration": MAX_TIER_DURATION_DAYS })).unwrap();
        assert!(model.validate().is_ok());
    }

    #[test]
    fn whitespace_name_and_description_fail_validation() {
        let model: CreateSubscriptionPlanModel = serde_json::from_value(json!({
            "name": "   ",
            "description": "Monthly coaching",
            "duration": 30,
            "price": 5000,
            "features": ["support"],
            "planType": "premium"
        }))
        .unwrap();
        assert!(model.validate().is_err());

        let model: UpdateSubscriptionPlanModel =
            serde_json::from_value(json!({ "description": "  " })).unwrap();
        assert!(model.validate().is_err());
    }

    #[test]
    fn unknown_plan_type_is_rejected() {
        let result = serde_json::from_value::<CreateSubscriptionPlanModel>(json!({
            "name": "Gold",
            "description": "Monthly coaching",
            "duration": 30,
            "price": 5000,
            "features": ["support"],
            "planType": "platinum"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn update_keeps_features_non_empty() {
        let model: UpdateSubscriptionPlanModel =
            serde_json::from_value(json!({ "features": [" "] })).unwrap();
        assert!(model.validate().is_err());

        let model: UpdateSubscriptionPlanModel =
            serde_json::from_value(json!({ "price": 7000 })).unwrap();
        assert!(model.validate().is_ok());
    }
}
