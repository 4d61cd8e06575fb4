use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::warn;
use uuid::Uuid;

use crate::{domain::value_objects::catalog::Meal, infra::db::postgres::schema::diet_plans};

#[derive(Debug, Clone, PartialEq)]
pub struct DietPlanEntity {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub title: String,
    pub description: String,
    pub duration: i32, // weeks
    pub calories_per_day: i32,
    pub meals: Vec<Meal>,
    pub target_audience: String,
    pub price: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw row used for Diesel queries. Meals stay as JSON and are parsed into `Meal`s.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = diet_plans)]
pub struct DietPlanRow {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub calories_per_day: i32,
    pub meals: serde_json::Value,
    pub target_audience: String,
    pub price: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DietPlanRow> for DietPlanEntity {
    fn from(value: DietPlanRow) -> Self {
        let meals = match serde_json::from_value(value.meals) {
            Ok(meals) => meals,
            Err(err) => {
                warn!(
                    diet_plan_id = %value.id,
                    error = %err,
                    "diet_plans: malformed meals column"
                );
                Vec::new()
            }
        };

        Self {
            id: value.id,
            trainer_id: value.trainer_id,
            title: value.title,
            description: value.description,
            duration: value.duration,
            calories_per_day: value.calories_per_day,
            meals,
            target_audience: value.target_audience,
            price: value.price,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = diet_plans)]
pub struct InsertDietPlanEntity {
    pub trainer_id: Uuid,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub calories_per_day: i32,
    pub meals: serde_json::Value,
    pub target_audience: String,
    pub price: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = diet_plans)]
pub struct UpdateDietPlanEntity {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub calories_per_day: Option<i32>,
    pub meals: Option<serde_json::Value>,
    pub target_audience: Option<String>,
    pub price: Option<i32>,
    pub is_active: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_meals_column_falls_back_to_empty() {
        let row = DietPlanRow {
            id: Uuid::new_v4(),
            trainer_id: Uuid::new_v4(),
            title: "Lean cut".to_string(),
            description: "Eight week deficit".to_string(),
            duration: 8,
            calories_per_day: 1800,
            meals: json!([{ "mealType": "lunch" }]),
            target_audience: "weight_loss".to_string(),
            price: 1200,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let entity = DietPlanEntity::from(row);
        assert!(entity.meals.is_empty());
        assert_eq!(entity.title, "Lean cut");
    }
}
