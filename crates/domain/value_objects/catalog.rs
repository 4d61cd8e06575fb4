use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    entities::{
        diet_plans::{DietPlanEntity, InsertDietPlanEntity, UpdateDietPlanEntity},
        workout_plans::{InsertWorkoutPlanEntity, UpdateWorkoutPlanEntity, WorkoutPlanEntity},
    },
    value_objects::{
        enums::{
            difficulties::Difficulty,
            meal_types::MealType,
            target_audiences::{DietTargetAudience, WorkoutTargetAudience},
        },
        validation::not_blank,
    },
};

/// One meal of a diet plan. Stored as an element of the `meals` JSONB array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Meal {
    pub meal_type: MealType,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(range(min = 0, message = "Calories cannot be negative"))]
    pub calories: i32,
}

/// One exercise of a workout plan. Stored as an element of the `exercises` JSONB array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Exercise {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(range(min = 1, message = "Sets must be at least 1"))]
    pub sets: i32,
    #[validate(range(min = 1, message = "Reps must be at least 1"))]
    pub reps: i32,
    /// Seconds of rest between sets.
    #[validate(range(min = 0, message = "Rest time cannot be negative"))]
    pub rest_time: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateDietPlanModel {
    #[validate(length(max = 200, message = "Title is too long"), custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration: i32,
    #[validate(range(min = 0, message = "Calories per day cannot be negative"))]
    pub calories_per_day: i32,
    #[serde(default)]
    #[validate(nested)]
    pub meals: Vec<Meal>,
    pub target_audience: DietTargetAudience,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i32,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl CreateDietPlanModel {
    pub fn to_entity(&self, trainer_id: Uuid) -> serde_json::Result<InsertDietPlanEntity> {
        let now = Utc::now();
        Ok(InsertDietPlanEntity {
            trainer_id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            duration: self.duration,
            calories_per_day: self.calories_per_day,
            meals: serde_json::to_value(&self.meals)?,
            target_audience: self.target_audience.to_string(),
            price: self.price,
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateDietPlanModel {
    #[validate(length(max = 200, message = "Title is too long"), custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration: Option<i32>,
    #[validate(range(min = 0, message = "Calories per day cannot be negative"))]
    pub calories_per_day: Option<i32>,
    #[validate(nested)]
    pub meals: Option<Vec<Meal>>,
    pub target_audience: Option<DietTargetAudience>,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: Option<i32>,
    pub is_active: Option<bool>,
}

impl UpdateDietPlanModel {
    pub fn to_entity(&self) -> serde_json::Result<UpdateDietPlanEntity> {
        let meals = match &self.meals {
            Some(meals) => Some(serde_json::to_value(meals)?),
            None => None,
        };

        Ok(UpdateDietPlanEntity {
            title: self.title.as_ref().map(|title| title.trim().to_string()),
            description: self
                .description
                .as_ref()
                .map(|description| description.trim().to_string()),
            duration: self.duration,
            calories_per_day: self.calories_per_day,
            meals,
            target_audience: self.target_audience.map(|audience| audience.to_string()),
            price: self.price,
            is_active: self.is_active,
            updated_at: Some(Utc::now()),
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DietPlanDto {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub calories_per_day: i32,
    pub meals: Vec<Meal>,
    pub target_audience: String,
    pub price: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DietPlanEntity> for DietPlanDto {
    fn from(value: DietPlanEntity) -> Self {
        Self {
            id: value.id,
            trainer_id: value.trainer_id,
            title: value.title,
            description: value.description,
            duration: value.duration,
            calories_per_day: value.calories_per_day,
            meals: value.meals,
            target_audience: value.target_audience,
            price: value.price,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateWorkoutPlanModel {
    #[validate(length(max = 200, message = "Title is too long"), custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration: i32,
    pub difficulty: Difficulty,
    #[serde(default)]
    #[validate(nested)]
    pub exercises: Vec<Exercise>,
    pub target_audience: WorkoutTargetAudience,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i32,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl CreateWorkoutPlanModel {
    pub fn to_entity(&self, trainer_id: Uuid) -> serde_json::Result<InsertWorkoutPlanEntity> {
        let now = Utc::now();
        Ok(InsertWorkoutPlanEntity {
            trainer_id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            duration: self.duration,
            difficulty: self.difficulty.to_string(),
            exercises: serde_json::to_value(&self.exercises)?,
            target_audience: self.target_audience.to_string(),
            price: self.price,
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateWorkoutPlanModel {
    #[validate(length(max = 200, message = "Title is too long"), custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration: Option<i32>,
    pub difficulty: Option<Difficulty>,
    #[validate(nested)]
    pub exercises: Option<Vec<Exercise>>,
    pub target_audience: Option<WorkoutTargetAudience>,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: Option<i32>,
    pub is_active: Option<bool>,
}

impl UpdateWorkoutPlanModel {
    pub fn to_entity(&self) -> serde_json::Result<UpdateWorkoutPlanEntity> {
        let exercises = match &self.exercises {
            Some(exercises) => Some(serde_json::to_value(exercises)?),
            None => None,
        };

        Ok(UpdateWorkoutPlanEntity {
            title: self.title.as_ref().map(|title| title.trim().to_string()),
            description: self
                .description
                .as_ref()
                .map(|description| description.trim().to_string()),
            duration: self.duration,
            difficulty: self.difficulty.map(|difficulty| difficulty.to_string()),
            exercises,
            target_audience: self.target_audience.map(|audience| audience.to_string()),
            price: self.price,
            is_active: self.is_active,
            updated_at: Some(Utc::now()),
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlanDto {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub difficulty: String,
    pub exercises: Vec<Exercise>,
    pub target_audience: String,
    pub price: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WorkoutPlanEntity> for WorkoutPlanDto {
    fn from(value: WorkoutPlanEntity) -> Self {
        Self {
            id: value.id,
            trainer_id: value.trainer_id,
            title: value.title,
            description: value.description,
            duration: value.duration,
            difficulty: value.difficulty,
            exercises: value.exercises,
            target_audience: value.target_audience,
            price: value.price,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Compact reference to a diet or workout plan used inside entitlement views.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummaryDto {
    pub id: Uuid,
    pub title: String,
    pub duration: i32,
}

impl From<&DietPlanEntity> for PlanSummaryDto {
    fn from(value: &DietPlanEntity) -> Self {
        Self {
            id: value.id,
            title: value.title.clone(),
            duration: value.duration,
        }
    }
}

impl From<&WorkoutPlanEntity> for PlanSummaryDto {
    fn from(value: &WorkoutPlanEntity) -> Self {
        Self {
            id: value.id,
            title: value.title.clone(),
            duration: value.duration,
        }
    }
}
