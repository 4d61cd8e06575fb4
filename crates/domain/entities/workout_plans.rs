use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::warn;
use uuid::Uuid;

use crate::{
    domain::value_objects::catalog::Exercise, infra::db::postgres::schema::workout_plans,
};

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutPlanEntity {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub title: String,
    pub description: String,
    pub duration: i32, // weeks
    pub difficulty: String,
    pub exercises: Vec<Exercise>,
    pub target_audience: String,
    pub price: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = workout_plans)]
pub struct WorkoutPlanRow {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub difficulty: String,
    pub exercises: serde_json::Value,
    pub target_audience: String,
    pub price: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WorkoutPlanRow> for WorkoutPlanEntity {
    fn from(value: WorkoutPlanRow) -> Self {
        let exercises = match serde_json::from_value(value.exercises) {
            Ok(exercises) => exercises,
            Err(err) => {
                warn!(
                    workout_plan_id = %value.id,
                    error = %err,
                    "workout_plans: malformed exercises column"
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
            difficulty: value.difficulty,
            exercises,
            target_audience: value.target_audience,
            price: value.price,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = workout_plans)]
pub struct InsertWorkoutPlanEntity {
    pub trainer_id: Uuid,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub difficulty: String,
    pub exercises: serde_json::Value,
    pub target_audience: String,
    pub price: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = workout_plans)]
pub struct UpdateWorkoutPlanEntity {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub difficulty: Option<String>,
    pub exercises: Option<serde_json::Value>,
    pub target_audience: Option<String>,
    pub price: Option<i32>,
    pub is_active: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}
