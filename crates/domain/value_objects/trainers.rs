use serde::Serialize;

use crate::domain::value_objects::{
    accounts::TrainerPublicDto,
    catalog::{DietPlanDto, WorkoutPlanDto},
};

/// A trainer card in the member-facing directory.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainerWithCatalogDto {
    #[serde(flatten)]
    pub trainer: TrainerPublicDto,
    pub diet_plans: Vec<DietPlanDto>,
    pub workout_plans: Vec<WorkoutPlanDto>,
    pub diet_plan_count: usize,
    pub workout_plan_count: usize,
    pub subscriber_count: i64,
}

impl TrainerWithCatalogDto {
    pub fn new(
        trainer: TrainerPublicDto,
        diet_plans: Vec<DietPlanDto>,
        workout_plans: Vec<WorkoutPlanDto>,
        subscriber_count: i64,
    ) -> Self {
        Self {
            trainer,
            diet_plan_count: diet_plans.len(),
            workout_plan_count: workout_plans.len(),
            diet_plans,
            workout_plans,
            subscriber_count,
        }
    }
}

/// Public trainer profile page.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainerProfileDto {
    pub trainer: TrainerPublicDto,
    pub diet_plans: Vec<DietPlanDto>,
    pub workout_plans: Vec<WorkoutPlanDto>,
    pub subscriber_count: i64,
}
