use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DietTargetAudience {
    WeightLoss,
    MuscleGain,
    Maintenance,
    AthleticPerformance,
}

impl DietTargetAudience {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietTargetAudience::WeightLoss => "weight_loss",
            DietTargetAudience::MuscleGain => "muscle_gain",
            DietTargetAudience::Maintenance => "maintenance",
            DietTargetAudience::AthleticPerformance => "athletic_performance",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "weight_loss" => Some(DietTargetAudience::WeightLoss),
            "muscle_gain" => Some(DietTargetAudience::MuscleGain),
            "maintenance" => Some(DietTargetAudience::Maintenance),
            "athletic_performance" => Some(DietTargetAudience::AthleticPerformance),
            _ => None,
        }
    }
}

impl Display for DietTargetAudience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutTargetAudience {
    WeightLoss,
    MuscleGain,
    Endurance,
    Flexibility,
    GeneralFitness,
}

impl WorkoutTargetAudience {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutTargetAudience::WeightLoss => "weight_loss",
            WorkoutTargetAudience::MuscleGain => "muscle_gain",
            WorkoutTargetAudience::Endurance => "endurance",
            WorkoutTargetAudience::Flexibility => "flexibility",
            WorkoutTargetAudience::GeneralFitness => "general_fitness",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "weight_loss" => Some(WorkoutTargetAudience::WeightLoss),
            "muscle_gain" => Some(WorkoutTargetAudience::MuscleGain),
            "endurance" => Some(WorkoutTargetAudience::Endurance),
            "flexibility" => Some(WorkoutTargetAudience::Flexibility),
            "general_fitness" => Some(WorkoutTargetAudience::GeneralFitness),
            _ => None,
        }
    }
}

impl Display for WorkoutTargetAudience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
