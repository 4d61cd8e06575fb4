use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Tier category of an admin-authored subscription plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Basic,
    Premium,
    Vip,
    Custom,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Basic => "basic",
            PlanType::Premium => "premium",
            PlanType::Vip => "vip",
            PlanType::Custom => "custom",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "basic" => Some(PlanType::Basic),
            "premium" => Some(PlanType::Premium),
            "vip" => Some(PlanType::Vip),
            "custom" => Some(PlanType::Custom),
            _ => None,
        }
    }
}

impl Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
