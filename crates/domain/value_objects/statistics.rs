use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyRegistrations {
    pub year: i32,
    pub month: i32,
    pub count: i64,
}

/// Dashboard counters for administrators. `monthly_stats` holds at most the
/// twelve most recent (year, month) groups with registrations, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatistics {
    pub total_users: i64,
    pub total_trainers: i64,
    pub approved_trainers: i64,
    pub pending_trainers: i64,
    pub active_users: i64,
    pub inactive_users: i64,
    pub monthly_stats: Vec<MonthlyRegistrations>,
}
