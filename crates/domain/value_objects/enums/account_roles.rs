use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Admin,
    Trainer,
    #[serde(alias = "user")]
    Member,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Admin => "admin",
            AccountRole::Trainer => "trainer",
            AccountRole::Member => "member",
        }
    }

    /// Accepts `user` as the legacy spelling of `member`.
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(AccountRole::Admin),
            "trainer" => Some(AccountRole::Trainer),
            "member" | "user" => Some(AccountRole::Member),
            _ => None,
        }
    }
}

impl Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
