use std::fmt::Display;

use anyhow::{Result, bail};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Local,
    Development,
    Production,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stage = match self {
            Stage::Local => "local",
            Stage::Development => "development",
            Stage::Production => "production",
        };
        write!(f, "{}", stage)
    }
}

impl TryFrom<&String> for Stage {
    type Error = anyhow::Error;

    fn try_from(value: &String) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Stage::Local),
            "development" | "dev" => Ok(Stage::Development),
            "production" | "prod" => Ok(Stage::Production),
            other => bail!("Unknown stage: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_stages() {
        assert_eq!(Stage::try_from(&"PROD".to_string()).unwrap(), Stage::Production);
        assert_eq!(Stage::try_from(&"dev".to_string()).unwrap(), Stage::Development);
        assert!(Stage::try_from(&"qa".to_string()).is_err());
    }
}
