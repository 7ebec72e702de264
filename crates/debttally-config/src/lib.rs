//! Configuration management for debttally
//!
//! This module handles loading and validation of ledger policy,
//! abbreviation overrides, and logging settings from YAML files.

pub mod error;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Ledger policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Days after creation before an unsettled monetary debt counts as overdue
    #[serde(default = "default_grace_period_days")]
    pub grace_period_days: i64,
}

fn default_grace_period_days() -> i64 {
    7
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            grace_period_days: default_grace_period_days(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Ledger policy (grace period)
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Abbreviation override table (lower-cased word -> positive multiplier).
    /// When present it fully replaces the interpreter's built-in defaults
    /// rather than merging with them.
    #[serde(default)]
    pub abbreviations: Option<HashMap<String, Decimal>>,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load and validate configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let config: Config = serde_yaml::from_str(&content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger.grace_period_days < 0 {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "grace_period_days must be non-negative, got {}",
                    self.ledger.grace_period_days
                ),
            });
        }
        if let Some(table) = &self.abbreviations {
            for (word, multiplier) in table {
                if *multiplier <= Decimal::ZERO {
                    return Err(ConfigError::ValidationError {
                        message: format!(
                            "abbreviation '{}' must map to a positive multiplier, got {}",
                            word, multiplier
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ledger.grace_period_days, 7);
        assert!(config.abbreviations.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
ledger:
  grace_period_days: 14
abbreviations:
  note: 100
  tenner: 10
logging:
  level: debug
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.ledger.grace_period_days, 14);
        let table = config.abbreviations.unwrap();
        assert_eq!(table.get("note"), Some(&Decimal::from(100)));
        assert_eq!(table.get("tenner"), Some(&Decimal::from(10)));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let yaml = "ledger:\n  grace_period_days: 3\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.ledger.grace_period_days, 3);
        assert!(config.abbreviations.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_rejects_negative_grace() {
        let mut config = Config::default();
        config.ledger.grace_period_days = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_multiplier() {
        let mut config = Config::default();
        let mut table = HashMap::new();
        table.insert("note".to_string(), Decimal::ZERO);
        config.abbreviations = Some(table);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/config.yaml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }
}
