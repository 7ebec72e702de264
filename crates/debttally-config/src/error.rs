//! Error types for debttally-config

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid YAML: {message}")]
    InvalidYaml { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}
