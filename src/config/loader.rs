//! Configuration loading from disk and environment.
//!
//! ## Environment Variables
//! Applied on top of the file, after parsing:
//! - `REQUEST_LOGGER_ENABLED`: true/false/1/0
//! - `REQUEST_LOGGER_LOGGING_LEVEL`: debug, info, warning, error, all, none

use std::fs;
use std::path::Path;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::interceptor::severity::LoggingConfiguration;

pub const ENV_ENABLED: &str = "REQUEST_LOGGER_ENABLED";
pub const ENV_LOGGING_LEVEL: &str = "REQUEST_LOGGER_LOGGING_LEVEL";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: '{value}'")]
    Env { name: &'static str, value: String },

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A parsed file together with the logging snapshot resolved from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub service: ServiceConfig,
    pub logging: LoggingConfiguration,
}

/// Load, override from the process environment, and validate.
pub fn load_config(path: &Path) -> Result<ResolvedConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    resolve(&content, |name| std::env::var(name).ok())
}

/// Parse `content`, apply overrides from `env`, and validate.
pub fn resolve(
    content: &str,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    let mut service: ServiceConfig = toml::from_str(content)?;
    apply_env_overrides(&mut service, env)?;
    let logging = validate_config(&service).map_err(ConfigError::Validation)?;
    Ok(ResolvedConfig { service, logging })
}

/// Overlay environment values onto `config`.
pub fn apply_env_overrides(
    config: &mut ServiceConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(value) = env(ENV_ENABLED) {
        config.request_logger.enabled = parse_bool(&value).ok_or(ConfigError::Env {
            name: ENV_ENABLED,
            value: value.clone(),
        })?;
    }
    if let Some(value) = env(ENV_LOGGING_LEVEL) {
        config.request_logger.logging_level = value;
    }
    Ok(())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
