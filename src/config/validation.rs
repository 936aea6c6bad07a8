//! Configuration validation.
//!
//! # Responsibilities
//! - Resolve the severity string into a `Severity`
//! - Check the listener address parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<LoggingConfiguration, Vec<ValidationError>>
//! - An unknown severity is an error, never a silent default

use std::net::SocketAddr;

use crate::config::schema::ServiceConfig;
use crate::interceptor::severity::{LoggingConfiguration, Severity};

/// A semantic problem with a parsed configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("request_logger.logging_level: {0}")]
    UnknownSeverity(#[from] crate::interceptor::severity::UnknownSeverity),

    #[error("listener.bind_address: '{0}' is not a socket address")]
    InvalidBindAddress(String),
}

/// Validate `config` and resolve the logging snapshot.
pub fn validate_config(config: &ServiceConfig) -> Result<LoggingConfiguration, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let level = match config.request_logger.logging_level.parse::<Severity>() {
        Ok(level) => Some(level),
        Err(e) => {
            errors.push(ValidationError::from(e));
            None
        }
    };

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match level {
        Some(level) if errors.is_empty() => {
            Ok(LoggingConfiguration::new(config.request_logger.enabled, level))
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interceptor::severity::UnknownSeverity;

    #[test]
    fn test_defaults_resolve() {
        let resolved = validate_config(&ServiceConfig::default()).unwrap();
        assert_eq!(resolved, LoggingConfiguration::new(false, Severity::All));
    }

    #[test]
    fn test_level_is_resolved() {
        let mut config = ServiceConfig::default();
        config.request_logger.enabled = true;
        config.request_logger.logging_level = "ERROR".into();

        let resolved = validate_config(&config).unwrap();
        assert!(resolved.enabled());
        assert_eq!(resolved.level(), Severity::Error);
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ServiceConfig::default();
        config.request_logger.logging_level = "loud".into();
        config.listener.bind_address = "nowhere".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnknownSeverity(UnknownSeverity("loud".into())),
                ValidationError::InvalidBindAddress("nowhere".into()),
            ]
        );
    }

    #[test]
    fn test_unknown_level_rejected_even_when_disabled() {
        let mut config = ServiceConfig::default();
        config.request_logger.enabled = false;
        config.request_logger.logging_level = "trace".into();
        assert!(validate_config(&config).is_err());
    }
}
