//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Severity stays a raw string here; validation turns it into a `Severity`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::interceptor::emitter::{ConsoleSink, LogSink, TracingSink};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Request logger settings.
    pub request_logger: RequestLoggerConfig,

    /// Process-level logging settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Request logger settings, as written in the file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RequestLoggerConfig {
    /// Master switch. Off by default.
    pub enabled: bool,

    /// One of debug, info, warning, error, all, none.
    pub logging_level: String,

    /// Where formatted lines go.
    pub sink: SinkKind,
}

/// Destination for request logger lines.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Through the process `tracing` subscriber.
    #[default]
    Tracing,
    /// Straight to stdout.
    Console,
}

impl SinkKind {
    pub fn build(self) -> Arc<dyn LogSink> {
        match self {
            SinkKind::Tracing => Arc::new(TracingSink),
            SinkKind::Console => Arc::new(ConsoleSink),
        }
    }
}

impl Default for RequestLoggerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            logging_level: "all".to_string(),
            sink: SinkKind::Tracing,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level for the rest of the process (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
