//! Severity policy.
//!
//! # Design Decisions
//! - Matching is exact equality, `All` is the only wildcard
//! - There is no rank ordering: `Warning` does not imply `Error`
//! - Unknown severity strings are rejected, never defaulted

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity of an observation, or the configured selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    All,
    None,
}

impl Severity {
    pub const MEMBERS: [Severity; 6] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::All,
        Severity::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::All => "all",
            Severity::None => "none",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no severity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity '{0}' (expected one of: debug, info, warning, error, all, none)")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Severity::MEMBERS
            .into_iter()
            .find(|member| member.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownSeverity(s.to_string()))
    }
}

impl TryFrom<String> for Severity {
    type Error = UnknownSeverity;

    fn try_from(value: String) -> Result<Self, UnknownSeverity> {
        value.parse()
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_str().to_string()
    }
}

/// Resolved, immutable logging settings.
///
/// Built once from configuration; reconfiguring means building a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfiguration {
    enabled: bool,
    level: Severity,
}

impl LoggingConfiguration {
    pub const fn new(enabled: bool, level: Severity) -> Self {
        Self { enabled, level }
    }

    /// A configuration that never emits anything.
    pub const fn disabled() -> Self {
        Self::new(false, Severity::None)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    /// Whether an observation of `category` should be emitted.
    pub fn should_emit(&self, category: Severity) -> bool {
        should_emit(self, category)
    }
}

impl Default for LoggingConfiguration {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Gate an observation of `category` against `config`.
pub fn should_emit(config: &LoggingConfiguration, category: Severity) -> bool {
    if !config.enabled {
        return false;
    }
    config.level == Severity::All || config.level == category
}
