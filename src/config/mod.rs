//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse, apply REQUEST_LOGGER_* env overrides)
//!     → validation.rs (resolve severity, semantic checks)
//!     → LoggingConfiguration (validated, immutable)
//!     → handed to RequestLogger at construction
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → a new RequestLogger is built and swapped in atomically
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes rebuild the component
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError, ResolvedConfig};
pub use schema::{ListenerConfig, ObservabilityConfig, RequestLoggerConfig, ServiceConfig, SinkKind};
pub use validation::{validate_config, ValidationError};
