//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! RequestLogger lines (target = request_logger)
//!     → TracingSink → tracing events
//! Everything else in the process
//!     → tracing events
//! Both
//!     → logging.rs subscriber (EnvFilter + fmt) → stdout
//! ```

pub mod logging;

pub use logging::{default_filter, init_logging};
