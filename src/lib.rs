//! Request logging layer for axum services.
//!
//! Observes calls at instrumented call sites and emits color-tagged lines
//! filtered by a severity policy:
//! - execution time of timed calls (DEBUG)
//! - failures raised inside services, with their arguments (ERROR)
//! - inbound requests of controllers, with the body argument (DEBUG)
//! - outbound responses, severity chosen by status or result shape
//!
//! ```ignore
//! use request_logger::interceptor::{arg, CallSite, LoggingConfiguration, RequestLogger, Severity};
//!
//! const FIND: CallSite = CallSite::service("find").timed();
//!
//! let logger = RequestLogger::with_tracing(LoggingConfiguration::new(true, Severity::All));
//! let item = logger.intercept_blocking(&FIND, &[arg(&id)], || repo.find(id))?;
//! ```

pub mod app;
pub mod config;
pub mod http;
pub mod interceptor;
pub mod observability;

pub use config::ServiceConfig;
pub use http::{HttpServer, ResponseEntity};
pub use interceptor::{CallSite, LoggingConfiguration, RequestLogger, Severity};
