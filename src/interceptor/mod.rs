//! Interception and filtering engine.
//!
//! # Data Flow
//! ```text
//! Intercepted call (CallSite + arguments)
//!     → matcher.rs (markers → categories)
//!     → severity.rs (enabled + level gate per category)
//!     → render.rs (arguments / result / failure → text)
//!     → emitter.rs (colored tag + line → sink)
//!
//! hooks.rs binds the four shapes together:
//!     around (timed) · before (request) · after-return (response) · after-throw (failure)
//! ```
//!
//! # Design Decisions
//! - Call sites are tagged at definition time; no reflection at runtime
//! - Configuration is an immutable snapshot passed in at construction
//! - Observation never changes the outcome of the observed call

pub mod emitter;
pub mod hooks;
pub mod invocation;
pub mod matcher;
pub mod render;
pub mod severity;

pub use emitter::{CapturingSink, ConsoleSink, Emitter, LogSink, TracingSink};
pub use hooks::{classify_status, RequestLogger};
pub use invocation::{InvocationContext, Observed, ResultShape};
pub use matcher::{CallSite, Categories, Category, Marker, Scope};
pub use render::{arg, Arg, Payload, PayloadRenderer, RenderContext, RenderedPayload};
pub use severity::{should_emit, LoggingConfiguration, Severity};
