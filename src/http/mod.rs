//! Transport boundary.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → context.rs (middleware installs method + URI as task-local)
//!     → handler (intercepted call reads the ambient context)
//!     → response.rs (ResponseEntity: status + body, classified by status)
//!     → server.rs (router, listener, graceful shutdown)
//! ```

pub mod context;
pub mod response;
pub mod server;

pub use context::{transport_context_middleware, TransportContext};
pub use response::ResponseEntity;
pub use server::HttpServer;
