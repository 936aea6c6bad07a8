//! Ambient transport context.
//!
//! # Responsibilities
//! - Make the method and URI of the request being served visible to
//!   code that only sees its own arguments
//!
//! # Design Decisions
//! - Stored in a tokio task-local, installed by middleware around the handler
//! - Outside a request scope the accessor returns `None`, never an error

use std::future::Future;

use axum::{body::Body, http::Request, middleware::Next, response::Response};

/// HTTP method and URI of the request being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportContext {
    pub method: String,
    /// Request path, without the query string.
    pub uri: String,
}

impl TransportContext {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
        }
    }

    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self::new(request.method().as_str(), request.uri().path())
    }
}

tokio::task_local! {
    static TRANSPORT: TransportContext;
}

/// Transport context of the current request, if any.
pub fn current() -> Option<TransportContext> {
    TRANSPORT.try_with(Clone::clone).ok()
}

/// Run `fut` with `context` as the ambient transport context.
pub async fn scope<F: Future>(context: TransportContext, fut: F) -> F::Output {
    TRANSPORT.scope(context, fut).await
}

/// Run `f` with `context` as the ambient transport context.
pub fn sync_scope<R>(context: TransportContext, f: impl FnOnce() -> R) -> R {
    TRANSPORT.sync_scope(context, f)
}

/// Middleware installing the transport context for the rest of the stack.
pub async fn transport_context_middleware(request: Request<Body>, next: Next) -> Response {
    let context = TransportContext::from_request(&request);
    scope(context, next.run(request)).await
}
