//! Items service: a small host wired through the request logger.
//!
//! # Data Flow
//! ```text
//! HTTP request
//!     → transport_context_middleware (method + URI in scope)
//!     → controller.rs handler (controller call site: request/response hooks)
//!     → service.rs method (service call site: failure hook, timing on list)
//! ```

pub mod controller;
pub mod service;

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::{middleware, routing::get, Router};

use crate::http::context::transport_context_middleware;
use crate::interceptor::RequestLogger;

pub use service::{Item, ItemError, ItemService, NewItem};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<ItemService>,
    pub logger: Arc<ArcSwap<RequestLogger>>,
}

impl AppState {
    /// Fresh state sharing one swappable logger between controller and service.
    pub fn new(logger: Arc<ArcSwap<RequestLogger>>) -> Self {
        Self {
            items: Arc::new(ItemService::new(logger.clone())),
            logger,
        }
    }
}

/// Build the items router with the transport context installed.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/items", get(controller::list_items).post(controller::create_item))
        .route("/items/count", get(controller::count_items))
        .route("/items/{id}", get(controller::get_item).delete(controller::delete_item))
        .with_state(state)
        .layer(middleware::from_fn(transport_context_middleware))
}
