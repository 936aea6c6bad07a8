//! Transport response carrying a status and an optional body.
//!
//! # Design Decisions
//! - Bodies are sent as JSON; an absent body is an empty response
//! - The response hook classifies by status, so the status is kept as-is

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::interceptor::invocation::{Observed, ResultShape};
use crate::interceptor::render::Payload;

/// Status plus optional JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEntity<T> {
    status: StatusCode,
    body: Option<T>,
}

impl<T> ResponseEntity<T> {
    pub fn new(status: StatusCode, body: Option<T>) -> Self {
        Self { status, body }
    }

    pub fn ok(body: T) -> Self {
        Self::new(StatusCode::OK, Some(body))
    }

    pub fn created(body: T) -> Self {
        Self::new(StatusCode::CREATED, Some(body))
    }

    pub fn no_content() -> Self {
        Self::new(StatusCode::NO_CONTENT, None)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, None)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }
}

impl<T: Payload> Observed for ResponseEntity<T> {
    fn shape(&self) -> ResultShape<'_> {
        ResultShape::Response {
            status: self.status.as_u16(),
            body: self.body.as_ref().map(|b| b as &dyn Payload),
        }
    }
}

impl<T: Serialize> IntoResponse for ResponseEntity<T> {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}
