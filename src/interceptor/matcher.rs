//! Call-site matching.
//!
//! # Responsibilities
//! - Carry the markers a host attaches to a call site
//! - Classify a call site into observation categories
//!
//! # Design Decisions
//! - Call sites are `const`-constructible so markers are fixed at definition time
//! - Classification depends only on markers, never on the invocation
//! - A call site may fall into several categories at once

use crate::interceptor::severity::Severity;

/// Type-level scope a call site lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Business service: failures are captured.
    Service,
    /// Transport controller: requests and responses are observed.
    Controller,
}

/// Method-level markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Measure execution time.
    LogExecTime,
    /// Observe request and response for this method only.
    LoggableControllerMethod,
    /// Observe the inbound request only.
    LoggableRequest,
    /// Observe the outbound response only.
    LoggableResponse,
}

impl Marker {
    const fn bit(self) -> u8 {
        match self {
            Marker::LogExecTime => 1,
            Marker::LoggableControllerMethod => 1 << 1,
            Marker::LoggableRequest => 1 << 2,
            Marker::LoggableResponse => 1 << 3,
        }
    }
}

/// Observation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    TimedExecution,
    ServiceFailure,
    InboundRequest,
    OutboundResponse,
}

impl Category {
    /// Fixed severity gating this category.
    ///
    /// `OutboundResponse` has none: its severity comes from the result.
    pub const fn gate(self) -> Option<Severity> {
        match self {
            Category::TimedExecution => Some(Severity::Debug),
            Category::ServiceFailure => Some(Severity::Error),
            Category::InboundRequest => Some(Severity::Debug),
            Category::OutboundResponse => None,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Category::TimedExecution => 1,
            Category::ServiceFailure => 1 << 1,
            Category::InboundRequest => 1 << 2,
            Category::OutboundResponse => 1 << 3,
        }
    }
}

/// Set of categories a call site belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Categories(u8);

impl Categories {
    pub const EMPTY: Categories = Categories(0);

    pub const fn with(self, category: Category) -> Self {
        Categories(self.0 | category.bit())
    }

    pub const fn contains(&self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// An instrumented call site: a method identity plus its markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    name: &'static str,
    scope: Option<Scope>,
    markers: u8,
}

impl CallSite {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            scope: None,
            markers: 0,
        }
    }

    /// A method of a service-scoped type.
    pub const fn service(name: &'static str) -> Self {
        Self::new(name).in_scope(Scope::Service)
    }

    /// A method of a controller-scoped type.
    pub const fn controller(name: &'static str) -> Self {
        Self::new(name).in_scope(Scope::Controller)
    }

    pub const fn in_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub const fn marked(mut self, marker: Marker) -> Self {
        self.markers |= marker.bit();
        self
    }

    pub const fn timed(self) -> Self {
        self.marked(Marker::LogExecTime)
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn scope(&self) -> Option<Scope> {
        self.scope
    }

    pub const fn has(&self, marker: Marker) -> bool {
        self.markers & marker.bit() != 0
    }

    const fn in_controller(&self) -> bool {
        matches!(self.scope, Some(Scope::Controller))
    }

    /// Classify this call site.
    pub const fn categories(&self) -> Categories {
        let mut set = Categories::EMPTY;
        if self.has(Marker::LogExecTime) {
            set = set.with(Category::TimedExecution);
        }
        if matches!(self.scope, Some(Scope::Service)) {
            set = set.with(Category::ServiceFailure);
        }
        let controller = self.in_controller() || self.has(Marker::LoggableControllerMethod);
        if controller || self.has(Marker::LoggableRequest) {
            set = set.with(Category::InboundRequest);
        }
        if controller || self.has(Marker::LoggableResponse) {
            set = set.with(Category::OutboundResponse);
        }
        set
    }
}
