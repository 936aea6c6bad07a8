//! Invocation context and result shapes.

use serde::Serialize;

use crate::http::context::{self, TransportContext};
use crate::interceptor::render::{Arg, Payload};

/// One intercepted call: who was called, with what, over which request.
///
/// Borrowed for the duration of a single call and never stored.
#[derive(Clone, Copy)]
pub struct InvocationContext<'a> {
    method: &'a str,
    args: &'a [Arg<'a>],
    transport: Option<&'a TransportContext>,
}

impl<'a> InvocationContext<'a> {
    pub fn new(method: &'a str, args: &'a [Arg<'a>]) -> Self {
        Self {
            method,
            args,
            transport: None,
        }
    }

    /// Attach the transport metadata of the request being served.
    pub fn with_transport(mut self, transport: Option<&'a TransportContext>) -> Self {
        self.transport = transport;
        self
    }

    pub fn method(&self) -> &'a str {
        self.method
    }

    pub fn args(&self) -> &'a [Arg<'a>] {
        self.args
    }

    pub fn transport(&self) -> Option<&'a TransportContext> {
        self.transport
    }
}

impl std::fmt::Debug for InvocationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocationContext")
            .field("method", &self.method)
            .field("arity", &self.args.len())
            .field("transport", &self.transport)
            .finish()
    }
}

/// Capture the ambient transport context, if the caller is serving a request.
pub fn ambient_transport() -> Option<TransportContext> {
    context::current()
}

/// How a returned value looks to the response hook.
pub enum ResultShape<'a> {
    /// A transport response carrying a status and an optional body.
    Response {
        status: u16,
        body: Option<&'a dyn Payload>,
    },
    /// No value.
    Null,
    /// Any other value.
    Value(&'a dyn Payload),
}

/// A return value the response hook can classify.
///
/// Plain serializable types opt in with [`observed_value!`](crate::observed_value).
pub trait Observed {
    fn shape(&self) -> ResultShape<'_>;
}

impl<T: Observed> Observed for Option<T> {
    fn shape(&self) -> ResultShape<'_> {
        match self {
            Some(value) => value.shape(),
            None => ResultShape::Null,
        }
    }
}

impl<T: Observed + ?Sized> Observed for Box<T> {
    fn shape(&self) -> ResultShape<'_> {
        (**self).shape()
    }
}

impl Observed for () {
    fn shape(&self) -> ResultShape<'_> {
        ResultShape::Null
    }
}

impl<T: Serialize + Send + Sync> Observed for Vec<T> {
    fn shape(&self) -> ResultShape<'_> {
        ResultShape::Value(self)
    }
}

impl<T: Payload> Observed for axum::Json<T> {
    fn shape(&self) -> ResultShape<'_> {
        ResultShape::Value(&self.0)
    }
}

/// Implement [`Observed`] for serializable types that are plain values.
#[macro_export]
macro_rules! observed_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::interceptor::invocation::Observed for $ty {
                fn shape(&self) -> $crate::interceptor::invocation::ResultShape<'_> {
                    $crate::interceptor::invocation::ResultShape::Value(self)
                }
            }
        )+
    };
}

observed_value!(
    bool,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    char,
    String,
    &'static str,
    serde_json::Value,
);
