//! Interception entrypoints.
//!
//! # Responsibilities
//! - Around: time a call and report its latency
//! - Before: report the inbound request of a controller call
//! - After returning: report the outbound response, severity by result shape
//! - After throwing: report a service failure with its arguments
//!
//! # Design Decisions
//! - Hooks run inline on the caller's task; nothing is spawned or buffered
//! - A hook never swallows or alters the wrapped call's error
//! - Every hook checks its own policy gate before doing any work

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use tokio::time::Instant;

use crate::interceptor::emitter::{paint, Emitter, LogSink, TracingSink, ANSI_BLUE, ANSI_GREEN, ANSI_YELLOW};
use crate::interceptor::invocation::{ambient_transport, InvocationContext, Observed, ResultShape};
use crate::interceptor::matcher::{Categories, CallSite, Category};
use crate::interceptor::render::{Arg, PayloadRenderer, RenderContext};
use crate::interceptor::severity::{LoggingConfiguration, Severity};

/// URI reported when a response is observed outside a request.
pub const UNKNOWN_URI: &str = "unknown";

/// Severity of a transport response with `status`.
///
/// 2xx is INFO, 404 is ERROR, everything else is WARNING.
pub fn classify_status(status: u16) -> Severity {
    match status {
        200..=299 => Severity::Info,
        404 => Severity::Error,
        _ => Severity::Warning,
    }
}

/// The logging component: policy, renderer and emitter bound together.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    config: LoggingConfiguration,
    emitter: Emitter,
}

impl RequestLogger {
    /// Build the component around `sink`.
    pub fn new(config: LoggingConfiguration, sink: Arc<dyn LogSink>) -> Self {
        let emitter = Emitter::new(sink);
        if config.enabled() {
            emitter.announce(&format!(
                "{} with logging level {}",
                paint(ANSI_GREEN, "Request Logger initialized"),
                config.level()
            ));
        }
        Self { config, emitter }
    }

    /// Build the component writing through `tracing`.
    pub fn with_tracing(config: LoggingConfiguration) -> Self {
        Self::new(config, Arc::new(TracingSink))
    }

    pub fn config(&self) -> &LoggingConfiguration {
        &self.config
    }

    fn should_emit(&self, category: Severity) -> bool {
        self.config.should_emit(category)
    }

    /// Severity of `category` if the policy admits it.
    fn admitted(&self, category: Category) -> Option<Severity> {
        category.gate().filter(|severity| self.should_emit(*severity))
    }

    fn renderer(&self) -> PayloadRenderer<'_> {
        PayloadRenderer::new(&self.config, &self.emitter)
    }

    fn report_elapsed(&self, severity: Severity, ctx: &InvocationContext<'_>, started: Instant) {
        let elapsed = started.elapsed().as_millis();
        self.emitter.emit(
            severity,
            &format!(
                "Method {} executed in {}",
                ctx.method(),
                paint(ANSI_YELLOW, format!("{elapsed}ms"))
            ),
        );
    }

    /// Around hook: time `next` and report on success.
    ///
    /// With DEBUG denied, `next` runs untouched and no clock is read.
    /// A failed call is not reported and its error is returned as-is.
    pub fn time_execution<T, E>(
        &self,
        ctx: &InvocationContext<'_>,
        next: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let Some(severity) = self.admitted(Category::TimedExecution) else {
            return next();
        };
        let started = Instant::now();
        let value = next()?;
        self.report_elapsed(severity, ctx, started);
        Ok(value)
    }

    /// Async form of [`time_execution`](Self::time_execution).
    pub async fn time_execution_async<T, E, Fut>(
        &self,
        ctx: &InvocationContext<'_>,
        next: impl FnOnce() -> Fut,
    ) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
    {
        let Some(severity) = self.admitted(Category::TimedExecution) else {
            return next().await;
        };
        let started = Instant::now();
        let value = next().await?;
        self.report_elapsed(severity, ctx, started);
        Ok(value)
    }

    /// After-throwing hook: report a failure raised inside a service.
    pub fn log_failure(&self, ctx: &InvocationContext<'_>, error: &dyn Display) {
        let Some(severity) = self.admitted(Category::ServiceFailure) else {
            return;
        };
        let args = self.renderer().render_all(ctx.args());
        self.emitter.emit_block(
            severity,
            &format!(
                "Error in method {} with arguments: {}\nMessage: {}",
                ctx.method(),
                args,
                error
            ),
        );
    }

    /// Before hook: report the inbound request. A no-op outside a request.
    pub fn log_request(&self, ctx: &InvocationContext<'_>) {
        let Some(severity) = self.admitted(Category::InboundRequest) else {
            return;
        };
        let Some(transport) = ctx.transport() else {
            return;
        };
        let body = self.renderer().render_first(ctx.args());
        self.emitter.emit(
            severity,
            &format!("Request: {} {} with body: {}", transport.method, transport.uri, body),
        );
    }

    /// After-returning hook: report the outbound response.
    pub fn log_response(&self, ctx: &InvocationContext<'_>, result: &dyn Observed) {
        if !self.should_emit(Severity::Info)
            && !self.should_emit(Severity::Warning)
            && !self.should_emit(Severity::Error)
        {
            return;
        }
        let uri = ctx.transport().map_or(UNKNOWN_URI, |t| t.uri.as_str());

        match result.shape() {
            ResultShape::Response { status, body } => {
                let severity = classify_status(status);
                if !self.should_emit(severity) {
                    return;
                }
                let message = match body {
                    Some(body) => {
                        let rendered = self.renderer().render(Some(body), RenderContext::Result);
                        format!(
                            "{} -> {}",
                            paint(ANSI_GREEN, format!("[{}]", rendered.type_label())),
                            rendered
                        )
                    }
                    None => "null".to_string(),
                };
                self.emitter.emit(
                    severity,
                    &format!("Response to {uri}: HTTP {status} {message}"),
                );
            }
            ResultShape::Null => {
                if self.should_emit(Severity::Warning) {
                    self.emitter.emit(
                        Severity::Warning,
                        &format!("Response to {uri}: null from method {}", ctx.method()),
                    );
                }
            }
            ResultShape::Value(value) => {
                if self.should_emit(Severity::Info) {
                    let rendered = self.renderer().render(Some(value), RenderContext::Result);
                    self.emitter.emit(
                        Severity::Info,
                        &format!(
                            "Response to {uri}: {} -> {}",
                            paint(ANSI_BLUE, format!("[{}]", rendered.type_label())),
                            rendered
                        ),
                    );
                }
            }
        }
    }

    fn after<T: Observed, E: Display>(
        &self,
        categories: Categories,
        ctx: &InvocationContext<'_>,
        outcome: &Result<T, E>,
    ) {
        match outcome {
            Ok(value) if categories.contains(Category::OutboundResponse) => {
                self.log_response(ctx, value)
            }
            Err(error) if categories.contains(Category::ServiceFailure) => {
                self.log_failure(ctx, error)
            }
            _ => {}
        }
    }

    /// Run `next` as the call at `site`, applying every hook its markers select.
    ///
    /// Order: request hook, then the timed wrap around `next`, then the
    /// response or failure hook. The outcome of `next` is returned unchanged.
    pub async fn intercept<T, E, F, Fut>(&self, site: &CallSite, args: &[Arg<'_>], next: F) -> Result<T, E>
    where
        T: Observed,
        E: Display,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let categories = site.categories();
        let transport = ambient_transport();
        let ctx = InvocationContext::new(site.name(), args).with_transport(transport.as_ref());

        if categories.contains(Category::InboundRequest) {
            self.log_request(&ctx);
        }
        let outcome = if categories.contains(Category::TimedExecution) {
            self.time_execution_async(&ctx, next).await
        } else {
            next().await
        };
        self.after(categories, &ctx, &outcome);
        outcome
    }

    /// Blocking form of [`intercept`](Self::intercept).
    pub fn intercept_blocking<T, E>(
        &self,
        site: &CallSite,
        args: &[Arg<'_>],
        next: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E>
    where
        T: Observed,
        E: Display,
    {
        let categories = site.categories();
        let transport = ambient_transport();
        let ctx = InvocationContext::new(site.name(), args).with_transport(transport.as_ref());

        if categories.contains(Category::InboundRequest) {
            self.log_request(&ctx);
        }
        let outcome = if categories.contains(Category::TimedExecution) {
            self.time_execution(&ctx, next)
        } else {
            next()
        };
        self.after(categories, &ctx, &outcome);
        outcome
    }
}

impl Default for RequestLogger {
    fn default() -> Self {
        Self::with_tracing(LoggingConfiguration::disabled())
    }
}
