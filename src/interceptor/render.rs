//! Payload rendering.
//!
//! # Responsibilities
//! - Turn arguments, return values and bodies into display strings
//! - Absorb serialization failures into fixed sentinels
//!
//! # Design Decisions
//! - JSON via `serde_json` is the structured form
//! - Rendering never fails; a failure is reported as a DEBUG diagnostic
//!   when DEBUG is permitted, and otherwise only shows up as the sentinel

use std::fmt;

use serde::Serialize;

use crate::interceptor::emitter::Emitter;
use crate::interceptor::severity::{LoggingConfiguration, Severity};

/// Rendered in place of a null value.
pub const NULL_TOKEN: &str = "null";
/// Rendered when an expected argument is missing.
pub const NONE_TOKEN: &str = "none";
/// Rendered when an argument cannot be serialized.
pub const ARGUMENT_SENTINEL: &str = "<unserializable argument>";
/// Rendered when a result or body cannot be serialized.
pub const RESULT_SENTINEL: &str = "<unserializable result>";

/// A value the interceptor can render.
///
/// Implemented for everything that is `Serialize`.
pub trait Payload: Send + Sync {
    /// Full type name of the value.
    fn type_name(&self) -> &'static str;

    fn to_json(&self) -> Result<String, serde_json::Error>;
}

impl<T> Payload for T
where
    T: Serialize + Send + Sync + ?Sized,
{
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One argument of an invocation. `None` is a null argument.
pub type Arg<'a> = Option<&'a dyn Payload>;

/// Borrow `value` as an argument.
pub fn arg<T: Payload>(value: &T) -> Arg<'_> {
    Some(value)
}

/// What a payload is being rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderContext {
    Argument,
    Result,
}

impl RenderContext {
    pub fn sentinel(self) -> &'static str {
        match self {
            RenderContext::Argument => ARGUMENT_SENTINEL,
            RenderContext::Result => RESULT_SENTINEL,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            RenderContext::Argument => "argument",
            RenderContext::Result => "result",
        }
    }
}

/// A payload turned into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPayload {
    pub text: String,
    /// Short type name, when there was a value to take it from.
    pub type_name: Option<String>,
}

impl RenderedPayload {
    fn token(text: &str) -> Self {
        Self {
            text: text.to_string(),
            type_name: None,
        }
    }

    /// Type name for display, `null` when there was no value.
    pub fn type_label(&self) -> &str {
        self.type_name.as_deref().unwrap_or(NULL_TOKEN)
    }
}

impl fmt::Display for RenderedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Strip module paths from a type name, including inside generics.
///
/// `alloc::vec::Vec<app::Item>` becomes `Vec<Item>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(segment_start);
            continue;
        }
        out.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment_start = out.len();
        }
    }
    out
}

/// Renders payloads, reporting failures through the emitter.
#[derive(Debug, Clone, Copy)]
pub struct PayloadRenderer<'a> {
    config: &'a LoggingConfiguration,
    emitter: &'a Emitter,
}

impl<'a> PayloadRenderer<'a> {
    pub fn new(config: &'a LoggingConfiguration, emitter: &'a Emitter) -> Self {
        Self { config, emitter }
    }

    /// Render a possibly-null value.
    pub fn render(&self, value: Option<&dyn Payload>, context: RenderContext) -> RenderedPayload {
        let Some(value) = value else {
            return RenderedPayload::token(NULL_TOKEN);
        };
        let type_name = short_type_name(value.type_name());
        match value.to_json() {
            Ok(text) => RenderedPayload {
                text,
                type_name: Some(type_name),
            },
            Err(e) => {
                if self.config.should_emit(Severity::Debug) {
                    self.emitter.emit(
                        Severity::Debug,
                        &format!(
                            "Failed to serialize {} of type {}: {}",
                            context.describe(),
                            type_name,
                            e
                        ),
                    );
                }
                RenderedPayload {
                    text: context.sentinel().to_string(),
                    type_name: Some(type_name),
                }
            }
        }
    }

    /// Render the first argument, or `none` if there is none.
    pub fn render_first(&self, args: &[Arg<'_>]) -> RenderedPayload {
        match args.first() {
            Some(first) => self.render(*first, RenderContext::Argument),
            None => RenderedPayload::token(NONE_TOKEN),
        }
    }

    /// Render the whole argument list as `[a, b, ...]`.
    pub fn render_all(&self, args: &[Arg<'_>]) -> String {
        let rendered: Vec<String> = args
            .iter()
            .map(|a| self.render(*a, RenderContext::Argument).text)
            .collect();
        format!("[{}]", rendered.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use serde::ser::Error as _;

    use super::*;
    use crate::interceptor::emitter::CapturingSink;

    #[derive(Serialize)]
    struct Item {
        id: u32,
    }

    struct Broken;

    impl Serialize for Broken {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("cannot encode"))
        }
    }

    fn setup(level: Severity) -> (LoggingConfiguration, Emitter, Arc<CapturingSink>) {
        let sink = Arc::new(CapturingSink::new());
        (
            LoggingConfiguration::new(true, level),
            Emitter::new(sink.clone()),
            sink,
        )
    }

    #[test]
    fn test_null_and_missing_tokens() {
        let (config, emitter, _) = setup(Severity::All);
        let renderer = PayloadRenderer::new(&config, &emitter);

        assert_eq!(renderer.render(None, RenderContext::Argument).text, "null");
        assert_eq!(renderer.render_first(&[]).text, "none");
        assert_eq!(renderer.render_first(&[None]).text, "null");
    }

    #[test]
    fn test_serializes_with_type_name() {
        let (config, emitter, _) = setup(Severity::All);
        let renderer = PayloadRenderer::new(&config, &emitter);

        let rendered = renderer.render(arg(&Item { id: 1 }), RenderContext::Result);
        assert_eq!(rendered.text, r#"{"id":1}"#);
        assert_eq!(rendered.type_label(), "Item");
    }

    #[test]
    fn test_failure_becomes_sentinel_with_diagnostic() {
        let (config, emitter, sink) = setup(Severity::Debug);
        let renderer = PayloadRenderer::new(&config, &emitter);

        let as_arg = renderer.render(arg(&Broken), RenderContext::Argument);
        let as_result = renderer.render(arg(&Broken), RenderContext::Result);

        assert_eq!(as_arg.text, ARGUMENT_SENTINEL);
        assert_eq!(as_result.text, RESULT_SENTINEL);
        assert_ne!(as_arg.text, as_result.text);

        let diagnostics = sink.at(Severity::Debug);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].contains("cannot encode"));
        assert!(diagnostics[0].contains("Broken"));
    }

    #[test]
    fn test_diagnostic_gated_by_debug() {
        let (config, emitter, sink) = setup(Severity::Error);
        let renderer = PayloadRenderer::new(&config, &emitter);

        let rendered = renderer.render(arg(&Broken), RenderContext::Argument);
        assert_eq!(rendered.text, ARGUMENT_SENTINEL);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_non_string_map_keys_fail_softly() {
        let (config, emitter, _) = setup(Severity::None);
        let renderer = PayloadRenderer::new(&config, &emitter);

        let mut map = HashMap::new();
        map.insert((1, 2), "pair");
        assert_eq!(renderer.render(arg(&map), RenderContext::Result).text, RESULT_SENTINEL);
    }

    #[test]
    fn test_render_all_lists_arguments() {
        let (config, emitter, _) = setup(Severity::All);
        let renderer = PayloadRenderer::new(&config, &emitter);

        let id = 7u64;
        let name = "widget";
        let args = [arg(&id), None, arg(&name)];
        assert_eq!(renderer.render_all(&args), r#"[7, null, "widget"]"#);
        assert_eq!(renderer.render_all(&[]), "[]");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("alloc::vec::Vec<app::items::Item>"), "Vec<Item>");
        assert_eq!(short_type_name("&str"), "&str");
        assert_eq!(short_type_name("u64"), "u64");
        assert_eq!(
            short_type_name("std::collections::hash::map::HashMap<alloc::string::String, i32>"),
            "HashMap<String, i32>"
        );
    }
}
