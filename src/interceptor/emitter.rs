//! Log line formatting and sinks.
//!
//! # Responsibilities
//! - Tag each line with a colored severity label
//! - Hand the finished line to a sink, synchronously
//!
//! # Design Decisions
//! - No buffering or batching: one `emit` is one sink write
//! - The emitter holds no lock; line atomicity belongs to the sink

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use crate::interceptor::severity::Severity;

pub const ANSI_RED: &str = "\u{1b}[31m";
pub const ANSI_GREEN: &str = "\u{1b}[32m";
pub const ANSI_YELLOW: &str = "\u{1b}[33m";
pub const ANSI_BLUE: &str = "\u{1b}[34m";
pub const ANSI_DIM: &str = "\u{1b}[2m";
pub const ANSI_RESET: &str = "\u{1b}[0m";

/// Wrap `text` in `color`, resetting afterwards.
pub fn paint(color: &str, text: impl std::fmt::Display) -> String {
    format!("{color}{text}{ANSI_RESET}")
}

/// Color and label used for a severity tag.
pub fn tag(severity: Severity) -> (&'static str, &'static str) {
    match severity {
        Severity::Error => (ANSI_RED, "[ERROR]"),
        Severity::Warning => (ANSI_YELLOW, "[ WARN]"),
        Severity::Info => (ANSI_BLUE, "[ INFO]"),
        Severity::Debug | Severity::All | Severity::None => (ANSI_DIM, "[DEBUG]"),
    }
}

/// Destination for fully formatted lines.
pub trait LogSink: Send + Sync {
    fn write(&self, severity: Severity, line: &str);

    /// Untagged component lifecycle line, outside the severity policy.
    fn announce(&self, line: &str) {
        tracing::info!(target: "request_logger", "{line}");
    }
}

/// Routes lines through `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, severity: Severity, line: &str) {
        match severity {
            Severity::Error => tracing::error!(target: "request_logger", "{line}"),
            Severity::Warning => tracing::warn!(target: "request_logger", "{line}"),
            Severity::Info => tracing::info!(target: "request_logger", "{line}"),
            Severity::Debug | Severity::All | Severity::None => {
                tracing::debug!(target: "request_logger", "{line}")
            }
        }
    }
}

/// Writes lines straight to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, _severity: Severity, line: &str) {
        let mut out = std::io::stdout().lock();
        // A closed stdout is not worth failing the intercepted call over.
        let _ = writeln!(out, "{line}");
    }

    fn announce(&self, line: &str) {
        self.write(Severity::Info, line);
    }
}

/// Keeps every line in memory. Handy for asserting on output in tests.
#[derive(Debug, Default)]
pub struct CapturingSink {
    lines: Mutex<Vec<(Severity, String)>>,
    announcements: Mutex<Vec<String>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Lines written at `severity`.
    pub fn at(&self, severity: Severity) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, line)| line)
            .collect()
    }

    /// Lifecycle lines, kept apart from the tagged output.
    pub fn announcements(&self) -> Vec<String> {
        self.announcements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for CapturingSink {
    fn write(&self, severity: Severity, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((severity, line.to_string()));
    }

    fn announce(&self, line: &str) {
        self.announcements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}

/// Formats tagged lines and writes them to a sink.
#[derive(Clone)]
pub struct Emitter {
    sink: Arc<dyn LogSink>,
}

impl Emitter {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Emit `message` on the same line as the tag.
    pub fn emit(&self, severity: Severity, message: &str) {
        self.write_tagged(severity, ' ', message);
    }

    /// Emit `message` starting on the line after the tag.
    pub fn emit_block(&self, severity: Severity, message: &str) {
        self.write_tagged(severity, '\n', message);
    }

    /// Write an untagged lifecycle line.
    pub fn announce(&self, message: &str) {
        self.sink.announce(message);
    }

    fn write_tagged(&self, severity: Severity, separator: char, message: &str) {
        let (color, label) = tag(severity);
        let line = format!("{}{separator}{message}", paint(color, label));
        self.sink.write(severity, &line);
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter").finish_non_exhaustive()
    }
}
