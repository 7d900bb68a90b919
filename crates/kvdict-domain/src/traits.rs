//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the lookup logic and whatever
//! hosts it. Implementations live in other crates.

use crate::Diagnostic;

/// Value of a field as seen by the lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Text value
    Text(&'a str),

    /// Field exists and holds an explicit null
    Null,

    /// Field exists but holds a non-text value
    Other {
        /// Kind of value (e.g. "number", "object")
        kind: &'static str,
    },
}

/// A semi-structured record flowing through the pipeline
///
/// Implemented by the host (see `kvdict-processor` for a JSON implementation).
/// Field names are resolved as plain names; nested paths are not interpreted.
pub trait Document {
    /// Error type for field writes
    type Error: std::fmt::Display;

    /// Read a field; `None` means the field does not exist at all
    fn get_field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Write a field; `None` writes an explicit null
    fn set_field(&mut self, name: &str, value: Option<String>) -> Result<(), Self::Error>;
}

/// Receiver for non-fatal diagnostics
///
/// Injected into builders and transforms in place of a global logger. Must be
/// shareable across worker threads.
pub trait DiagnosticSink: Send + Sync {
    /// Record one event
    fn record(&self, diagnostic: &Diagnostic);
}

/// Sink that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn record(&self, _diagnostic: &Diagnostic) {}
}
