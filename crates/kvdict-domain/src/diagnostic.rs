//! Diagnostic events emitted during dictionary construction and lookup
//!
//! None of these are errors. They are handed to a [`DiagnosticSink`] so the
//! embedding application decides where they go.
//!
//! [`DiagnosticSink`]: crate::traits::DiagnosticSink

use std::fmt;

/// Why a document was passed through without touching the target field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Source field is present with a null value
    NullValue,

    /// Source field holds something other than text
    NotText {
        /// Kind of value found (e.g. "number", "array")
        kind: &'static str,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NullValue => write!(f, "value is null"),
            SkipReason::NotText { kind } => write!(f, "value is a {} instead of text", kind),
        }
    }
}

/// A non-fatal event worth reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Neither a file nor an inline dictionary was configured
    NoDictionaryConfigured,

    /// A charset other than the supported one was requested
    CharsetOverridden {
        /// Charset named in the configuration
        requested: String,
        /// Charset actually used
        applied: String,
    },

    /// A dictionary line did not match `key:value`
    MalformedLine {
        /// Source the line came from
        source: String,
        /// 1-based line number
        line_number: usize,
        /// The offending line
        line: String,
    },

    /// Summary of all malformed lines for one source
    MalformedLinesSkipped {
        /// Source the lines came from
        source: String,
        /// How many lines were skipped
        count: usize,
    },

    /// The merged dictionary has no entries even though a source was configured
    EmptyDictionary,

    /// Construction finished
    DictionaryLoaded {
        /// Number of entries in the merged dictionary
        entries: usize,
    },

    /// A document was passed through without a lookup
    DocumentSkipped {
        /// Source field that was read
        field: String,
        /// Why the lookup did not happen
        reason: SkipReason,
    },
}
