//! kvdict Domain Layer
//!
//! Core model for the dictionary-lookup ingest processor. This crate has ZERO
//! external dependencies: it defines the value objects and the trait
//! interfaces that the infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **Dictionary**: immutable mapping from normalized key to value, built once
//! - **Normalization**: case folding applied to keys and lookup input when
//!   `ignore_case` is enabled; values are never normalized
//! - **Document**: external record exposing get/set by field name
//! - **Diagnostic**: non-fatal events reported to an injected sink instead of a
//!   process-wide logger
//!
//! ## Architecture
//!
//! ```text
//! raw sources → DictionaryBuilder → Dictionary → LookupTransform → Document
//! ```
//!
//! Builders and transforms live in other crates; this crate only fixes the
//! shapes they exchange.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod diagnostic;
pub mod dictionary;
pub mod normalize;
pub mod traits;

// Re-exports for convenience
pub use diagnostic::{Diagnostic, SkipReason};
pub use dictionary::{Dictionary, DictionaryEntry};
pub use normalize::normalize;
pub use traits::{DiagnosticSink, Document, FieldValue, NoopSink};
