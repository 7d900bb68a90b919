//! kvdict Dictionary
//!
//! Builds the immutable lookup dictionary used by the `kvdictionary` processor.
//!
//! # Overview
//!
//! A dictionary can come from two places:
//!
//! - **File source**: newline-delimited `key:value` lines; the first colon
//!   splits key from value
//! - **Inline source**: a key/value map given directly in the processor
//!   configuration
//!
//! Both are optional. Inline entries are merged last and therefore patch
//! individual file entries without editing the file. Malformed file lines are
//! skipped and counted; only a source that cannot be opened or read aborts the
//! build.
//!
//! # Architecture
//!
//! ```text
//! LineSource ─┐
//!             ├→ DictionaryBuilder → Dictionary + BuildReport
//! inline map ─┘          │
//!                        └→ DiagnosticSink (TracingSink by default)
//! ```

#![warn(missing_docs)]

mod builder;
mod error;
mod parser;
mod report;
mod sink;
mod source;

pub use builder::{BuiltDictionary, DictionaryBuilder};
pub use error::DictionaryError;
pub use parser::parse_line;
pub use report::BuildReport;
pub use sink::TracingSink;
pub use source::{FileSource, LineSource, Lines, MemorySource};
