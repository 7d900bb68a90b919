//! kvdict Processor
//!
//! The `kvdictionary` ingest processor: reads one field of a document, looks it
//! up in a static dictionary and writes the mapped value into another field.
//!
//! # Overview
//!
//! - [`ProcessorConfig`] holds the options (`field`, `target_field`,
//!   `dictionary_file`, `dictionary_json`, `ignore_case`, `charset`)
//! - [`ProcessorFactory`] builds the dictionary once and returns a
//!   [`LookupTransform`]
//! - [`LookupTransform::execute`] runs per document and is safe to call from
//!   many threads at once
//! - [`JsonDocument`] adapts a JSON object to the [`Document`] trait
//!
//! # Example Usage
//!
//! ```
//! use kvdict_processor::{JsonDocument, LookupOutcome, ProcessorConfig, ProcessorFactory};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProcessorConfig::from_json(r#"{
//!     "kvdictionary": {
//!         "field": "input",
//!         "target_field": "output",
//!         "ignore_case": true,
//!         "dictionary_json": { "Input1": "translated_Input1" }
//!     }
//! }"#)?;
//!
//! let transform = ProcessorFactory::new(".").create(&config)?;
//!
//! let mut doc = JsonDocument::parse(r#"{"input": "INPUT1"}"#)?;
//! assert_eq!(transform.execute(&mut doc)?, LookupOutcome::Matched);
//! assert_eq!(doc.to_json_line(), r#"{"input":"INPUT1","output":"translated_Input1"}"#);
//! # Ok(())
//! # }
//! ```
//!
//! [`Document`]: kvdict_domain::Document

#![warn(missing_docs)]

mod config;
mod document;
mod error;
mod factory;
mod inline;
mod transform;

pub use config::{ConfigError, ProcessorConfig, DEFAULT_CHARSET};
pub use document::{DocumentError, JsonDocument};
pub use error::ProcessorError;
pub use factory::{ProcessorFactory, PROCESSOR_TYPE};
pub use inline::InlineDictionary;
pub use transform::{LookupOutcome, LookupTransform, TransformConfig};

pub use kvdict_dictionary::{BuildReport, TracingSink};
pub use kvdict_domain::{
    Diagnostic, DiagnosticSink, Dictionary, DictionaryEntry, Document, FieldValue, SkipReason,
};
