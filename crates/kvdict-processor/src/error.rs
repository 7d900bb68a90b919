//! Error types for the processor

use crate::config::ConfigError;
use kvdict_dictionary::DictionaryError;
use thiserror::Error;

/// Errors raised while creating or running a `kvdictionary` processor
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// Invalid processor configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Dictionary source could not be read; aborts processor creation
    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    /// Dictionary was built with a different case policy than the transform
    #[error("Dictionary ignore_case={dictionary} does not match processor ignore_case={processor}")]
    CasePolicyMismatch {
        /// Case policy of the processor configuration
        processor: bool,
        /// Case policy the dictionary was built with
        dictionary: bool,
    },

    /// Source field does not exist on the document
    #[error("[{processor}] field [{field}] not present in document")]
    MissingField {
        /// Tag or type of the processor
        processor: String,
        /// Missing field
        field: String,
    },

    /// Writing the target field failed
    #[error("[{processor}] cannot write field [{field}]: {message}")]
    Document {
        /// Tag or type of the processor
        processor: String,
        /// Target field
        field: String,
        /// Error reported by the document
        message: String,
    },
}

impl ProcessorError {
    /// Whether this error concerns a single document rather than the processor setup
    pub fn is_per_document(&self) -> bool {
        matches!(
            self,
            ProcessorError::MissingField { .. } | ProcessorError::Document { .. }
        )
    }
}
