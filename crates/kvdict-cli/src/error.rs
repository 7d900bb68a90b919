//! Error types for the CLI application.

use kvdict_processor::{DocumentError, ProcessorError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Pipeline file could not be read
    #[error("Failed to read pipeline file {}: {error}", .path.display())]
    ConfigRead {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        error: std::io::Error,
    },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Pipeline configuration is invalid
    #[error("Invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    /// A processor could not be created
    #[error("Processor #{index} ({name}): {error}")]
    ProcessorSetup {
        /// Position of the processor in the pipeline (0-based)
        index: usize,
        /// Tag or type of the processor
        name: String,
        /// What went wrong
        #[source]
        error: ProcessorError,
    },

    /// A document failed and the failure policy is `fail`
    #[error("Document on line {line} failed: {message}")]
    DocumentFailed {
        /// 1-based input line
        line: usize,
        /// Description of the failure
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Worker task failed
    #[error("Worker error: {0}")]
    Worker(String),
}

/// Per-document failure before it is matched against the failure policy.
#[derive(Debug, Error)]
pub enum DocumentFailure {
    /// Line is not a JSON object
    #[error(transparent)]
    Parse(#[from] DocumentError),

    /// A processor rejected the document
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}
