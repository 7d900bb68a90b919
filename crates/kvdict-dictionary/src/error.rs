//! Error types for dictionary construction

use std::io;
use thiserror::Error;

/// Fatal errors while building a dictionary
///
/// Malformed lines are not errors; they are counted in the build report.
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// The line source could not be opened
    #[error("Cannot open dictionary {source_name}: {error}")]
    Open {
        /// Name of the source
        source_name: String,
        /// Underlying I/O failure
        #[source]
        error: io::Error,
    },

    /// Reading failed part-way through the source
    #[error("Error reading dictionary {source_name} at line {line}: {error}")]
    Read {
        /// Name of the source
        source_name: String,
        /// 1-based line number that could not be read
        line: usize,
        /// Underlying I/O failure
        #[source]
        error: io::Error,
    },
}

impl DictionaryError {
    /// Name of the source that failed
    pub fn source_name(&self) -> &str {
        match self {
            DictionaryError::Open { source_name, .. } => source_name,
            DictionaryError::Read { source_name, .. } => source_name,
        }
    }
}
