//! Pipeline configuration.
//!
//! A pipeline file lists the processors to run in order plus the settings the
//! driver needs: where dictionary files live, what to do with failing
//! documents, and how much parallelism to use.
//!
//! ```toml
//! dictionary_dir = "dictionaries"
//! on_failure = "skip"
//! workers = 4
//! batch_size = 500
//!
//! [[processors]]
//! field = "country_code"
//! target_field = "country_name"
//! dictionary_file = "countries.txt"
//! ignore_case = true
//! ```

use crate::error::{CliError, Result};
use kvdict_processor::ProcessorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do with a document a processor rejects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the run
    #[default]
    Fail,
    /// Drop the document
    Skip,
    /// Emit the document as it was read
    Keep,
}

/// Pipeline definition loaded from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory `dictionary_file` names are resolved against
    #[serde(default = "default_dictionary_dir")]
    pub dictionary_dir: PathBuf,

    /// Per-document failure policy
    #[serde(default)]
    pub on_failure: FailurePolicy,

    /// Number of batches processed concurrently
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Documents per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Processors, applied in order
    #[serde(default)]
    pub processors: Vec<ProcessorConfig>,
}

fn default_dictionary_dir() -> PathBuf {
    PathBuf::from("dictionaries")
}

fn default_workers() -> usize {
    4
}

fn default_batch_size() -> usize {
    1000
}

impl PipelineConfig {
    /// Load a pipeline from a TOML file.
    ///
    /// A relative `dictionary_dir` is resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|error| CliError::ConfigRead {
            path: path.to_path_buf(),
            error,
        })?;
        let mut config = Self::from_toml(&contents)?;

        if config.dictionary_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.dictionary_dir = parent.join(&config.dictionary_dir);
            }
        }

        Ok(config)
    }

    /// Parse a pipeline from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Validate driver settings and every processor definition.
    pub fn validate(&self) -> Result<()> {
        if self.processors.is_empty() {
            return Err(CliError::InvalidConfig(
                "at least one [[processors]] entry is required".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(CliError::InvalidConfig("workers must be greater than 0".to_string()));
        }
        if self.batch_size == 0 {
            return Err(CliError::InvalidConfig("batch_size must be greater than 0".to_string()));
        }
        for (index, processor) in self.processors.iter().enumerate() {
            processor.validate().map_err(|e| CliError::ProcessorSetup {
                index,
                name: processor.display_name().to_string(),
                error: e.into(),
            })?;
        }
        Ok(())
    }
}
