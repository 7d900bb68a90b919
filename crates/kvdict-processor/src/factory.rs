//! Processor factory
//!
//! Turns a [`ProcessorConfig`] into a ready [`LookupTransform`]. All I/O happens
//! here, before the transform is handed to any worker.

use crate::config::{ProcessorConfig, DEFAULT_CHARSET};
use crate::error::ProcessorError;
use crate::inline::InlineDictionary;
use crate::transform::{LookupTransform, TransformConfig};
use kvdict_dictionary::{DictionaryBuilder, FileSource, LineSource, TracingSink};
use kvdict_domain::{Diagnostic, DiagnosticSink};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error};

/// Registered type name of the processor
pub const PROCESSOR_TYPE: &str = "kvdictionary";

/// Creates `kvdictionary` processors whose dictionary files live in one directory
///
/// # Examples
///
/// ```no_run
/// use kvdict_processor::{ProcessorConfig, ProcessorFactory};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let factory = ProcessorFactory::new("/etc/kvdict/dictionaries");
/// let config = ProcessorConfig::from_toml(r#"
///     field = "code"
///     target_field = "name"
///     dictionary_file = "countries.txt"
/// "#)?;
///
/// let transform = factory.create(&config)?;
/// println!("{} entries", transform.dictionary().len());
/// # Ok(())
/// # }
/// ```
pub struct ProcessorFactory {
    dictionary_dir: PathBuf,
    sink: Arc<dyn DiagnosticSink>,
}

impl ProcessorFactory {
    /// Create a factory resolving dictionary files against `dictionary_dir`
    pub fn new(dictionary_dir: impl Into<PathBuf>) -> Self {
        Self {
            dictionary_dir: dictionary_dir.into(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the diagnostic sink handed to builders and transforms
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Directory dictionary files are resolved against
    pub fn dictionary_dir(&self) -> &Path {
        &self.dictionary_dir
    }

    /// Build a processor from its configuration
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or the dictionary file cannot be
    /// opened or read. Malformed dictionary lines only produce diagnostics.
    pub fn create(&self, config: &ProcessorConfig) -> Result<LookupTransform, ProcessorError> {
        config.validate()?;

        if let Some(requested) = config.charset_override() {
            self.sink.record(&Diagnostic::CharsetOverridden {
                requested: requested.to_string(),
                applied: DEFAULT_CHARSET.to_string(),
            });
        }

        debug!(
            processor = %config.display_name(),
            field = %config.field,
            target_field = %config.target_field,
            dictionary_file = ?config.dictionary_file,
            ignore_case = config.ignore_case,
            "Initializing dictionary"
        );

        let file = config
            .dictionary_file
            .as_deref()
            .map(|name| FileSource::in_directory(&self.dictionary_dir, name));

        let built = DictionaryBuilder::new(config.ignore_case)
            .with_sink(Arc::clone(&self.sink))
            .build(
                file.as_ref().map(|f| f as &dyn LineSource),
                config.dictionary_json.as_ref().map(InlineDictionary::entries),
            )
            .map_err(|e| {
                error!(
                    processor = %config.display_name(),
                    source = %e.source_name(),
                    "Cannot instantiate dictionary"
                );
                e
            })?;

        let transform_config = TransformConfig::new(
            config.field.clone(),
            config.target_field.clone(),
            config.ignore_case,
        );

        Ok(LookupTransform::from_built(transform_config, built)?
            .with_tag(config.tag.clone())
            .with_sink(Arc::clone(&self.sink)))
    }
}
