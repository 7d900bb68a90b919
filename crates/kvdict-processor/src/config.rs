//! Processor configuration
//!
//! Mirrors the options of the `kvdictionary` ingest processor. Definitions can
//! be read from TOML or from an ingest-style JSON processor definition.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path};
use thiserror::Error;

use crate::factory::PROCESSOR_TYPE;
use crate::inline::InlineDictionary;

/// The only charset dictionaries are decoded with
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Processor configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse TOML
    #[error("Failed to parse processor TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize processor TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Failed to parse JSON
    #[error("Failed to parse processor JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// `dictionary_file` does not name a file inside the dictionary directory
    #[error("Invalid dictionary_file \"{name}\": {reason}")]
    InvalidDictionaryFile {
        /// Configured file name
        name: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Configuration of one `kvdictionary` processor
///
/// # Examples
///
/// ```
/// use kvdict_processor::ProcessorConfig;
///
/// let config = ProcessorConfig::from_toml(r#"
///     field = "country_code"
///     target_field = "country_name"
///     dictionary_file = "countries.txt"
///     ignore_case = true
/// "#).unwrap();
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.charset, "UTF-8");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorConfig {
    /// Identifier of this processor instance in logs and errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Field holding the lookup key
    pub field: String,

    /// Field receiving the mapped value
    pub target_field: String,

    /// File name resolved against the dictionary directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary_file: Option<String>,

    /// Case-insensitive keys and lookups
    /// Default: false
    #[serde(default)]
    pub ignore_case: bool,

    /// Requested dictionary charset; anything but UTF-8 is overridden
    #[serde(default = "default_charset")]
    pub charset: String,

    /// Inline entries, applied after the file in definition order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary_json: Option<InlineDictionary>,
}

fn default_charset() -> String {
    DEFAULT_CHARSET.to_string()
}

impl ProcessorConfig {
    /// Create a configuration with no dictionary sources
    pub fn new(field: impl Into<String>, target_field: impl Into<String>) -> Self {
        Self {
            tag: None,
            field: field.into(),
            target_field: target_field.into(),
            dictionary_file: None,
            ignore_case: false,
            charset: default_charset(),
            dictionary_json: None,
        }
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from JSON
    ///
    /// Accepts either the bare option object or one wrapped in the processor
    /// type, as in `{"kvdictionary": {"field": ...}}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value = match serde_json::from_str::<serde_json::Value>(json)? {
            serde_json::Value::Object(mut obj) if obj.len() == 1 && obj.contains_key(PROCESSOR_TYPE) => {
                obj.remove(PROCESSOR_TYPE).unwrap_or_default()
            }
            other => other,
        };
        Ok(serde_json::from_value(value)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field.is_empty() {
            return Err(ConfigError::MissingField("field".to_string()));
        }
        if self.target_field.is_empty() {
            return Err(ConfigError::MissingField("target_field".to_string()));
        }
        if let Some(name) = &self.dictionary_file {
            validate_file_name(name)?;
        }
        Ok(())
    }

    /// Whether at least one dictionary source is configured
    pub fn has_dictionary(&self) -> bool {
        self.dictionary_file.is_some() || self.dictionary_json.is_some()
    }

    /// The requested charset if it is not the supported one
    pub fn charset_override(&self) -> Option<&str> {
        let requested = self.charset.as_str();
        if requested.eq_ignore_ascii_case(DEFAULT_CHARSET) || requested.eq_ignore_ascii_case("UTF8") {
            None
        } else {
            Some(requested)
        }
    }

    /// Name used for this processor in diagnostics
    pub fn display_name(&self) -> &str {
        self.tag.as_deref().unwrap_or(PROCESSOR_TYPE)
    }
}

/// The file must stay inside the dictionary directory
fn validate_file_name(name: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidDictionaryFile {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("file name is empty"));
    }

    let path = Path::new(name);
    if path.is_absolute() {
        return Err(invalid("absolute paths are not allowed"));
    }
    if !path.components().all(|c| matches!(c, Component::Normal(_))) {
        return Err(invalid("must not leave the dictionary directory"));
    }
    Ok(())
}
