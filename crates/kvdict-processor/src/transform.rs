//! The per-document lookup

use crate::error::ProcessorError;
use crate::factory::PROCESSOR_TYPE;
use kvdict_dictionary::{BuildReport, BuiltDictionary, TracingSink};
use kvdict_domain::{
    normalize, Diagnostic, DiagnosticSink, Dictionary, Document, FieldValue, SkipReason,
};
use std::sync::Arc;

/// Field names and case policy of a transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    /// Field holding the lookup key
    pub source_field: String,

    /// Field receiving the mapped value
    pub target_field: String,

    /// Case-insensitive lookups
    pub ignore_case: bool,
}

impl TransformConfig {
    /// Create a new transform configuration
    pub fn new(
        source_field: impl Into<String>,
        target_field: impl Into<String>,
        ignore_case: bool,
    ) -> Self {
        Self {
            source_field: source_field.into(),
            target_field: target_field.into(),
            ignore_case,
        }
    }
}

/// What `execute` did with a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Key found; target field set to the mapped value
    Matched,

    /// Key not found; target field set to null
    Unmatched,

    /// Source value was null or not text; target field left untouched
    Skipped(SkipReason),
}

/// Dictionary lookup applied to one document at a time
///
/// Immutable after construction: `execute` takes `&self`, so a single
/// transform wrapped in an `Arc` can serve any number of worker threads.
///
/// # Examples
///
/// ```
/// use kvdict_domain::{Dictionary, DictionaryEntry};
/// use kvdict_processor::{JsonDocument, LookupOutcome, LookupTransform, TransformConfig};
///
/// let dictionary = Dictionary::from_entries(
///     vec![DictionaryEntry::new("Input1", "translated_Input1")],
///     true,
/// );
/// let transform = LookupTransform::new(TransformConfig::new("input", "output", true), dictionary).unwrap();
///
/// let mut doc = JsonDocument::parse(r#"{"input": "INPUT1"}"#).unwrap();
/// assert_eq!(transform.execute(&mut doc).unwrap(), LookupOutcome::Matched);
/// assert_eq!(doc.get("output").and_then(|v| v.as_str()), Some("translated_Input1"));
/// ```
pub struct LookupTransform {
    tag: Option<String>,
    config: TransformConfig,
    dictionary: Dictionary,
    report: Option<BuildReport>,
    sink: Arc<dyn DiagnosticSink>,
}

impl LookupTransform {
    /// Create a transform over an already-built dictionary
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::CasePolicyMismatch`] if the dictionary keys were
    /// normalized with a different `ignore_case` than the configuration.
    pub fn new(config: TransformConfig, dictionary: Dictionary) -> Result<Self, ProcessorError> {
        if config.ignore_case != dictionary.ignore_case() {
            return Err(ProcessorError::CasePolicyMismatch {
                processor: config.ignore_case,
                dictionary: dictionary.ignore_case(),
            });
        }

        Ok(Self {
            tag: None,
            config,
            dictionary,
            report: None,
            sink: Arc::new(TracingSink),
        })
    }

    /// Create a transform from a builder result, keeping its report
    pub fn from_built(config: TransformConfig, built: BuiltDictionary) -> Result<Self, ProcessorError> {
        let mut transform = Self::new(config, built.dictionary)?;
        transform.report = Some(built.report);
        Ok(transform)
    }

    /// Set the processor tag
    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }

    /// Replace the diagnostic sink
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Look up the source field and write the target field
    ///
    /// - source field missing: [`ProcessorError::MissingField`]
    /// - source value null or not text: nothing is written
    /// - key found: target set to the value
    /// - key not found: target set to an explicit null
    pub fn execute<D>(&self, document: &mut D) -> Result<LookupOutcome, ProcessorError>
    where
        D: Document + ?Sized,
    {
        let value = match document.get_field(&self.config.source_field) {
            None => {
                return Err(ProcessorError::MissingField {
                    processor: self.name().to_string(),
                    field: self.config.source_field.clone(),
                });
            }
            Some(FieldValue::Null) => return Ok(self.skip(SkipReason::NullValue)),
            Some(FieldValue::Other { kind }) => return Ok(self.skip(SkipReason::NotText { kind })),
            Some(FieldValue::Text(content)) => {
                let key = normalize(content, self.config.ignore_case);
                self.dictionary.get(&key).map(str::to_owned)
            }
        };

        let outcome = if value.is_some() {
            LookupOutcome::Matched
        } else {
            LookupOutcome::Unmatched
        };

        document
            .set_field(&self.config.target_field, value)
            .map_err(|e| ProcessorError::Document {
                processor: self.name().to_string(),
                field: self.config.target_field.clone(),
                message: e.to_string(),
            })?;

        Ok(outcome)
    }

    fn skip(&self, reason: SkipReason) -> LookupOutcome {
        self.sink.record(&Diagnostic::DocumentSkipped {
            field: self.config.source_field.clone(),
            reason,
        });
        LookupOutcome::Skipped(reason)
    }

    /// Tag if set, otherwise the processor type
    pub fn name(&self) -> &str {
        self.tag.as_deref().unwrap_or(PROCESSOR_TYPE)
    }

    /// Processor tag
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Field names and case policy
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// The dictionary consulted by `execute`
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Build report, when created through the builder
    pub fn report(&self) -> Option<&BuildReport> {
        self.report.as_ref()
    }
}

impl std::fmt::Debug for LookupTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupTransform")
            .field("tag", &self.tag)
            .field("config", &self.config)
            .field("entries", &self.dictionary.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::JsonDocument;
    use kvdict_domain::DictionaryEntry;
    use serde_json::json;
    use std::sync::Mutex;

    fn keys_capitalized() -> Vec<&'static str> {
        vec!["Input1", "Input2", "Input3", "Input4", "Input5"]
    }

    fn transform(ignore_case: bool) -> LookupTransform {
        let entries = keys_capitalized()
            .into_iter()
            .map(|k| DictionaryEntry::new(k, format!("translated_{}", k)));
        let dictionary = Dictionary::from_entries(entries, ignore_case);
        LookupTransform::new(TransformConfig::new("input", "output", ignore_case), dictionary).unwrap()
    }

    fn doc(value: serde_json::Value) -> JsonDocument {
        JsonDocument::from_value(json!({ "input": value })).unwrap()
    }

    #[test]
    fn test_replace_case_sensitive_found() {
        let transform = transform(false);
        for key in keys_capitalized() {
            let mut document = doc(json!(key));
            assert_eq!(transform.execute(&mut document).unwrap(), LookupOutcome::Matched);
            assert_eq!(document.get("output"), Some(&json!(format!("translated_{}", key))));
        }
    }

    #[test]
    fn test_replace_case_sensitive_not_found() {
        let transform = transform(false);
        let mut document = doc(json!("INPUT2"));

        assert_eq!(transform.execute(&mut document).unwrap(), LookupOutcome::Unmatched);
        // Explicit null distinguishes "ran, no match" from "never ran"
        assert_eq!(document.get("output"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn test_replace_case_insensitive() {
        let transform = transform(true);
        let mut document = doc(json!("INPUT3"));

        assert_eq!(transform.execute(&mut document).unwrap(), LookupOutcome::Matched);
        assert_eq!(document.get("output"), Some(&json!("translated_Input3")));
    }

    #[test]
    fn test_replace_case_insensitive_not_found() {
        let transform = transform(true);
        let mut document = doc(json!("inexistent1"));

        assert_eq!(transform.execute(&mut document).unwrap(), LookupOutcome::Unmatched);
        assert_eq!(document.get("output"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn test_missing_source_field_is_an_error() {
        let transform = transform(false).with_tag(Some("colors".to_string()));
        assert_eq!(transform.config().source_field, "input");
        let mut document = JsonDocument::from_value(json!({ "other": "Input1" })).unwrap();

        let err = transform.execute(&mut document).unwrap_err();
        assert!(err.is_per_document());
        assert_eq!(err.to_string(), "[colors] field [input] not present in document");
        assert_eq!(document.get("output"), None);
    }

    #[test]
    fn test_null_and_non_text_values_are_skipped() {
        let transform = transform(false);

        let mut document = doc(serde_json::Value::Null);
        assert_eq!(
            transform.execute(&mut document).unwrap(),
            LookupOutcome::Skipped(SkipReason::NullValue)
        );
        assert_eq!(document.get("output"), None);

        let mut document = doc(json!(42));
        assert_eq!(
            transform.execute(&mut document).unwrap(),
            LookupOutcome::Skipped(SkipReason::NotText { kind: "number" })
        );
        assert_eq!(document.get("output"), None);
    }

    #[test]
    fn test_skip_is_reported_to_sink() {
        #[derive(Default)]
        struct Recorder(Mutex<Vec<Diagnostic>>);
        impl DiagnosticSink for Recorder {
            fn record(&self, diagnostic: &Diagnostic) {
                self.0.lock().unwrap().push(diagnostic.clone());
            }
        }

        let recorder = Arc::new(Recorder::default());
        let transform = transform(false).with_sink(recorder.clone());
        let mut document = doc(json!(["a", "b"]));
        transform.execute(&mut document).unwrap();

        let events = recorder.0.lock().unwrap();
        assert_eq!(
            *events,
            vec![Diagnostic::DocumentSkipped {
                field: "input".to_string(),
                reason: SkipReason::NotText { kind: "array" },
            }]
        );
    }

    #[test]
    fn test_existing_target_is_overwritten() {
        let transform = transform(false);
        let mut document = JsonDocument::from_value(json!({ "input": "nope", "output": "stale" })).unwrap();
        transform.execute(&mut document).unwrap();
        assert_eq!(document.get("output"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn test_source_and_target_may_be_the_same_field() {
        let dictionary = Dictionary::from_entries(vec![DictionaryEntry::new("a", "b")], false);
        let transform =
            LookupTransform::new(TransformConfig::new("code", "code", false), dictionary).unwrap();
        let mut document = JsonDocument::from_value(json!({ "code": "a" })).unwrap();

        transform.execute(&mut document).unwrap();
        assert_eq!(document.get("code"), Some(&json!("b")));
    }

    #[test]
    fn test_case_policy_mismatch_rejected() {
        let dictionary = Dictionary::empty(false);
        let result = LookupTransform::new(TransformConfig::new("a", "b", true), dictionary);
        assert!(matches!(
            result,
            Err(ProcessorError::CasePolicyMismatch { processor: true, dictionary: false })
        ));
    }

    #[test]
    fn test_transform_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LookupTransform>();
    }
}
