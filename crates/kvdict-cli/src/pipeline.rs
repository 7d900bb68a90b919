//! NDJSON pipeline driver.
//!
//! Processors are built once, up front. Only after every dictionary has loaded
//! is the pipeline shared with workers, and from then on it is read-only.

use crate::config::{FailurePolicy, PipelineConfig};
use crate::error::{CliError, DocumentFailure, Result};
use crate::stats::PipelineStats;
use kvdict_processor::{JsonDocument, LookupTransform, ProcessorFactory};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// Output of one batch: serialized documents plus the batch's counters
#[derive(Debug, Default)]
pub struct BatchOutput {
    /// Documents to write, in input order
    pub lines: Vec<String>,
    /// Counters for this batch
    pub stats: PipelineStats,
}

/// Ordered list of processors plus the failure policy
#[derive(Debug)]
pub struct Pipeline {
    transforms: Vec<LookupTransform>,
    on_failure: FailurePolicy,
}

impl Pipeline {
    /// Build every processor of the pipeline.
    ///
    /// Fails on the first processor whose configuration is invalid or whose
    /// dictionary file cannot be read.
    pub fn build(config: &PipelineConfig) -> Result<Self> {
        let factory = ProcessorFactory::new(&config.dictionary_dir);
        let transforms = config
            .processors
            .iter()
            .enumerate()
            .map(|(index, processor)| {
                factory.create(processor).map_err(|error| CliError::ProcessorSetup {
                    index,
                    name: processor.display_name().to_string(),
                    error,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            processors = transforms.len(),
            dictionary_dir = %config.dictionary_dir.display(),
            "Pipeline ready"
        );

        Ok(Self::new(transforms, config.on_failure))
    }

    /// Create a pipeline from already-built transforms
    pub fn new(transforms: Vec<LookupTransform>, on_failure: FailurePolicy) -> Self {
        Self {
            transforms,
            on_failure,
        }
    }

    /// The processors, in order
    pub fn transforms(&self) -> &[LookupTransform] {
        &self.transforms
    }

    /// Run one NDJSON line through every processor.
    ///
    /// Returns the line to emit, or `None` if the document was dropped.
    pub fn process_line(
        &self,
        line_number: usize,
        line: &str,
        stats: &mut PipelineStats,
    ) -> Result<Option<String>> {
        stats.documents_in += 1;

        match self.apply(line, stats) {
            Ok(doc) => {
                stats.documents_out += 1;
                Ok(Some(doc.to_json_line()))
            }
            Err(failure) => {
                stats.failed += 1;
                match self.on_failure {
                    FailurePolicy::Fail => Err(CliError::DocumentFailed {
                        line: line_number,
                        message: failure.to_string(),
                    }),
                    FailurePolicy::Skip => {
                        warn!(line = line_number, error = %failure, "Dropping document");
                        Ok(None)
                    }
                    FailurePolicy::Keep => {
                        warn!(line = line_number, error = %failure, "Passing document through unchanged");
                        stats.documents_out += 1;
                        Ok(Some(line.to_string()))
                    }
                }
            }
        }
    }

    fn apply(
        &self,
        line: &str,
        stats: &mut PipelineStats,
    ) -> std::result::Result<JsonDocument, DocumentFailure> {
        let mut doc = JsonDocument::parse(line)?;
        for transform in &self.transforms {
            let outcome = transform.execute(&mut doc)?;
            stats.record(transform.name(), outcome);
        }
        Ok(doc)
    }

    /// Run a batch of `(line_number, line)` pairs.
    pub fn process_batch(&self, batch: &[(usize, String)]) -> Result<BatchOutput> {
        let mut output = BatchOutput::default();
        for (line_number, line) in batch {
            if let Some(out) = self.process_line(*line_number, line, &mut output.stats)? {
                output.lines.push(out);
            }
        }
        Ok(output)
    }
}

/// Process all lines on blocking worker tasks, at most `workers` batches at a time.
///
/// Blank lines are ignored. Output keeps input order.
pub async fn run_batches(
    pipeline: Arc<Pipeline>,
    input: &str,
    batch_size: usize,
    workers: usize,
) -> Result<BatchOutput> {
    let numbered: Vec<(usize, String)> = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, line.to_string()))
        .collect();

    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let mut handles = Vec::new();

    for chunk in numbered.chunks(batch_size.max(1)) {
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .map_err(|e| CliError::Worker(e.to_string()))?;
        let pipeline = Arc::clone(&pipeline);
        let batch = chunk.to_vec();

        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            pipeline.process_batch(&batch)
        }));
    }

    let mut combined = BatchOutput::default();
    for handle in handles {
        let batch = handle
            .await
            .map_err(|e| CliError::Worker(e.to_string()))??;
        combined.lines.extend(batch.lines);
        combined.stats.merge(&batch.stats);
    }

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvdict_processor::{Dictionary, DictionaryEntry, ProcessorConfig, TransformConfig};

    fn pipeline(on_failure: FailurePolicy) -> Pipeline {
        let mut config = ProcessorConfig::new("code", "name");
        config.ignore_case = true;
        config.dictionary_json = Some([("es", "Spain"), ("fr", "France")].into_iter().collect());
        let transform = ProcessorFactory::new(".").create(&config).unwrap();
        Pipeline::new(vec![transform], on_failure)
    }

    fn dictionary(pairs: &[(&str, &str)]) -> Dictionary {
        Dictionary::from_entries(pairs.iter().map(|(k, v)| DictionaryEntry::new(*k, *v)), false)
    }

    #[test]
    fn test_process_line_matches() {
        let pipeline = pipeline(FailurePolicy::Fail);
        let mut stats = PipelineStats::new();

        let out = pipeline.process_line(1, r#"{"code":"ES"}"#, &mut stats).unwrap();
        assert_eq!(out.as_deref(), Some(r#"{"code":"ES","name":"Spain"}"#));
        assert_eq!(stats.by_processor["kvdictionary"].matched, 1);
    }

    #[test]
    fn test_failure_policies() {
        let missing = r#"{"other":"x"}"#;

        let mut stats = PipelineStats::new();
        let err = pipeline(FailurePolicy::Fail)
            .process_line(7, missing, &mut stats)
            .unwrap_err();
        assert!(matches!(err, CliError::DocumentFailed { line: 7, .. }));

        let mut stats = PipelineStats::new();
        let out = pipeline(FailurePolicy::Skip).process_line(1, missing, &mut stats).unwrap();
        assert_eq!(out, None);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.dropped(), 1);

        let mut stats = PipelineStats::new();
        let out = pipeline(FailurePolicy::Keep)
            .process_line(1, "not json", &mut stats)
            .unwrap();
        assert_eq!(out.as_deref(), Some("not json"));
        assert_eq!(stats.documents_out, 1);
    }

    #[test]
    fn test_processors_chain_in_order() {
        let first = LookupTransform::new(
            TransformConfig::new("a", "b", false),
            dictionary(&[("1", "one")]),
        )
        .unwrap()
        .with_tag(Some("first".to_string()));
        let second = LookupTransform::new(
            TransformConfig::new("b", "c", false),
            dictionary(&[("one", "uno")]),
        )
        .unwrap()
        .with_tag(Some("second".to_string()));
        let pipeline = Pipeline::new(vec![first, second], FailurePolicy::Fail);

        let mut stats = PipelineStats::new();
        let out = pipeline.process_line(1, r#"{"a":"1"}"#, &mut stats).unwrap();
        assert_eq!(out.as_deref(), Some(r#"{"a":"1","b":"one","c":"uno"}"#));
        assert_eq!(stats.by_processor["second"].matched, 1);
    }

    #[tokio::test]
    async fn test_run_batches_preserves_order() {
        let pipeline = Arc::new(pipeline(FailurePolicy::Skip));
        let input: String = (0..50)
            .map(|i| {
                let code = if i % 2 == 0 { "es" } else { "FR" };
                format!("{{\"id\":{},\"code\":\"{}\"}}\n", i, code)
            })
            .collect();

        let output = run_batches(pipeline, &input, 7, 3).await.unwrap();
        assert_eq!(output.lines.len(), 50);
        for (i, line) in output.lines.iter().enumerate() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["id"], i);
            let expected = if i % 2 == 0 { "Spain" } else { "France" };
            assert_eq!(value["name"], expected);
        }
        assert_eq!(output.stats.documents_in, 50);
        assert_eq!(output.stats.by_processor["kvdictionary"].matched, 50);
    }

    #[tokio::test]
    async fn test_run_batches_stops_on_failure() {
        let pipeline = Arc::new(pipeline(FailurePolicy::Fail));
        let input = "{\"code\":\"es\"}\n\n{\"nope\":1}\n";
        let err = run_batches(pipeline, input, 1, 2).await.unwrap_err();
        assert!(matches!(err, CliError::DocumentFailed { line: 3, .. }));
    }
}
