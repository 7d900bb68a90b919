//! Merge file and inline sources into one dictionary

use crate::error::DictionaryError;
use crate::parser::parse_line;
use crate::report::BuildReport;
use crate::sink::TracingSink;
use crate::source::LineSource;
use kvdict_domain::{normalize, Diagnostic, DiagnosticSink, Dictionary, DictionaryEntry};
use std::collections::HashSet;
use std::sync::Arc;

/// A built dictionary together with its build report
#[derive(Debug, Clone)]
pub struct BuiltDictionary {
    /// The merged, immutable dictionary
    pub dictionary: Dictionary,

    /// What happened while building it
    pub report: BuildReport,
}

/// Builds a [`Dictionary`] from an optional file source and optional inline entries
///
/// File lines are applied first and inline entries second, so an inline entry
/// replaces a file entry with the same normalized key. Inline entries are
/// applied in the order given. The same case policy applies to both sources.
///
/// # Examples
///
/// ```
/// use kvdict_dictionary::{DictionaryBuilder, MemorySource};
/// use kvdict_domain::DictionaryEntry;
///
/// let file = MemorySource::new("colors.txt", ["red:rot", "green:grün"]);
/// let inline = vec![DictionaryEntry::new("RED", "rouge")];
///
/// let built = DictionaryBuilder::new(true)
///     .build(Some(&file), Some(&inline))
///     .unwrap();
///
/// assert_eq!(built.dictionary.lookup("Red"), Some("rouge"));
/// assert_eq!(built.report.overridden_entries, 1);
/// ```
pub struct DictionaryBuilder {
    ignore_case: bool,
    sink: Arc<dyn DiagnosticSink>,
}

impl DictionaryBuilder {
    /// Create a builder reporting to [`TracingSink`]
    pub fn new(ignore_case: bool) -> Self {
        Self {
            ignore_case,
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the diagnostic sink
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Build the merged dictionary
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError`] if the file source cannot be opened or a
    /// line cannot be read. Malformed lines are skipped and counted instead.
    pub fn build(
        &self,
        file: Option<&dyn LineSource>,
        inline: Option<&[DictionaryEntry]>,
    ) -> Result<BuiltDictionary, DictionaryError> {
        let mut report = BuildReport {
            configured: file.is_some() || inline.is_some(),
            ..BuildReport::default()
        };

        if !report.configured {
            self.sink.record(&Diagnostic::NoDictionaryConfigured);
            self.sink.record(&Diagnostic::DictionaryLoaded { entries: 0 });
            return Ok(BuiltDictionary {
                dictionary: Dictionary::empty(self.ignore_case),
                report,
            });
        }

        let mut entries = Vec::new();

        if let Some(source) = file {
            report.file_source = Some(source.name().to_string());
            self.read_file(source, &mut entries, &mut report)?;
        }

        if let Some(inline) = inline {
            let file_keys: HashSet<String> = entries
                .iter()
                .map(|e: &DictionaryEntry| normalize(&e.key, self.ignore_case).into_owned())
                .collect();
            let mut overridden = HashSet::new();

            for entry in inline {
                let normalized = normalize(&entry.key, self.ignore_case);
                if file_keys.contains(normalized.as_ref()) {
                    overridden.insert(normalized.into_owned());
                }
                entries.push(entry.clone());
            }

            report.inline_entries = inline.len();
            report.overridden_entries = overridden.len();
        }

        let dictionary = Dictionary::from_entries(entries, self.ignore_case);
        report.total_entries = dictionary.len();

        if dictionary.is_empty() {
            self.sink.record(&Diagnostic::EmptyDictionary);
        }
        self.sink.record(&Diagnostic::DictionaryLoaded {
            entries: dictionary.len(),
        });

        Ok(BuiltDictionary { dictionary, report })
    }

    /// Read every line of the file source, appending well-formed entries
    fn read_file(
        &self,
        source: &dyn LineSource,
        entries: &mut Vec<DictionaryEntry>,
        report: &mut BuildReport,
    ) -> Result<(), DictionaryError> {
        let lines = source.open().map_err(|error| DictionaryError::Open {
            source_name: source.name().to_string(),
            error,
        })?;

        for (idx, line) in lines.enumerate() {
            let line = line.map_err(|error| DictionaryError::Read {
                source_name: source.name().to_string(),
                line: idx + 1,
                error,
            })?;

            match parse_line(&line) {
                Some((key, value)) => {
                    entries.push(DictionaryEntry::new(key, value));
                    report.file_entries += 1;
                }
                None => {
                    report.malformed_lines += 1;
                    self.sink.record(&Diagnostic::MalformedLine {
                        source: source.name().to_string(),
                        line_number: idx + 1,
                        line: line.clone(),
                    });
                }
            }
        }

        if report.malformed_lines > 0 {
            self.sink.record(&Diagnostic::MalformedLinesSkipped {
                source: source.name().to_string(),
                count: report.malformed_lines,
            });
        }

        Ok(())
    }
}
