//! Diagnostic sink backed by `tracing`

use kvdict_domain::{Diagnostic, DiagnosticSink};
use tracing::{debug, trace, warn};

/// Forwards diagnostics to `tracing` at a level chosen per event
///
/// Individual malformed lines go to debug so a large broken file does not
/// flood the logs; the per-source summary goes to warn.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::NoDictionaryConfigured => {
                warn!("No dictionaries defined. This processor does nothing.");
            }
            Diagnostic::CharsetOverridden { requested, applied } => {
                warn!(
                    requested = %requested,
                    applied = %applied,
                    "Charset not supported, using default"
                );
            }
            Diagnostic::MalformedLine { source, line_number, line } => {
                debug!(
                    source = %source,
                    line = line_number,
                    content = %line,
                    "Skipping line without key:value"
                );
            }
            Diagnostic::MalformedLinesSkipped { source, count } => {
                warn!(
                    source = %source,
                    count = count,
                    "Dictionary has malformed lines; enable debug logging to list them"
                );
            }
            Diagnostic::EmptyDictionary => {
                warn!("Dictionary is empty. No translations available");
            }
            Diagnostic::DictionaryLoaded { entries } => {
                debug!(entries = entries, "Loaded dictionary");
            }
            Diagnostic::DocumentSkipped { field, reason } => {
                trace!(field = %field, reason = %reason, "Document has no text value for field");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvdict_domain::SkipReason;
    use std::sync::{Arc, Mutex};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Layer recording the level of every event
    #[derive(Clone, Default)]
    struct LevelCapture(Arc<Mutex<Vec<Level>>>);

    impl<S: Subscriber> Layer<S> for LevelCapture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    fn levels_for(diagnostic: Diagnostic) -> Vec<Level> {
        let capture = LevelCapture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        tracing::subscriber::with_default(subscriber, || TracingSink.record(&diagnostic));
        let levels = capture.0.lock().unwrap().clone();
        levels
    }

    #[test]
    fn test_warn_level_diagnostics() {
        let warnings = [
            Diagnostic::NoDictionaryConfigured,
            Diagnostic::CharsetOverridden {
                requested: "ISO-8859-1".to_string(),
                applied: "UTF-8".to_string(),
            },
            Diagnostic::MalformedLinesSkipped {
                source: "d.txt".to_string(),
                count: 3,
            },
            Diagnostic::EmptyDictionary,
        ];
        for diagnostic in warnings {
            assert_eq!(levels_for(diagnostic.clone()), vec![Level::WARN], "{:?}", diagnostic);
        }
    }

    #[test]
    fn test_debug_level_diagnostics() {
        let malformed = Diagnostic::MalformedLine {
            source: "d.txt".to_string(),
            line_number: 2,
            line: "noColon".to_string(),
        };
        assert_eq!(levels_for(malformed), vec![Level::DEBUG]);
        assert_eq!(
            levels_for(Diagnostic::DictionaryLoaded { entries: 5 }),
            vec![Level::DEBUG]
        );
    }

    #[test]
    fn test_skipped_document_is_trace() {
        let skipped = Diagnostic::DocumentSkipped {
            field: "input".to_string(),
            reason: SkipReason::NullValue,
        };
        assert_eq!(levels_for(skipped), vec![Level::TRACE]);
    }
}
