//! Run statistics.
//!
//! Each batch collects its own stats; the driver merges them once the batch is
//! done, so workers never share counters.

use kvdict_processor::LookupOutcome;
use std::collections::BTreeMap;

/// Lookup outcomes of one processor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    /// Target set to a dictionary value
    pub matched: usize,
    /// Target set to null
    pub unmatched: usize,
    /// Source value null or not text
    pub skipped: usize,
}

impl OutcomeCounts {
    fn merge(&mut self, other: &OutcomeCounts) {
        self.matched += other.matched;
        self.unmatched += other.unmatched;
        self.skipped += other.skipped;
    }
}

/// Counters for a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Documents read
    pub documents_in: usize,

    /// Documents written
    pub documents_out: usize,

    /// Documents that failed (parse error or processor error)
    pub failed: usize,

    /// Outcomes per processor name
    pub by_processor: BTreeMap<String, OutcomeCounts>,
}

impl PipelineStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one lookup outcome
    pub fn record(&mut self, processor: &str, outcome: LookupOutcome) {
        let counts = self.by_processor.entry(processor.to_string()).or_default();
        match outcome {
            LookupOutcome::Matched => counts.matched += 1,
            LookupOutcome::Unmatched => counts.unmatched += 1,
            LookupOutcome::Skipped(_) => counts.skipped += 1,
        }
    }

    /// Add another batch's counters
    pub fn merge(&mut self, other: &PipelineStats) {
        self.documents_in += other.documents_in;
        self.documents_out += other.documents_out;
        self.failed += other.failed;
        for (name, counts) in &other.by_processor {
            self.by_processor.entry(name.clone()).or_default().merge(counts);
        }
    }

    /// Documents read but not written
    pub fn dropped(&self) -> usize {
        self.documents_in.saturating_sub(self.documents_out)
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Pipeline Summary".to_string(),
            "================".to_string(),
            format!("Documents in:  {}", self.documents_in),
            format!("Documents out: {}", self.documents_out),
            format!("Failed:        {}", self.failed),
            format!("Dropped:       {}", self.dropped()),
        ];

        if !self.by_processor.is_empty() {
            lines.push(String::new());
            lines.push("Lookups by processor:".to_string());
            for (name, counts) in &self.by_processor {
                lines.push(format!(
                    "  {}: {} matched, {} unmatched, {} skipped",
                    name, counts.matched, counts.unmatched, counts.skipped
                ));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvdict_processor::SkipReason;

    #[test]
    fn test_record_and_merge() {
        let mut a = PipelineStats::new();
        a.documents_in = 3;
        a.documents_out = 2;
        a.failed = 1;
        a.record("colors", LookupOutcome::Matched);
        a.record("colors", LookupOutcome::Unmatched);

        let mut b = PipelineStats::new();
        b.documents_in = 1;
        b.documents_out = 1;
        b.record("colors", LookupOutcome::Skipped(SkipReason::NullValue));
        b.record("sizes", LookupOutcome::Matched);

        a.merge(&b);
        assert_eq!(a.documents_in, 4);
        assert_eq!(a.dropped(), 1);
        assert_eq!(
            a.by_processor["colors"],
            OutcomeCounts { matched: 1, unmatched: 1, skipped: 1 }
        );
        assert_eq!(a.by_processor["sizes"].matched, 1);
    }

    #[test]
    fn test_summary_lists_processors() {
        let mut stats = PipelineStats::new();
        stats.record("kvdictionary", LookupOutcome::Matched);
        let summary = stats.summary();
        assert!(summary.contains("kvdictionary: 1 matched, 0 unmatched, 0 skipped"));
    }
}
