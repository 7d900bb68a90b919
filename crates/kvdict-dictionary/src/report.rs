//! Build report for a merged dictionary

/// Summary of one dictionary build
///
/// Diagnostic only: nothing at lookup time depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Whether any source (file or inline) was configured
    pub configured: bool,

    /// Name of the file source, if one was used
    pub file_source: Option<String>,

    /// Well-formed lines read from the file source
    pub file_entries: usize,

    /// Lines skipped because they did not match `key:value`
    pub malformed_lines: usize,

    /// Entries supplied inline
    pub inline_entries: usize,

    /// Inline entries that replaced a key already loaded from the file
    pub overridden_entries: usize,

    /// Entries in the merged dictionary
    pub total_entries: usize,
}

impl BuildReport {
    /// Whether the merged dictionary ended up empty
    pub fn is_empty(&self) -> bool {
        self.total_entries == 0
    }

    /// Whether any file line was malformed
    pub fn has_errors(&self) -> bool {
        self.malformed_lines > 0
    }

    /// Generate a short human-readable summary
    pub fn summary(&self) -> String {
        if !self.configured {
            return "no dictionary configured".to_string();
        }

        let mut parts = Vec::new();
        if let Some(file) = &self.file_source {
            parts.push(format!(
                "file {}: {} lines loaded, {} malformed",
                file, self.file_entries, self.malformed_lines
            ));
        }
        if self.inline_entries > 0 {
            parts.push(format!(
                "inline: {} entries ({} overrides)",
                self.inline_entries, self.overridden_entries
            ));
        }
        parts.push(format!("total: {} entries", self.total_entries));
        parts.join("; ")
    }
}
