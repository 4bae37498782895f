use std::collections::HashSet;

/// Counters collected while one document runs through the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStats {
    /// Sign-codes replaced by a glyph
    pub signs_resolved: usize,

    /// Numeral pieces replaced by a glyph
    pub numerals_resolved: usize,

    /// Codes no rule matched, distinct, in first-seen order
    pub unresolved: Vec<String>,

    /// `<sup>` wrappers removed
    pub superscripts_unwrapped: usize,

    /// Ruby blocks inserted
    pub ruby_blocks: usize,

    /// Index over `unresolved`
    seen: HashSet<String>,
}

impl DocumentStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a code that stayed literal
    pub fn record_unresolved(&mut self, code: &str) {
        if self.seen.insert(code.to_string()) {
            self.unresolved.push(code.to_string());
        }
    }

    /// Fold another document's counters into these
    pub fn merge(&mut self, other: &DocumentStats) {
        self.signs_resolved += other.signs_resolved;
        self.numerals_resolved += other.numerals_resolved;
        self.superscripts_unwrapped += other.superscripts_unwrapped;
        self.ruby_blocks += other.ruby_blocks;
        for code in &other.unresolved {
            self.record_unresolved(code);
        }
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} sign(s), {} numeral(s), {} superscript(s) unwrapped, {} ruby block(s), {} unresolved code(s)",
            self.signs_resolved,
            self.numerals_resolved,
            self.superscripts_unwrapped,
            self.ruby_blocks,
            self.unresolved.len()
        )
    }
}
