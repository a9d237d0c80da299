//! Summation of per-file results into run totals.

use std::collections::BTreeMap;

use serde::Serialize;

use super::stats::{FileResult, LanguageStats, LineCounts};

/// Running totals, overall and per language.
///
/// Pure summation: the order files are added in does not change the totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultAccumulator {
    /// Number of files added
    pub file_count: u64,
    /// Sum over all files
    pub total: LineCounts,
    /// Per-language sums, keyed by language id
    pub languages: BTreeMap<String, LanguageStats>,
}

impl ResultAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the result of one file classified with the profile `language`.
    pub fn add(&mut self, language: &str, name: &str, result: &FileResult) {
        self.add_counts(language, name, result.counts);
    }

    /// Add one file's counts.
    pub fn add_counts(&mut self, language: &str, name: &str, counts: LineCounts) {
        self.file_count += 1;
        self.total += counts;
        self.languages
            .entry(language.to_string())
            .or_insert_with(|| LanguageStats::new(language, name))
            .add_file(counts);
    }

    /// Fold another accumulator into this one.
    pub fn merge(&mut self, other: ResultAccumulator) {
        self.file_count += other.file_count;
        self.total += other.total;
        for (id, stats) in other.languages {
            let entry = self
                .languages
                .entry(id)
                .or_insert_with(|| LanguageStats::new(stats.language.clone(), stats.name.clone()));
            entry.file_count += stats.file_count;
            entry.stats += stats.stats;
        }
    }

    /// Per-language stats, sorted by language id.
    pub fn language_stats(&self) -> impl Iterator<Item = &LanguageStats> {
        self.languages.values()
    }
}
