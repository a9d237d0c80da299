//! Core data structures for line statistics.
//!
//! Every line of a file lands in exactly one of four categories:
//!
//! - **code**: Lines with code, string literals, or code mixed with comments
//! - **comment**: Lines holding only comment text
//! - **header**: Comment lines of the leading file header
//! - **blank**: Empty or whitespace-only lines
//!
//! so `blank + code + comment + header == total` always holds.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

use crate::error::Warning;

use super::classifier::LineCategory;

/// Line counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCounts {
    /// Blank lines (whitespace only)
    pub blank: u64,
    /// Code lines, including mixed code/comment lines
    pub code: u64,
    /// Comment-only lines
    pub comment: u64,
    /// Leading file-header comment lines
    pub header: u64,
    /// Total line count (sum of all categories)
    pub total: u64,
}

impl LineCounts {
    /// Create a new LineCounts with all zeros.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one line of the given category.
    pub fn record(&mut self, category: LineCategory) {
        match category {
            LineCategory::Blank => self.blank += 1,
            LineCategory::Code => self.code += 1,
            LineCategory::Comment => self.comment += 1,
            LineCategory::Header => self.header += 1,
        }
        self.total += 1;
    }

    /// Count for one category.
    pub fn get(&self, category: LineCategory) -> u64 {
        match category {
            LineCategory::Blank => self.blank,
            LineCategory::Code => self.code,
            LineCategory::Comment => self.comment,
            LineCategory::Header => self.header,
        }
    }

    /// Total lines (returns precomputed `total` field).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Whether the per-category counts add up to the total.
    pub fn is_consistent(&self) -> bool {
        self.blank + self.code + self.comment + self.header == self.total
    }

    /// Comment lines per code line, in percent. `None` without code lines.
    pub fn comment_ratio(&self) -> Option<f64> {
        (self.code > 0).then(|| self.comment as f64 * 100.0 / self.code as f64)
    }
}

impl Add for LineCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            blank: self.blank + other.blank,
            code: self.code + other.code,
            comment: self.comment + other.comment,
            header: self.header + other.header,
            total: self.total + other.total,
        }
    }
}

impl AddAssign for LineCounts {
    fn add_assign(&mut self, other: Self) {
        self.blank += other.blank;
        self.code += other.code;
        self.comment += other.comment;
        self.header += other.header;
        self.total += other.total;
    }
}

/// Outcome of classifying one file's content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileResult {
    pub counts: LineCounts,
    /// Non-fatal conditions met while classifying
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

/// Statistics for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStats {
    /// Path to the file
    pub path: PathBuf,
    /// Id of the language profile used
    pub language: String,
    /// Line counts for this file
    pub stats: LineCounts,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

impl FileStats {
    pub fn new(path: PathBuf, language: impl Into<String>, result: FileResult) -> Self {
        Self {
            path,
            language: language.into(),
            stats: result.counts,
            warnings: result.warnings,
        }
    }
}

/// Aggregated statistics for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LanguageStats {
    /// Language id
    pub language: String,
    /// Display name
    pub name: String,
    /// Number of files of this language
    pub file_count: u64,
    /// Summed line counts
    pub stats: LineCounts,
}

impl LanguageStats {
    pub fn new(language: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add one file's counts.
    pub fn add_file(&mut self, counts: LineCounts) {
        self.file_count += 1;
        self.stats += counts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_total() {
        let mut counts = LineCounts::new();
        counts.record(LineCategory::Code);
        counts.record(LineCategory::Code);
        counts.record(LineCategory::Blank);
        counts.record(LineCategory::Header);
        counts.record(LineCategory::Comment);

        assert_eq!(counts.code, 2);
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.get(LineCategory::Header), 1);
        assert!(counts.is_consistent());
    }

    #[test]
    fn test_add() {
        let a = LineCounts {
            blank: 1,
            code: 2,
            comment: 3,
            header: 4,
            total: 10,
        };
        let mut b = a + a;
        assert_eq!(b.code, 4);
        assert_eq!(b.total, 20);

        b += a;
        assert_eq!(b.header, 12);
        assert!(b.is_consistent());
    }

    #[test]
    fn test_comment_ratio() {
        let counts = LineCounts {
            code: 8,
            comment: 2,
            total: 10,
            ..Default::default()
        };
        assert_eq!(counts.comment_ratio(), Some(25.0));
        assert_eq!(LineCounts::new().comment_ratio(), None);
    }

    #[test]
    fn test_language_stats_add_file() {
        let mut stats = LanguageStats::new("c", "C");
        let mut counts = LineCounts::new();
        counts.record(LineCategory::Code);

        stats.add_file(counts);
        stats.add_file(counts);

        assert_eq!(stats.file_count, 2);
        assert_eq!(stats.stats.code, 2);
    }
}
