//! Table-ready data structures for line count output.
//!
//! `LocTable` is a pure presentation layer: it only formats a
//! [`CountResult`] into strings. It can be printed directly or serialized.

use serde::{Deserialize, Serialize};

use crate::data::counter::CountResult;
use crate::data::stats::LineCounts;

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Row label (language name, file path, "Total (N files)")
    pub label: String,
    /// Values for each column after the label, ready for display
    pub values: Vec<String>,
}

/// Table-ready line count data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Column headers, label column first
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
    /// Summary row
    pub footer: TableRow,
}

const COUNT_HEADERS: [&str; 6] = ["Code", "Comment", "Header", "Blank", "Total", "Comment/Code"];

impl LocTable {
    /// One row per language, sorted by language id.
    pub fn by_language(result: &CountResult) -> Self {
        let mut headers = vec!["Language".to_string(), "Files".to_string()];
        headers.extend(COUNT_HEADERS.iter().map(|h| h.to_string()));

        let rows = result
            .languages
            .iter()
            .map(|lang| {
                let mut values = vec![lang.file_count.to_string()];
                values.extend(format_counts(&lang.stats));
                TableRow {
                    label: lang.name.clone(),
                    values,
                }
            })
            .collect();

        let mut footer_values = vec![result.file_count.to_string()];
        footer_values.extend(format_counts(&result.total));

        LocTable {
            title: None,
            headers,
            rows,
            footer: TableRow {
                label: "Total".to_string(),
                values: footer_values,
            },
        }
    }

    /// One row per file, in discovery order.
    pub fn by_file(result: &CountResult) -> Self {
        let mut headers = vec!["File".to_string(), "Language".to_string()];
        headers.extend(COUNT_HEADERS.iter().map(|h| h.to_string()));

        let rows = result
            .files
            .iter()
            .map(|file| {
                let mut values = vec![file.language.clone()];
                values.extend(format_counts(&file.stats));
                TableRow {
                    label: file.path.display().to_string(),
                    values,
                }
            })
            .collect();

        let mut footer_values = vec![String::new()];
        footer_values.extend(format_counts(&result.total));

        LocTable {
            title: None,
            headers,
            rows,
            footer: TableRow {
                label: format!("Total ({} files)", result.file_count),
                values: footer_values,
            },
        }
    }

    /// Set a title printed above the table.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Format counts as display strings, in `COUNT_HEADERS` order.
fn format_counts(counts: &LineCounts) -> Vec<String> {
    vec![
        counts.code.to_string(),
        counts.comment.to_string(),
        counts.header.to_string(),
        counts.blank.to_string(),
        counts.total.to_string(),
        format_ratio(counts.comment_ratio()),
    ]
}

/// Comment/code ratio as a whole percentage, `-` without code.
fn format_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(ratio) => format!("{ratio:.0} %"),
        None => "- %".to_string(),
    }
}
