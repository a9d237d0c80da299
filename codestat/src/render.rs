//! Plain-text rendering of count tables and per-line listings.

use std::fmt::Write as _;
use std::path::Path;

use codestatlib::{LineResult, LocTable};
use console::Style;

const CELL_WIDTH: usize = 10;
const MAX_NAME_WIDTH: usize = 60;

/// Truncate a name to fit within max_len, adding ".." prefix if needed
fn truncate_name(name: &str, max_len: usize) -> String {
    let len = name.chars().count();
    if len > max_len {
        let tail: String = name.chars().skip(len - max_len + 2).collect();
        format!("..{tail}")
    } else {
        name.to_string()
    }
}

/// Convert a path to a relative path from the base directory.
pub fn make_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| path.to_string_lossy().to_string())
}

/// Render a table with a left-aligned label column and right-aligned values.
pub fn render_table(table: &LocTable) -> String {
    let header_style = Style::new().bold();
    let total_style = Style::new().bold();

    let name_width = table
        .rows
        .iter()
        .map(|r| r.label.chars().count())
        .chain(std::iter::once(table.footer.label.chars().count()))
        .chain(table.headers.first().map(|h| h.chars().count()))
        .max()
        .unwrap_or(0)
        .clamp(8, MAX_NAME_WIDTH)
        + 2;
    let cell_width = table
        .headers
        .iter()
        .skip(1)
        .map(|h| h.chars().count() + 2)
        .max()
        .unwrap_or(0)
        .max(CELL_WIDTH);

    let format_row = |label: &str, values: &[String]| -> String {
        let mut line = format!(
            "{:<width$}",
            truncate_name(label, name_width - 2),
            width = name_width
        );
        for value in values {
            let _ = write!(line, "{value:>cell_width$}");
        }
        line
    };

    let separator = "-".repeat(name_width + cell_width * (table.headers.len().saturating_sub(1)));
    let mut out = String::new();

    if let Some(title) = &table.title {
        let _ = writeln!(out, "{}", header_style.apply_to(title));
        let _ = writeln!(out, "{}", "-".repeat(title.chars().count()));
    }

    let (label_header, value_headers) = match table.headers.split_first() {
        Some((first, rest)) => (first.as_str(), rest.to_vec()),
        None => ("", Vec::new()),
    };
    let _ = writeln!(
        out,
        "{}",
        header_style.apply_to(format_row(label_header, &value_headers))
    );
    let _ = writeln!(out, "{separator}");

    for row in &table.rows {
        let _ = writeln!(out, "{}", format_row(&row.label, &row.values));
    }

    if !table.rows.is_empty() {
        let _ = writeln!(out, "{separator}");
    }
    let _ = writeln!(
        out,
        "{}",
        total_style.apply_to(format_row(&table.footer.label, &table.footer.values))
    );

    out
}

/// Render the category of each line next to its text.
pub fn render_lines(path: &Path, content: &str, results: &[LineResult]) -> String {
    let path_style = Style::new().bold();
    let warn_style = Style::new().yellow();

    let mut out = String::new();
    let _ = writeln!(out, "{}", path_style.apply_to(path.display()));

    for (result, line) in results.iter().zip(content.lines()) {
        let _ = write!(out, "{:>5} {:<5} | {line}", result.line, result.category.tag());
        if let Some(warning) = &result.warning {
            let _ = write!(out, "  {}", warn_style.apply_to(format!("[{warning}]")));
        }
        out.push('\n');
    }

    out
}
