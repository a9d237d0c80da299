//! Reduction of a scanned line to a single category.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Warning;
use crate::language::profile::LanguageProfile;

use super::scanner::{scan_line, ScanState, ScannedLine, SegmentKind};

/// The category a line is counted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCategory {
    /// Empty or whitespace only
    Blank,
    /// Contains code, including string literals and mixed code/comment lines
    Code,
    /// Contains only comment text
    Comment,
    /// Comment text belonging to the leading file header
    Header,
}

impl LineCategory {
    /// Upper-case tag used in per-line listings.
    pub fn tag(&self) -> &'static str {
        match self {
            LineCategory::Blank => "BLANK",
            LineCategory::Code => "CODE",
            LineCategory::Comment => "COMM",
            LineCategory::Header => "HEAD",
        }
    }
}

impl fmt::Display for LineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineCategory::Blank => "blank",
            LineCategory::Code => "code",
            LineCategory::Comment => "comment",
            LineCategory::Header => "header",
        };
        f.write_str(name)
    }
}

/// Category of one line, for per-line reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineResult {
    /// 1-based line number
    pub line: usize,
    pub category: LineCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<Warning>,
}

/// Reduce the segments of a scanned line to Blank, Code or Comment.
///
/// Segment order does not matter:
/// 1. whitespace only → Blank, whatever the segments
/// 2. any non-whitespace code → Code
/// 3. any string literal → Code
/// 4. otherwise → Comment
///
/// Header is never produced here; it is decided per file.
pub fn classify_segments(line: &str, scanned: &ScannedLine) -> LineCategory {
    if line.trim().is_empty() {
        return LineCategory::Blank;
    }

    let has_code = scanned
        .segments
        .iter()
        .any(|s| s.kind == SegmentKind::Code && !s.text(line).trim().is_empty());
    if has_code {
        return LineCategory::Code;
    }

    if scanned
        .segments
        .iter()
        .any(|s| s.kind == SegmentKind::StringLiteral)
    {
        return LineCategory::Code;
    }

    LineCategory::Comment
}

/// Scan and classify a single line.
///
/// Streaming entry point: feed the returned state into the call for the next
/// line. No header exemption is applied; use
/// [`FileClassifier`](super::file::FileClassifier) for that.
pub fn classify_line(
    line_no: usize,
    line: &str,
    state: ScanState,
    profile: &LanguageProfile,
) -> (LineResult, ScanState) {
    let scanned = scan_line(line, state, profile);
    let result = LineResult {
        line: line_no,
        category: classify_segments(line, &scanned),
        warning: scanned.warning(line_no),
    };
    (result, scanned.state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::profile::Escape;

    fn c() -> LanguageProfile {
        LanguageProfile::new("c", "C")
            .line_comment("//")
            .block_comment("/*", "*/", false)
            .string("\"", "\"", Escape::Char('\\'), false)
    }

    fn category(line: &str) -> LineCategory {
        classify_line(1, line, ScanState::Normal, &c()).0.category
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(category(""), LineCategory::Blank);
        assert_eq!(category("   \t  "), LineCategory::Blank);
    }

    #[test]
    fn test_code_line() {
        assert_eq!(category("int x = 1;"), LineCategory::Code);
    }

    #[test]
    fn test_mixed_line_is_code() {
        assert_eq!(category("int main() { // comment"), LineCategory::Code);
        assert_eq!(category("/* lead */ int x;"), LineCategory::Code);
        assert_eq!(category("int x; /* trail */"), LineCategory::Code);
    }

    #[test]
    fn test_comment_lines() {
        assert_eq!(category("// comment"), LineCategory::Comment);
        assert_eq!(category("   /* comment */  "), LineCategory::Comment);
        assert_eq!(category("/* a */ // b"), LineCategory::Comment);
    }

    #[test]
    fn test_comment_marker_in_string_is_code() {
        assert_eq!(category(r#"print("// not a comment")"#), LineCategory::Code);
    }

    #[test]
    fn test_line_inside_string_is_code() {
        let state = ScanState::InString {
            pair: 0,
            escape_pending: false,
        };
        let profile = LanguageProfile::new("js", "JS")
            .line_comment("//")
            .string("`", "`", Escape::Char('\\'), true);

        let (result, next) = classify_line(3, "  // still text", state, &profile);
        assert_eq!(result.category, LineCategory::Code);
        assert_eq!(result.line, 3);
        assert_eq!(next, state);
    }

    #[test]
    fn test_whitespace_inside_block_comment_is_blank() {
        let state = ScanState::InBlockComment { pair: 0, depth: 1 };
        let (result, next) = classify_line(2, "    ", state, &c());

        assert_eq!(result.category, LineCategory::Blank);
        assert_eq!(next, state);
    }

    #[test]
    fn test_unterminated_string_warning() {
        let (result, next) = classify_line(5, "char *s = \"oops", ScanState::Normal, &c());

        assert_eq!(result.category, LineCategory::Code);
        assert_eq!(result.warning, Some(Warning::UnterminatedString { line: 5 }));
        assert_eq!(next, ScanState::Normal);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(LineCategory::Header.to_string(), "header");
        assert_eq!(LineCategory::Comment.tag(), "COMM");
    }
}
