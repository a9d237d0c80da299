//! File-level classification.
//!
//! [`FileClassifier`] threads the scanner state from line to line, applies
//! the header exemption and keeps the running counts. [`classify_file`] is the
//! one-shot form for content already in memory.

use crate::error::Warning;
use crate::language::profile::LanguageProfile;

use super::classifier::{classify_segments, LineResult};
use super::header::{HeaderPolicy, HeaderTracker};
use super::scanner::{scan_line, ScanState};
use super::stats::FileResult;

/// Streaming classifier for the lines of one file.
///
/// Feed lines in order with [`push_line`](Self::push_line), then call
/// [`finish`](Self::finish). The classifier owns its scan state; it is never
/// shared between files.
#[derive(Debug)]
pub struct FileClassifier<'p> {
    profile: &'p LanguageProfile,
    header: HeaderTracker,
    state: ScanState,
    line_no: usize,
    block_opened_at: Option<usize>,
    string_opened_at: Option<usize>,
    result: FileResult,
}

impl<'p> FileClassifier<'p> {
    pub fn new(profile: &'p LanguageProfile, policy: &HeaderPolicy) -> Self {
        Self {
            profile,
            header: HeaderTracker::new(*policy),
            state: ScanState::Normal,
            line_no: 0,
            block_opened_at: None,
            string_opened_at: None,
            result: FileResult::default(),
        }
    }

    /// Classify the next line (without its line terminator).
    pub fn push_line(&mut self, line: &str) -> LineResult {
        self.line_no += 1;
        let line_no = self.line_no;

        let state_in = self.state;
        let scanned = scan_line(line, state_in, self.profile);
        let category =
            self.header
                .apply(line_no, line, classify_segments(line, &scanned), &scanned);

        let warning = scanned.warning(line_no);
        if let Some(warning) = warning {
            tracing::debug!(language = self.profile.id(), %warning, "scan warning");
            self.result.warnings.push(warning);
        }

        self.block_opened_at = match scanned.state {
            ScanState::InBlockComment { .. } if state_in.in_block_comment() => {
                self.block_opened_at.or(Some(line_no))
            }
            ScanState::InBlockComment { .. } => Some(line_no),
            _ => None,
        };
        self.string_opened_at = match scanned.state {
            ScanState::InString { .. } if state_in.in_string() => {
                self.string_opened_at.or(Some(line_no))
            }
            ScanState::InString { .. } => Some(line_no),
            _ => None,
        };

        self.state = scanned.state;
        self.result.counts.record(category);

        tracing::trace!(line_no, category = category.tag(), text = line);

        LineResult {
            line: line_no,
            category,
            warning,
        }
    }

    /// Scan state after the last pushed line.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Number of lines pushed so far.
    pub fn line_count(&self) -> usize {
        self.line_no
    }

    /// End the file, recording constructs left open.
    pub fn finish(mut self) -> FileResult {
        let open_warning = match self.state {
            ScanState::Normal => None,
            ScanState::InBlockComment { .. } => Some(Warning::UnterminatedBlockComment {
                line: self.block_opened_at.unwrap_or(self.line_no),
            }),
            ScanState::InString { .. } => Some(Warning::UnterminatedString {
                line: self.string_opened_at.unwrap_or(self.line_no),
            }),
        };

        if let Some(warning) = open_warning {
            tracing::debug!(language = self.profile.id(), %warning, "open at end of file");
            self.result.warnings.push(warning);
        }

        self.result
    }
}

/// Classify a whole file held in memory.
///
/// Lines end at `\n` or `\r\n`; a last line without terminator is counted,
/// and empty content has no lines.
///
/// # Example
///
/// ```rust
/// use codestatlib::{classify_file, HeaderPolicy, ProfileRegistry};
///
/// let registry = ProfileRegistry::builtin().unwrap();
/// let profile = registry.resolve("c").unwrap();
///
/// let source = "/* Licence */\n\nint main() { // entry\n    return 0;\n}\n";
/// let result = classify_file(source, profile, &HeaderPolicy::default());
///
/// assert_eq!(result.counts.header, 1);
/// assert_eq!(result.counts.blank, 1);
/// assert_eq!(result.counts.code, 3);
/// assert_eq!(result.counts.total, 5);
/// ```
pub fn classify_file(content: &str, profile: &LanguageProfile, policy: &HeaderPolicy) -> FileResult {
    classify_lines(content.lines(), profile, policy)
}

/// Classify a sequence of lines (without terminators).
pub fn classify_lines<I, S>(lines: I, profile: &LanguageProfile, policy: &HeaderPolicy) -> FileResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut classifier = FileClassifier::new(profile, policy);
    for line in lines {
        classifier.push_line(line.as_ref());
    }
    classifier.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::classifier::LineCategory;
    use crate::language::profile::Escape;

    fn cpp() -> LanguageProfile {
        LanguageProfile::new("cpp", "C++")
            .line_comment("//")
            .block_comment("/*", "*/", false)
            .string("\"", "\"", Escape::Char('\\'), false)
            .string("'", "'", Escape::Char('\\'), false)
    }

    const HELLO_CPP: &str = "\
/******************************************************************************
 * This is a file header, not counted as comment.                             *
 ******************************************************************************/

// I'm a comment line.
#include <iostream>

/**
 * Say Hello! to the world.
 */
void helloWorld() {
\tstd::cout << \"Hello World!\" << std::endl;
}

int main() { // I'm a mixed code-comment line (counted as code).

\t// I'm a comment line as well.
\thelloWorld();
\treturn 0;
}
";

    #[test]
    fn test_hello_cpp_sample() {
        let result = classify_file(HELLO_CPP, &cpp(), &HeaderPolicy::default());

        assert_eq!(result.counts.header, 3);
        assert_eq!(result.counts.blank, 4);
        assert_eq!(result.counts.comment, 5);
        assert_eq!(result.counts.code, 8);
        assert_eq!(result.counts.total, 20);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_hello_cpp_per_line() {
        let profile = cpp();
        let mut classifier = FileClassifier::new(&profile, &HeaderPolicy::default());
        let categories: Vec<LineCategory> = HELLO_CPP
            .lines()
            .map(|line| classifier.push_line(line).category)
            .collect();

        use LineCategory::{Blank as B, Code as K, Comment as C, Header as H};
        assert_eq!(
            categories,
            vec![H, H, H, B, C, K, B, C, C, C, K, K, K, B, K, B, C, K, K, K]
        );
    }

    #[test]
    fn test_header_disabled_counts_comments() {
        let result = classify_file(HELLO_CPP, &cpp(), &HeaderPolicy::disabled());

        assert_eq!(result.counts.header, 0);
        assert_eq!(result.counts.comment, 8);
        assert_eq!(result.counts.total, 20);
    }

    #[test]
    fn test_empty_content() {
        let result = classify_file("", &cpp(), &HeaderPolicy::default());
        assert_eq!(result.counts.total, 0);
    }

    #[test]
    fn test_last_line_without_terminator() {
        let result = classify_file("int a;\n\nint b;", &cpp(), &HeaderPolicy::default());

        assert_eq!(result.counts.code, 2);
        assert_eq!(result.counts.blank, 1);
        assert_eq!(result.counts.total, 3);
    }

    #[test]
    fn test_crlf_line_endings() {
        let result = classify_file(
            "int a; // x\r\n\r\n// y\r\n",
            &cpp(),
            &HeaderPolicy::default(),
        );

        assert_eq!(result.counts.code, 1);
        assert_eq!(result.counts.blank, 1);
        assert_eq!(result.counts.comment, 1);
        assert_eq!(result.counts.total, 3);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let content = "int a;\n/* never\nclosed\n\n";
        let result = classify_file(content, &cpp(), &HeaderPolicy::default());

        assert_eq!(result.counts.code, 1);
        assert_eq!(result.counts.comment, 2);
        assert_eq!(result.counts.blank, 1);
        assert_eq!(
            result.warnings,
            vec![Warning::UnterminatedBlockComment { line: 2 }]
        );
    }

    #[test]
    fn test_unterminated_header_block_stays_header() {
        let content = "/* licence\n text\n";
        let result = classify_file(content, &cpp(), &HeaderPolicy::default());

        assert_eq!(result.counts.header, 2);
        assert_eq!(
            result.warnings,
            vec![Warning::UnterminatedBlockComment { line: 1 }]
        );
    }

    #[test]
    fn test_unterminated_single_line_string() {
        let content = "char *s = \"oops;\n// fine\n";
        let result = classify_file(content, &cpp(), &HeaderPolicy::default());

        assert_eq!(result.counts.code, 1);
        assert_eq!(result.counts.comment, 1);
        assert_eq!(
            result.warnings,
            vec![Warning::UnterminatedString { line: 1 }]
        );
    }

    #[test]
    fn test_unterminated_multiline_string_at_eof() {
        let profile = LanguageProfile::new("js", "JS")
            .line_comment("//")
            .string("`", "`", Escape::Char('\\'), true);
        let content = "let a = 1;\nlet t = `start\nmore // text\n";
        let result = classify_file(content, &profile, &HeaderPolicy::default());

        assert_eq!(result.counts.code, 3);
        assert_eq!(
            result.warnings,
            vec![Warning::UnterminatedString { line: 2 }]
        );
    }

    #[test]
    fn test_classify_lines_matches_classify_file() {
        let lines: Vec<String> = HELLO_CPP.lines().map(str::to_string).collect();
        let profile = cpp();

        assert_eq!(
            classify_lines(&lines, &profile, &HeaderPolicy::default()),
            classify_file(HELLO_CPP, &profile, &HeaderPolicy::default())
        );
    }

    #[test]
    fn test_reclassifying_is_identical() {
        let profile = cpp();
        let first = classify_file(HELLO_CPP, &profile, &HeaderPolicy::default());
        let second = classify_file(HELLO_CPP, &profile, &HeaderPolicy::default());

        assert_eq!(first, second);
    }
}
