//! Leading file-header exemption.
//!
//! Many files open with a licence or banner comment. Those lines are counted
//! as [`LineCategory::Header`] instead of comments so that boilerplate does not
//! inflate comment statistics. Which comment counts as "the header" is a
//! policy choice, described by [`HeaderPolicy`].

use serde::{Deserialize, Serialize};

use super::classifier::LineCategory;
use super::scanner::ScannedLine;

/// Shape of comment accepted as a file header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStyle {
    /// Exactly one block comment, opening the first non-blank line
    #[default]
    Block,
    /// Consecutive comment lines of any kind, ended by a blank or code line
    Leading,
}

/// Rules for recognising the leading file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderPolicy {
    /// Whether header lines are counted separately at all
    pub enabled: bool,
    pub style: HeaderStyle,
    /// Blank lines may come before the header
    pub allow_leading_blank_lines: bool,
    /// A `#!` first line does not prevent a header from following it
    pub allow_shebang: bool,
}

impl Default for HeaderPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            style: HeaderStyle::Block,
            allow_leading_blank_lines: true,
            allow_shebang: true,
        }
    }
}

impl HeaderPolicy {
    /// Count header comments as ordinary comments.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Builder: set the header style
    pub fn style(mut self, style: HeaderStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder: allow or forbid blank lines before the header
    pub fn allow_leading_blank_lines(mut self, allow: bool) -> Self {
        self.allow_leading_blank_lines = allow;
        self
    }

    /// Builder: allow or forbid a shebang line before the header
    pub fn allow_shebang(mut self, allow: bool) -> Self {
        self.allow_shebang = allow;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Nothing but blank (or shebang) lines so far
    Searching,
    /// Inside the header
    Open,
    /// The header ended, or can no longer start
    Done,
}

/// Per-file state machine applying a [`HeaderPolicy`].
#[derive(Debug, Clone)]
pub(crate) struct HeaderTracker {
    policy: HeaderPolicy,
    phase: Phase,
}

impl HeaderTracker {
    pub(crate) fn new(policy: HeaderPolicy) -> Self {
        let phase = if policy.enabled {
            Phase::Searching
        } else {
            Phase::Done
        };
        Self { policy, phase }
    }

    /// Final category of a line whose plain classification is `category`.
    pub(crate) fn apply(
        &mut self,
        line_no: usize,
        line: &str,
        category: LineCategory,
        scanned: &ScannedLine,
    ) -> LineCategory {
        match self.phase {
            Phase::Done => category,
            Phase::Searching => match category {
                LineCategory::Blank => {
                    if !self.policy.allow_leading_blank_lines {
                        self.phase = Phase::Done;
                    }
                    category
                }
                _ if line_no == 1 && self.policy.allow_shebang && line.starts_with("#!") => {
                    category
                }
                LineCategory::Comment if self.opens_header(line, scanned) => {
                    self.phase = self.after_header_line(scanned);
                    LineCategory::Header
                }
                _ => {
                    self.phase = Phase::Done;
                    category
                }
            },
            Phase::Open => match category {
                LineCategory::Comment => {
                    self.phase = self.after_header_line(scanned);
                    LineCategory::Header
                }
                LineCategory::Blank => {
                    if !scanned.state.in_block_comment() {
                        self.phase = Phase::Done;
                    }
                    category
                }
                _ => {
                    self.phase = Phase::Done;
                    category
                }
            },
        }
    }

    fn opens_header(&self, line: &str, scanned: &ScannedLine) -> bool {
        match self.policy.style {
            HeaderStyle::Block => scanned.starts_with_block_comment(line),
            HeaderStyle::Leading => true,
        }
    }

    fn after_header_line(&self, scanned: &ScannedLine) -> Phase {
        match self.policy.style {
            HeaderStyle::Block if scanned.closed_block || !scanned.state.in_block_comment() => {
                Phase::Done
            }
            _ => Phase::Open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::classifier::classify_segments;
    use crate::data::scanner::{scan_line, ScanState};
    use crate::language::profile::LanguageProfile;
    use LineCategory::{Blank, Code, Comment, Header};

    fn c() -> LanguageProfile {
        LanguageProfile::new("c", "C")
            .line_comment("//")
            .block_comment("/*", "*/", false)
    }

    fn run(policy: HeaderPolicy, lines: &[&str]) -> Vec<LineCategory> {
        let profile = c();
        let mut tracker = HeaderTracker::new(policy);
        let mut state = ScanState::Normal;

        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let scanned = scan_line(line, state, &profile);
                state = scanned.state;
                let category = classify_segments(line, &scanned);
                tracker.apply(i + 1, line, category, &scanned)
            })
            .collect()
    }

    #[test]
    fn test_block_header() {
        let lines = ["/*", " * Licence", " */", "", "// note", "int x;"];
        assert_eq!(
            run(HeaderPolicy::default(), &lines),
            vec![Header, Header, Header, Blank, Comment, Code]
        );
    }

    #[test]
    fn test_single_line_block_header() {
        let lines = ["/* Copyright */", "/* second */", "int x;"];
        assert_eq!(
            run(HeaderPolicy::default(), &lines),
            vec![Header, Comment, Code]
        );
    }

    #[test]
    fn test_leading_blank_lines() {
        let lines = ["", "/* header */", "int x;"];
        assert_eq!(
            run(HeaderPolicy::default(), &lines),
            vec![Blank, Header, Code]
        );
        assert_eq!(
            run(
                HeaderPolicy::default().allow_leading_blank_lines(false),
                &lines
            ),
            vec![Blank, Comment, Code]
        );
    }

    #[test]
    fn test_line_comment_first_prevents_block_header() {
        let lines = ["// first", "/* later */", "int x;"];
        assert_eq!(
            run(HeaderPolicy::default(), &lines),
            vec![Comment, Comment, Code]
        );
    }

    #[test]
    fn test_code_first_prevents_header() {
        let lines = ["int x;", "/* not a header */"];
        assert_eq!(run(HeaderPolicy::default(), &lines), vec![Code, Comment]);
    }

    #[test]
    fn test_trailing_block_comment_does_not_open_header() {
        // Starts with whitespace-only code, then a block comment: still a header.
        let lines = ["   /* indented */", "x /* trailing */"];
        assert_eq!(run(HeaderPolicy::default(), &lines), vec![Header, Code]);
    }

    #[test]
    fn test_blank_inside_header_block() {
        let lines = ["/*", "", " text", "*/", "int x;"];
        assert_eq!(
            run(HeaderPolicy::default(), &lines),
            vec![Header, Blank, Header, Header, Code]
        );
    }

    #[test]
    fn test_code_after_close_ends_header() {
        let lines = ["/* header", "*/ int x;", "/* again */"];
        assert_eq!(
            run(HeaderPolicy::default(), &lines),
            vec![Header, Code, Comment]
        );
    }

    #[test]
    fn test_block_opened_after_header_close_is_comment() {
        let lines = ["/* licence", "*/ /* doc of main", "   more */", "int main();"];
        assert_eq!(
            run(HeaderPolicy::default(), &lines),
            vec![Header, Header, Comment, Code]
        );

        let lines = ["/* licence */ /* doc", "   more */", "int main();"];
        assert_eq!(
            run(HeaderPolicy::default(), &lines),
            vec![Header, Comment, Code]
        );
    }

    #[test]
    fn test_shebang_before_header() {
        let profile_lines = ["#!/usr/bin/env tool", "/* header */", "run();"];
        // In C "#!" is code, but it does not end the header search.
        assert_eq!(
            run(HeaderPolicy::default(), &profile_lines),
            vec![Code, Header, Code]
        );
        assert_eq!(
            run(HeaderPolicy::default().allow_shebang(false), &profile_lines),
            vec![Code, Comment, Code]
        );
    }

    #[test]
    fn test_leading_style() {
        let lines = ["// Licence", "// more", "/* and more */", "", "// body", "x;"];
        assert_eq!(
            run(HeaderPolicy::default().style(HeaderStyle::Leading), &lines),
            vec![Header, Header, Header, Blank, Comment, Code]
        );
    }

    #[test]
    fn test_disabled() {
        let lines = ["/* header */", "int x;"];
        assert_eq!(run(HeaderPolicy::disabled(), &lines), vec![Comment, Code]);
    }
}
