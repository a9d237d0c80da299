//! Line scanner: the character-level automaton behind classification.
//!
//! The scanner looks at one line at a time. Everything it needs to know about
//! earlier lines travels in a [`ScanState`], which it takes by value and
//! returns updated, so the same line with the same incoming state always
//! scans the same way.
//!
//! Each character of a line ends up in exactly one [`SegmentKind`]. Adjacent
//! characters of the same kind are merged into a single [`Segment`].

use std::ops::Range;

use crate::error::Warning;
use crate::language::profile::{Escape, LanguageProfile, Opening};

/// Automaton state carried from the end of one line to the start of the next.
///
/// Line comments always end with their line, so they never appear here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanState {
    /// Outside any comment or literal
    #[default]
    Normal,
    /// Inside the block comment pair `pair` of the profile
    InBlockComment { pair: usize, depth: u32 },
    /// Inside the string pair `pair` of the profile
    InString { pair: usize, escape_pending: bool },
}

impl ScanState {
    pub fn is_normal(&self) -> bool {
        matches!(self, ScanState::Normal)
    }

    pub fn in_block_comment(&self) -> bool {
        matches!(self, ScanState::InBlockComment { .. })
    }

    pub fn in_string(&self) -> bool {
        matches!(self, ScanState::InString { .. })
    }
}

/// What a run of characters is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Code,
    LineComment,
    BlockComment,
    StringLiteral,
}

/// A run of same-kind characters, as a byte range into the scanned line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub range: Range<usize>,
}

impl Segment {
    /// The text of this segment within `line`.
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.range.clone()]
    }
}

/// The outcome of scanning one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    /// Segments in line order, covering the whole line
    pub segments: Vec<Segment>,
    /// State to feed into the next line
    pub state: ScanState,
    /// Set when a single-line string was still open at the end of the line
    pub unterminated_string: bool,
    /// Set when a block comment ended on this line
    pub closed_block: bool,
}

impl ScannedLine {
    /// Whether the line opens a block comment before anything but whitespace.
    pub(crate) fn starts_with_block_comment(&self, line: &str) -> bool {
        self.segments
            .iter()
            .find(|s| !(s.kind == SegmentKind::Code && s.text(line).trim().is_empty()))
            .is_some_and(|s| s.kind == SegmentKind::BlockComment)
    }

    /// Convert the unterminated-string flag into a warning for `line_no`.
    pub fn warning(&self, line_no: usize) -> Option<Warning> {
        self.unterminated_string
            .then_some(Warning::UnterminatedString { line: line_no })
    }
}

/// Accumulates segments, merging adjacent runs of the same kind.
#[derive(Default)]
struct SegmentBuilder {
    segments: Vec<Segment>,
}

impl SegmentBuilder {
    fn push(&mut self, kind: SegmentKind, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        if let Some(last) = self.segments.last_mut() {
            if last.kind == kind && last.range.end == range.start {
                last.range.end = range.end;
                return;
            }
        }
        self.segments.push(Segment { kind, range });
    }
}

/// Length in bytes of the character starting at `pos`.
fn char_len_at(line: &str, pos: usize) -> usize {
    line[pos..].chars().next().map_or(1, char::len_utf8)
}

/// Scan one line (without its terminator) starting from `state`.
pub fn scan_line(line: &str, state: ScanState, profile: &LanguageProfile) -> ScannedLine {
    let mut segments = SegmentBuilder::default();
    let mut state = state;
    let mut pos = 0;
    let mut closed_block = false;

    while pos < line.len() {
        let rest = &line[pos..];

        match state {
            ScanState::InString {
                pair,
                escape_pending,
            } => {
                let delimiters = &profile.strings()[pair];
                let step = if escape_pending {
                    state = ScanState::InString {
                        pair,
                        escape_pending: false,
                    };
                    char_len_at(line, pos)
                } else {
                    match delimiters.escape {
                        Escape::Char(c) if rest.starts_with(c) => {
                            state = ScanState::InString {
                                pair,
                                escape_pending: true,
                            };
                            c.len_utf8()
                        }
                        Escape::Doubled
                            if rest.starts_with(delimiters.close.as_str())
                                && rest[delimiters.close.len()..]
                                    .starts_with(delimiters.close.as_str()) =>
                        {
                            delimiters.close.len() * 2
                        }
                        _ if rest.starts_with(delimiters.close.as_str()) => {
                            state = ScanState::Normal;
                            delimiters.close.len()
                        }
                        _ => char_len_at(line, pos),
                    }
                };
                segments.push(SegmentKind::StringLiteral, pos..pos + step);
                pos += step;
            }
            ScanState::InBlockComment { pair, depth } => {
                let delimiters = &profile.block_comments()[pair];
                let step = if delimiters.nestable && rest.starts_with(delimiters.open.as_str()) {
                    state = ScanState::InBlockComment {
                        pair,
                        depth: depth + 1,
                    };
                    delimiters.open.len()
                } else if rest.starts_with(delimiters.close.as_str()) {
                    state = if depth > 1 {
                        ScanState::InBlockComment {
                            pair,
                            depth: depth - 1,
                        }
                    } else {
                        closed_block = true;
                        ScanState::Normal
                    };
                    delimiters.close.len()
                } else {
                    char_len_at(line, pos)
                };
                segments.push(SegmentKind::BlockComment, pos..pos + step);
                pos += step;
            }
            ScanState::Normal => match profile.match_opening(rest) {
                Some((Opening::String(pair), len)) => {
                    state = ScanState::InString {
                        pair,
                        escape_pending: false,
                    };
                    segments.push(SegmentKind::StringLiteral, pos..pos + len);
                    pos += len;
                }
                Some((Opening::BlockComment(pair), len)) => {
                    state = ScanState::InBlockComment { pair, depth: 1 };
                    segments.push(SegmentKind::BlockComment, pos..pos + len);
                    pos += len;
                }
                Some((Opening::LineComment, _)) => {
                    segments.push(SegmentKind::LineComment, pos..line.len());
                    pos = line.len();
                }
                None => {
                    let step = char_len_at(line, pos);
                    segments.push(SegmentKind::Code, pos..pos + step);
                    pos += step;
                }
            },
        }
    }

    let mut unterminated_string = false;
    if let ScanState::InString {
        pair,
        escape_pending,
    } = state
    {
        if escape_pending {
            // The escape swallowed the line break: the literal continues.
            state = ScanState::InString {
                pair,
                escape_pending: false,
            };
        } else if !profile.strings()[pair].multiline {
            state = ScanState::Normal;
            unterminated_string = true;
        }
    }

    ScannedLine {
        segments: segments.segments,
        state,
        unterminated_string,
        closed_block,
    }
}
