//! Lexical rule sets describing how a language marks comments and strings.
//!
//! A [`LanguageProfile`] is pure data: the scanner has no per-language code
//! paths, so adding a language means declaring its delimiters, nothing more.

use crate::error::CodestatError;
use crate::Result;

/// How a string literal protects its closing delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// No escaping: the first closing delimiter ends the literal
    None,
    /// The given character suppresses the special meaning of the next one
    Char(char),
    /// Two consecutive closing delimiters stand for one literal delimiter
    Doubled,
}

/// A block comment delimiter pair such as `/*` ... `*/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDelimiters {
    pub open: String,
    pub close: String,
    /// Whether an inner `open` must be matched by its own `close`
    pub nestable: bool,
}

/// A string or character literal delimiter pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringDelimiters {
    pub open: String,
    pub close: String,
    pub escape: Escape,
    /// Whether the literal may continue past the end of a line
    pub multiline: bool,
}

/// A token that opens a construct at some position of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Opening {
    /// Index into [`LanguageProfile::strings`]
    String(usize),
    /// Index into [`LanguageProfile::block_comments`]
    BlockComment(usize),
    LineComment,
}

/// Immutable lexical rules for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    id: String,
    name: String,
    extensions: Vec<String>,
    filenames: Vec<String>,
    line_comments: Vec<String>,
    block_comments: Vec<BlockDelimiters>,
    strings: Vec<StringDelimiters>,
}

impl LanguageProfile {
    /// Create an empty profile. Use the builder methods to add rules.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extensions: Vec::new(),
            filenames: Vec::new(),
            line_comments: Vec::new(),
            block_comments: Vec::new(),
            strings: Vec::new(),
        }
    }

    /// Add a file extension, without the leading dot (`"cpp"`, `"d.ts"`).
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.extensions.push(ext.into().to_lowercase());
        self
    }

    /// Add several file extensions.
    pub fn extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for ext in exts {
            self = self.extension(ext);
        }
        self
    }

    /// Add an exact file name (`"Makefile"`).
    pub fn filename(mut self, name: impl Into<String>) -> Self {
        self.filenames.push(name.into());
        self
    }

    /// Add a line comment token (`"//"`).
    pub fn line_comment(mut self, token: impl Into<String>) -> Self {
        self.line_comments.push(token.into());
        self
    }

    /// Add a block comment pair.
    pub fn block_comment(
        mut self,
        open: impl Into<String>,
        close: impl Into<String>,
        nestable: bool,
    ) -> Self {
        self.block_comments.push(BlockDelimiters {
            open: open.into(),
            close: close.into(),
            nestable,
        });
        self
    }

    /// Add a string literal pair.
    pub fn string(
        mut self,
        open: impl Into<String>,
        close: impl Into<String>,
        escape: Escape,
        multiline: bool,
    ) -> Self {
        self.strings.push(StringDelimiters {
            open: open.into(),
            close: close.into(),
            escape,
            multiline,
        });
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extension_list(&self) -> &[String] {
        &self.extensions
    }

    pub fn filename_list(&self) -> &[String] {
        &self.filenames
    }

    pub fn line_comments(&self) -> &[String] {
        &self.line_comments
    }

    pub fn block_comments(&self) -> &[BlockDelimiters] {
        &self.block_comments
    }

    pub fn strings(&self) -> &[StringDelimiters] {
        &self.strings
    }

    /// Check that every delimiter is usable by the scanner.
    ///
    /// Empty tokens would never advance the scan, and a nestable pair whose
    /// open and close tokens are equal can never close.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| CodestatError::InvalidProfile {
            id: self.id.clone(),
            message,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("language id is empty".to_string()));
        }
        if self.extensions.iter().any(|e| e.is_empty() || e.starts_with('.')) {
            return Err(invalid(
                "extensions must be non-empty and given without a leading dot".to_string(),
            ));
        }
        if self.line_comments.iter().any(|t| t.is_empty()) {
            return Err(invalid("empty line comment token".to_string()));
        }
        for block in &self.block_comments {
            if block.open.is_empty() || block.close.is_empty() {
                return Err(invalid("empty block comment delimiter".to_string()));
            }
            if block.nestable && block.open == block.close {
                return Err(invalid(format!(
                    "nestable block comment '{}' has identical open and close tokens",
                    block.open
                )));
            }
        }
        for string in &self.strings {
            if string.open.is_empty() || string.close.is_empty() {
                return Err(invalid("empty string delimiter".to_string()));
            }
            if let Escape::Char(c) = string.escape {
                if string.close.starts_with(c) {
                    return Err(invalid(format!(
                        "escape character '{c}' collides with closing delimiter '{}'",
                        string.close
                    )));
                }
            }
        }

        Ok(())
    }

    /// Find the construct opened at the start of `rest`, if any.
    ///
    /// The longest matching token wins. Equal lengths go to strings first,
    /// then block comments, then line comments.
    pub(crate) fn match_opening(&self, rest: &str) -> Option<(Opening, usize)> {
        let strings = self
            .strings
            .iter()
            .enumerate()
            .map(|(i, s)| (Opening::String(i), s.open.as_str()));
        let blocks = self
            .block_comments
            .iter()
            .enumerate()
            .map(|(i, b)| (Opening::BlockComment(i), b.open.as_str()));
        let lines = self
            .line_comments
            .iter()
            .map(|t| (Opening::LineComment, t.as_str()));

        let mut best: Option<(Opening, usize)> = None;
        for (opening, token) in strings.chain(blocks).chain(lines) {
            if !rest.starts_with(token) {
                continue;
            }
            // Strictly longer only, so earlier kinds keep ties.
            if best.is_none_or(|(_, len)| token.len() > len) {
                best = Some((opening, token.len()));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c_like() -> LanguageProfile {
        LanguageProfile::new("c", "C")
            .extensions(["c", "h"])
            .line_comment("//")
            .block_comment("/*", "*/", false)
            .string("\"", "\"", Escape::Char('\\'), false)
    }

    #[test]
    fn test_builder_lowercases_extensions() {
        let profile = LanguageProfile::new("cpp", "C++").extensions(["CPP", "Hpp"]);
        assert_eq!(profile.extension_list(), &["cpp", "hpp"]);
    }

    #[test]
    fn test_match_opening_kinds() {
        let profile = c_like();

        assert_eq!(
            profile.match_opening("// hi"),
            Some((Opening::LineComment, 2))
        );
        assert_eq!(
            profile.match_opening("/* hi */"),
            Some((Opening::BlockComment(0), 2))
        );
        assert_eq!(
            profile.match_opening("\"text\""),
            Some((Opening::String(0), 1))
        );
        assert_eq!(profile.match_opening("x = 1;"), None);
    }

    #[test]
    fn test_longest_token_wins() {
        let profile = LanguageProfile::new("lua", "Lua")
            .line_comment("--")
            .block_comment("--[[", "]]", false);

        assert_eq!(
            profile.match_opening("--[[ block"),
            Some((Opening::BlockComment(0), 4))
        );
        assert_eq!(
            profile.match_opening("-- line"),
            Some((Opening::LineComment, 2))
        );
    }

    #[test]
    fn test_longer_string_beats_shorter_string() {
        let profile = LanguageProfile::new("python", "Python")
            .string("\"", "\"", Escape::Char('\\'), false)
            .string("\"\"\"", "\"\"\"", Escape::Char('\\'), true);

        assert_eq!(
            profile.match_opening("\"\"\"doc"),
            Some((Opening::String(1), 3))
        );
    }

    #[test]
    fn test_tie_goes_to_string() {
        let profile = LanguageProfile::new("odd", "Odd")
            .line_comment("'")
            .string("'", "'", Escape::None, false);

        assert_eq!(profile.match_opening("'x'"), Some((Opening::String(0), 1)));
    }

    #[test]
    fn test_validate_accepts_c() {
        assert!(c_like().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_tokens() {
        let profile = LanguageProfile::new("bad", "Bad").line_comment("");
        assert!(matches!(
            profile.validate(),
            Err(CodestatError::InvalidProfile { .. })
        ));

        let profile = LanguageProfile::new("bad", "Bad").block_comment("/*", "", false);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_self_closing_nestable() {
        let profile = LanguageProfile::new("bad", "Bad").block_comment("#", "#", true);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_dotted_extension() {
        let profile = LanguageProfile::new("bad", "Bad").extension(".c");
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_escape_equal_to_close() {
        let profile =
            LanguageProfile::new("bad", "Bad").string("'", "'", Escape::Char('\''), false);
        assert!(profile.validate().is_err());
    }
}
