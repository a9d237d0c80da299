//! Declarative language tables.
//!
//! Profiles are declared in TOML, one `[[language]]` table per language:
//!
//! ```toml
//! [[language]]
//! id = "c"
//! name = "C"
//! extensions = ["c", "h"]
//! line_comments = ["//"]
//! block_comments = [{ open = "/*", close = "*/" }]
//! strings = [
//!     { open = '"', escape = '\' },
//!     { open = "'", escape = '\' },
//! ]
//! ```
//!
//! `escape` is a single character, `"double"` for doubled-delimiter escaping,
//! or `"none"` (the default). `close` defaults to `open`.

use serde::Deserialize;

use crate::error::CodestatError;
use crate::language::profile::{Escape, LanguageProfile};
use crate::Result;

/// A parsed language table, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageTable {
    #[serde(default, rename = "language")]
    pub languages: Vec<LanguageDeclaration>,
}

/// One `[[language]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageDeclaration {
    pub id: String,
    /// Display name; defaults to the id
    pub name: Option<String>,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub filenames: Vec<String>,
    #[serde(default)]
    pub line_comments: Vec<String>,
    #[serde(default)]
    pub block_comments: Vec<BlockDeclaration>,
    #[serde(default)]
    pub strings: Vec<StringDeclaration>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockDeclaration {
    pub open: String,
    pub close: String,
    #[serde(default)]
    pub nestable: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StringDeclaration {
    pub open: String,
    pub close: Option<String>,
    pub escape: Option<String>,
    #[serde(default)]
    pub multiline: bool,
}

impl LanguageTable {
    /// Parse a table from TOML text. `origin` names the source in errors.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| CodestatError::ProfileTable {
            origin: origin.to_string(),
            source,
        })
    }

    /// Convert every declaration into a validated profile.
    pub fn into_profiles(self) -> Result<Vec<LanguageProfile>> {
        self.languages
            .into_iter()
            .map(LanguageDeclaration::into_profile)
            .collect()
    }
}

impl LanguageDeclaration {
    /// Build and validate the profile described by this declaration.
    pub fn into_profile(self) -> Result<LanguageProfile> {
        let name = self.name.unwrap_or_else(|| self.id.clone());
        let mut profile = LanguageProfile::new(self.id.clone(), name).extensions(self.extensions);

        for filename in self.filenames {
            profile = profile.filename(filename);
        }
        for token in self.line_comments {
            profile = profile.line_comment(token);
        }
        for block in self.block_comments {
            profile = profile.block_comment(block.open, block.close, block.nestable);
        }
        for string in self.strings {
            let escape = parse_escape(&self.id, string.escape.as_deref())?;
            let close = string.close.unwrap_or_else(|| string.open.clone());
            profile = profile.string(string.open, close, escape, string.multiline);
        }

        profile.validate()?;
        Ok(profile)
    }
}

fn parse_escape(id: &str, value: Option<&str>) -> Result<Escape> {
    let Some(value) = value else {
        return Ok(Escape::None);
    };

    match value {
        "none" => Ok(Escape::None),
        "double" => Ok(Escape::Doubled),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Escape::Char(c)),
                _ => Err(CodestatError::InvalidProfile {
                    id: id.to_string(),
                    message: format!(
                        "escape must be a single character, \"double\" or \"none\", got '{other}'"
                    ),
                }),
            }
        }
    }
}
