//! User configuration, read from `codestat.toml`.
//!
//! ```toml
//! replace_builtin_languages = true
//! exclude = ["**/vendor/**"]
//!
//! [header]
//! style = "leading"
//! allow_shebang = false
//!
//! [[language]]
//! id = "nim"
//! name = "Nim"
//! extensions = ["nim"]
//! line_comments = ["#"]
//! block_comments = [{ open = "#[", close = "]#", nestable = true }]
//! strings = [{ open = '"', escape = '\' }]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::header::HeaderPolicy;
use crate::error::CodestatError;
use crate::language::registry::{DuplicatePolicy, ProfileRegistry};
use crate::language::table::LanguageDeclaration;
use crate::source::filter::FilterConfig;
use crate::Result;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "codestat.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Header exemption rules
    pub header: HeaderPolicy,
    /// Let `[[language]]` entries replace built-in languages with the same id
    pub replace_builtin_languages: bool,
    /// Glob patterns of files to include
    pub include: Vec<String>,
    /// Glob patterns of files to exclude
    pub exclude: Vec<String>,
    /// Extra language declarations
    #[serde(rename = "language")]
    pub languages: Vec<LanguageDeclaration>,
}

impl Config {
    /// Parse a config from TOML text. `origin` names the source in errors.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| CodestatError::ProfileTable {
            origin: origin.to_string(),
            source,
        })
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CodestatError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Path of `codestat.toml` in `dir`, if there is one.
    pub fn find_in(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let candidate = dir.as_ref().join(CONFIG_FILE_NAME);
        candidate.is_file().then_some(candidate)
    }

    /// Built-in languages plus the configured ones.
    pub fn build_registry(&self) -> Result<ProfileRegistry> {
        let mut registry = ProfileRegistry::builtin()?;
        registry.set_policy(if self.replace_builtin_languages {
            DuplicatePolicy::Replace
        } else {
            DuplicatePolicy::Reject
        });

        for declaration in &self.languages {
            let profile = declaration.clone().into_profile()?;
            if let Some(old) = registry.register(profile)? {
                tracing::debug!(language = old.id(), "replaced built-in language");
            }
        }

        Ok(registry)
    }

    /// File filter from the configured patterns.
    pub fn filter(&self) -> Result<FilterConfig> {
        FilterConfig::new()
            .include_many(&self.include)?
            .exclude_many(&self.exclude)
    }
}
