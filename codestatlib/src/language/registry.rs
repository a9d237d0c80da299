//! Language resolution by id or file name.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CodestatError;
use crate::language::profile::LanguageProfile;
use crate::language::table::LanguageTable;
use crate::Result;

/// Built-in language table, embedded at compile time
const BUILTIN_LANGUAGES: &str = include_str!("languages.toml");

/// What `register` does when a profile id is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with [`CodestatError::DuplicateProfile`]
    #[default]
    Reject,
    /// Last write wins
    Replace,
}

/// The set of known languages.
///
/// Built once at startup, then only read. Lookups take `&self`, so a registry
/// can be shared by reference across worker threads.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: Vec<LanguageProfile>,
    by_id: HashMap<String, usize>,
    by_filename: HashMap<String, usize>,
    by_extension: HashMap<String, usize>,
    policy: DuplicatePolicy,
}

impl ProfileRegistry {
    /// Create an empty registry that rejects duplicate ids.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in languages.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.load_table(BUILTIN_LANGUAGES, "built-in languages")?;
        Ok(registry)
    }

    /// Set the duplicate policy used by later registrations.
    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_policy(&mut self, policy: DuplicatePolicy) {
        self.policy = policy;
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Add a profile, validating it first.
    ///
    /// Returns the profile it replaced, if any. Fails with `DuplicateProfile`
    /// when the id exists and the policy is [`DuplicatePolicy::Reject`].
    pub fn register(&mut self, profile: LanguageProfile) -> Result<Option<LanguageProfile>> {
        profile.validate()?;
        let key = profile.id().to_lowercase();

        let replaced = match self.by_id.get(&key) {
            Some(_) if self.policy == DuplicatePolicy::Reject => {
                return Err(CodestatError::DuplicateProfile(profile.id().to_string()));
            }
            Some(&index) => {
                // Move the replacement last so its extensions take precedence.
                let old = self.profiles.remove(index);
                self.profiles.push(profile);
                Some(old)
            }
            None => {
                self.profiles.push(profile);
                None
            }
        };

        self.reindex();
        Ok(replaced)
    }

    /// Register every profile of a TOML language table.
    pub fn load_table(&mut self, text: &str, origin: &str) -> Result<()> {
        let profiles = LanguageTable::from_toml_str(text, origin)?.into_profiles()?;
        for profile in profiles {
            self.register(profile)?;
        }
        Ok(())
    }

    /// Register every profile of a TOML language table read from disk.
    pub fn load_table_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CodestatError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.load_table(&text, &path.display().to_string())
    }

    /// Resolve a language id or a file name (or path) to its profile.
    ///
    /// Order: exact id (case-insensitive), exact file name, then the longest
    /// matching extension.
    pub fn resolve(&self, identifier: &str) -> Result<&LanguageProfile> {
        if let Some(&index) = self.by_id.get(&identifier.to_lowercase()) {
            return Ok(&self.profiles[index]);
        }

        let file_name = Path::new(identifier)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(identifier);

        self.match_file_name(file_name)
            .map(|index| &self.profiles[index])
            .ok_or_else(|| CodestatError::UnknownLanguage(identifier.to_string()))
    }

    /// Resolve a path by its file name only (never by language id).
    pub fn resolve_path(&self, path: &Path) -> Result<&LanguageProfile> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| self.match_file_name(name))
            .map(|index| &self.profiles[index])
            .ok_or_else(|| CodestatError::UnknownLanguage(path.display().to_string()))
    }

    /// Look up a profile by id only.
    pub fn get(&self, id: &str) -> Option<&LanguageProfile> {
        self.by_id
            .get(&id.to_lowercase())
            .map(|&index| &self.profiles[index])
    }

    /// Whether any profile claims this file.
    pub fn is_known(&self, path: &Path) -> bool {
        self.resolve_path(path).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    fn match_file_name(&self, file_name: &str) -> Option<usize> {
        let lower = file_name.to_lowercase();
        if let Some(&index) = self.by_filename.get(&lower) {
            return Some(index);
        }

        // Candidates after each dot, leftmost first, so "a.d.ts" tries
        // "d.ts" before "ts".
        lower
            .match_indices('.')
            .map(|(pos, _)| &lower[pos + 1..])
            .filter(|ext| !ext.is_empty())
            .find_map(|ext| self.by_extension.get(ext).copied())
    }

    fn reindex(&mut self) {
        self.by_id.clear();
        self.by_filename.clear();
        self.by_extension.clear();

        // Later profiles overwrite earlier claims.
        for (index, profile) in self.profiles.iter().enumerate() {
            self.by_id.insert(profile.id().to_lowercase(), index);
            for name in profile.filename_list() {
                self.by_filename.insert(name.to_lowercase(), index);
            }
            for ext in profile.extension_list() {
                self.by_extension.insert(ext.clone(), index);
            }
        }
    }
}
