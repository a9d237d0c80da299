//! File filtering and discovery with glob pattern support.

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::CodestatError;
use crate::Result;

/// Configuration for file filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include every file)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| CodestatError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

impl FilterConfig {
    /// Create a new empty filter config (includes every file).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern.as_ref())?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern.as_ref())?;
        }
        Ok(self)
    }

    /// Check if a path matches the filter criteria.
    ///
    /// A path matches if it matches no exclude pattern and at least one
    /// include pattern (or there are no include patterns).
    pub fn matches(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path_str))
    }
}

/// Check if a directory should be skipped during traversal.
fn should_skip_dir(name: &str) -> bool {
    name.starts_with('.') || name == "target"
}

/// Discover files under a path.
///
/// A file path is returned as-is when it matches the filter. Directories are
/// walked recursively, skipping hidden directories and `target/`. The result
/// is sorted.
pub fn discover_files(root: impl AsRef<Path>, filter: &FilterConfig) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(CodestatError::PathNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();

    if root.is_file() {
        if filter.matches(root) {
            files.push(root.to_path_buf());
        }
        return Ok(files);
    }

    let walker = WalkDir::new(root).follow_links(true).into_iter();

    for entry in walker.filter_entry(|e| {
        if e.depth() == 0 {
            return true;
        }
        if e.file_type().is_dir() {
            let name = e.file_name().to_str().unwrap_or("");
            return !should_skip_dir(name);
        }
        true
    }) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::debug!(%err, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();

        if path.is_file() && filter.matches(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();

    Ok(files)
}

/// Discover files under several paths, without duplicates.
///
/// Order follows the argument order; within one path files are sorted.
pub fn discover_paths<P: AsRef<Path>>(paths: &[P], filter: &FilterConfig) -> Result<Vec<PathBuf>> {
    let mut all_files: Vec<PathBuf> = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for path in paths {
        for file in discover_files(path, filter)? {
            if seen.insert(file.clone()) {
                all_files.push(file);
            }
        }
    }

    Ok(all_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn create_test_files(dir: &Path) {
        fs::create_dir_all(dir.join("src/utils")).unwrap();
        fs::create_dir_all(dir.join("tests")).unwrap();
        fs::create_dir_all(dir.join("target/debug")).unwrap();
        fs::create_dir_all(dir.join(".git")).unwrap();

        fs::write(dir.join("src/main.c"), "int main() {}").unwrap();
        fs::write(dir.join("src/utils/helper.py"), "pass").unwrap();
        fs::write(dir.join("tests/test_main.c"), "// test").unwrap();
        fs::write(dir.join("target/debug/gen.c"), "// generated").unwrap();
        fs::write(dir.join(".git/config"), "[core]").unwrap();
        fs::write(dir.join("README.md"), "# Readme").unwrap();
    }

    #[test]
    fn test_filter_matches_any_file() {
        let filter = FilterConfig::new();

        assert!(filter.matches(Path::new("src/main.c")));
        assert!(filter.matches(Path::new("README.md")));
        assert!(filter.matches(Path::new("Makefile")));
    }

    #[test]
    fn test_filter_with_include_pattern() {
        let filter = FilterConfig::new().include("**/*.c").unwrap();

        assert!(filter.matches(Path::new("src/main.c")));
        assert!(!filter.matches(Path::new("src/utils/helper.py")));
    }

    #[test]
    fn test_filter_with_exclude_pattern() {
        let filter = FilterConfig::new().exclude("**/tests/**").unwrap();

        assert!(filter.matches(Path::new("src/main.c")));
        assert!(!filter.matches(Path::new("tests/test_main.c")));
        assert!(!filter.matches(Path::new("src/tests/test.c")));
    }

    #[test]
    fn test_filter_with_multiple_patterns() {
        let filter = FilterConfig::new()
            .include_many(&["**/src/**", "**/tests/**"])
            .unwrap()
            .exclude("**/utils/**")
            .unwrap();

        assert!(filter.matches(Path::new("project/src/main.c")));
        assert!(filter.matches(Path::new("project/tests/test.c")));
        assert!(!filter.matches(Path::new("project/src/utils/helper.py")));
        assert!(!filter.matches(Path::new("project/docs/index.md")));
    }

    #[test]
    fn test_discover_files() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());

        let files = discover_files(temp.path(), &FilterConfig::new()).unwrap();

        assert!(files.iter().any(|p| p.ends_with("src/main.c")));
        assert!(files.iter().any(|p| p.ends_with("src/utils/helper.py")));
        assert!(files.iter().any(|p| p.ends_with("README.md")));
        assert!(!files.iter().any(|p| p.to_string_lossy().contains("target")));
        assert!(!files.iter().any(|p| p.to_string_lossy().contains(".git")));
        assert!(files.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_discover_single_file() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("test.c");
        fs::write(&file_path, "int x;").unwrap();

        let files = discover_files(&file_path, &FilterConfig::new()).unwrap();

        assert_eq!(files, vec![file_path]);
    }

    #[test]
    fn test_discover_paths_deduplicates() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());
        let main = temp.path().join("src/main.c");

        let files = discover_paths(
            &[main.clone(), temp.path().join("src")],
            &FilterConfig::new(),
        )
        .unwrap();

        assert_eq!(files[0], main);
        assert_eq!(files.iter().filter(|p| **p == main).count(), 1);
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_discover_files_nonexistent() {
        let result = discover_files("/nonexistent/path", &FilterConfig::new());

        assert!(matches!(result, Err(CodestatError::PathNotFound(_))));
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let result = FilterConfig::new().include("[invalid");

        if let Err(CodestatError::InvalidGlob { pattern, .. }) = result {
            assert_eq!(pattern, "[invalid");
        } else {
            panic!("Expected InvalidGlob error");
        }
    }
}
