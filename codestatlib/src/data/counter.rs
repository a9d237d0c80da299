//! High-level counting API.
//!
//! Discovers files under the given paths, resolves each to a language
//! profile, classifies them in parallel and sums the results.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;

use crate::error::CodestatError;
use crate::language::profile::LanguageProfile;
use crate::language::registry::ProfileRegistry;
use crate::source::filter::{discover_paths, FilterConfig};
use crate::Result;

use super::accumulator::ResultAccumulator;
use super::file::classify_file;
use super::header::HeaderPolicy;
use super::stats::{FileStats, LanguageStats, LineCounts};

/// Options for counting lines.
#[derive(Debug, Clone, Default)]
pub struct CountOptions {
    /// File filter configuration
    pub file_filter: FilterConfig,
    /// Header exemption rules
    pub header: HeaderPolicy,
    /// Classify every file with this language instead of resolving by name
    pub language: Option<String>,
    /// Worker threads (default: available parallelism)
    pub jobs: Option<usize>,
}

impl CountOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.file_filter = filter;
        self
    }

    /// Set the header policy.
    pub fn header(mut self, policy: HeaderPolicy) -> Self {
        self.header = policy;
        self
    }

    /// Force one language for every file.
    pub fn language(mut self, id: impl Into<String>) -> Self {
        self.language = Some(id.into());
        self
    }

    /// Set the number of worker threads.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }
}

/// Shared, cooperative cancellation signal.
///
/// Clones share the same flag. Once raised, files not yet started are
/// dropped; files already being classified run to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A file that could not be counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub path: PathBuf,
    pub message: String,
}

/// Result of counting a set of paths.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CountResult {
    /// Number of files classified
    pub file_count: u64,
    /// Sum over all classified files
    pub total: LineCounts,
    /// Per-language statistics, sorted by language id
    pub languages: Vec<LanguageStats>,
    /// Per-file statistics, in discovery order
    pub files: Vec<FileStats>,
    /// Files with no matching language
    pub skipped: Vec<PathBuf>,
    /// Files that could not be read
    pub errors: Vec<FileError>,
    /// Whether the run was cancelled before every file was classified
    pub cancelled: bool,
}

impl CountResult {
    /// Create a new empty result.
    pub fn new() -> Self {
        Self::default()
    }
}

enum Outcome {
    Counted(FileStats, String),
    Skipped(PathBuf),
    Failed(FileError),
    Cancelled,
}

/// Count lines in every file under `paths`.
///
/// Fatal errors are a missing path, a bad forced language or a worker pool
/// failure. Unknown languages and unreadable files are recorded in the result
/// and do not stop the other files.
///
/// # Example
///
/// ```rust
/// use codestatlib::{count_paths, CancelFlag, CountOptions, ProfileRegistry};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("main.c"), "int main() {\n    return 0; // ok\n}\n").unwrap();
/// fs::write(dir.path().join("notes.unknown"), "whatever\n").unwrap();
///
/// let registry = ProfileRegistry::builtin().unwrap();
/// let result = count_paths(&[dir.path()], &registry, &CountOptions::new(), &CancelFlag::new()).unwrap();
///
/// assert_eq!(result.file_count, 1);
/// assert_eq!(result.total.code, 3);
/// assert_eq!(result.skipped.len(), 1);
/// ```
pub fn count_paths<P: AsRef<Path>>(
    paths: &[P],
    registry: &ProfileRegistry,
    options: &CountOptions,
    cancel: &CancelFlag,
) -> Result<CountResult> {
    let forced = options
        .language
        .as_deref()
        .map(|id| registry.resolve(id))
        .transpose()?;

    let files = discover_paths(paths, &options.file_filter)?;
    tracing::debug!(files = files.len(), "discovered files");

    let process = |path: &PathBuf| -> Outcome {
        if cancel.is_cancelled() {
            return Outcome::Cancelled;
        }
        let profile = match forced {
            Some(profile) => profile,
            None => match registry.resolve_path(path) {
                Ok(profile) => profile,
                Err(_) => return Outcome::Skipped(path.clone()),
            },
        };
        match count_with_profile(path, profile, &options.header) {
            Ok(stats) => Outcome::Counted(stats, profile.name().to_string()),
            Err(err) => Outcome::Failed(FileError {
                path: path.clone(),
                message: err.to_string(),
            }),
        }
    };

    let outcomes: Vec<Outcome> = match options.jobs {
        Some(jobs) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .map_err(|e| CodestatError::ThreadPool(e.to_string()))?;
            pool.install(|| files.par_iter().map(process).collect())
        }
        None => files.par_iter().map(process).collect(),
    };

    let mut result = CountResult::new();
    let mut acc = ResultAccumulator::new();

    for outcome in outcomes {
        match outcome {
            Outcome::Counted(stats, name) => {
                acc.add_counts(&stats.language, &name, stats.stats);
                result.files.push(stats);
            }
            Outcome::Skipped(path) => {
                tracing::debug!(path = %path.display(), "no language, skipped");
                result.skipped.push(path);
            }
            Outcome::Failed(error) => {
                tracing::warn!(path = %error.path.display(), "{}", error.message);
                result.errors.push(error);
            }
            Outcome::Cancelled => result.cancelled = true,
        }
    }

    result.file_count = acc.file_count;
    result.total = acc.total;
    result.languages = acc.languages.into_values().collect();

    Ok(result)
}

/// Count lines in a single file, resolving its language by name.
///
/// # Example
///
/// ```rust
/// use codestatlib::{count_file, HeaderPolicy, ProfileRegistry};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// let path = dir.path().join("hello.py");
/// fs::write(&path, "# greet\nprint('hi')\n").unwrap();
///
/// let registry = ProfileRegistry::builtin().unwrap();
/// let stats = count_file(&path, &registry, &HeaderPolicy::disabled()).unwrap();
/// assert_eq!(stats.language, "python");
/// assert_eq!(stats.stats.comment, 1);
/// assert_eq!(stats.stats.code, 1);
/// ```
pub fn count_file(
    path: impl AsRef<Path>,
    registry: &ProfileRegistry,
    policy: &HeaderPolicy,
) -> Result<FileStats> {
    let path = path.as_ref();
    let profile = registry.resolve_path(path)?;
    count_with_profile(path, profile, policy)
}

fn count_with_profile(
    path: &Path,
    profile: &LanguageProfile,
    policy: &HeaderPolicy,
) -> Result<FileStats> {
    let bytes = std::fs::read(path).map_err(|source| CodestatError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes);

    tracing::debug!(path = %path.display(), language = profile.id(), "classifying");
    let result = classify_file(&content, profile, policy);

    Ok(FileStats::new(path.to_path_buf(), profile.id(), result))
}
