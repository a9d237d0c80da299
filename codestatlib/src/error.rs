//! Error and warning types for codestatlib

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while building registries or counting lines
#[derive(Error, Debug)]
pub enum CodestatError {
    /// No profile matches the given language identifier or file name
    #[error("unknown language for '{0}'")]
    UnknownLanguage(String),

    /// A profile with this id is already registered and replacing is not allowed
    #[error("language '{0}' is already registered")]
    DuplicateProfile(String),

    /// A profile declaration is structurally invalid
    #[error("invalid language '{id}': {message}")]
    InvalidProfile { id: String, message: String },

    /// A language table or config file could not be parsed
    #[error("failed to parse '{origin}': {source}")]
    ProfileTable {
        origin: String,
        source: toml::de::Error,
    },

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// The worker pool could not be created
    #[error("failed to start worker pool: {0}")]
    ThreadPool(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Non-fatal conditions recorded while classifying a file.
///
/// Warnings never stop classification; the affected lines are still counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A string literal was still open at the end of a line (single-line
    /// string types) or at the end of the file (multi-line string types)
    UnterminatedString { line: usize },
    /// A block comment opened on `line` never closed before end of file
    UnterminatedBlockComment { line: usize },
}

impl Warning {
    /// Line the condition refers to (1-based).
    pub fn line(&self) -> usize {
        match self {
            Warning::UnterminatedString { line } | Warning::UnterminatedBlockComment { line } => {
                *line
            }
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnterminatedString { line } => {
                write!(f, "unterminated string literal at line {line}")
            }
            Warning::UnterminatedBlockComment { line } => {
                write!(f, "block comment opened at line {line} is never closed")
            }
        }
    }
}
