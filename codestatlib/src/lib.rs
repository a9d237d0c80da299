//! # codestatlib
//!
//! A multi-language line-of-code counter library that sorts every source line
//! into code, comment, header and blank.
//!
//! ## Overview
//!
//! Languages are described by data, not code: each [`LanguageProfile`] lists
//! the line-comment markers, block-comment pairs and string delimiters of one
//! language. A single lexical automaton, driven by the profile, splits each
//! line into segments and the classifier reduces them to a category:
//!
//! - **Code**: Lines with any code or string literal, including mixed lines
//! - **Comment**: Lines holding only comment text
//! - **Header**: Comment lines of the leading licence/banner block
//! - **Blank**: Whitespace-only lines
//!
//! Comment markers inside string literals are ignored, nestable block
//! comments are tracked by depth, and the scanner state carries over line
//! boundaries.
//!
//! ## Example
//!
//! ```rust
//! use codestatlib::{classify_file, count_paths, CancelFlag, CountOptions, HeaderPolicy, ProfileRegistry};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let registry = ProfileRegistry::builtin().unwrap();
//!
//! // Classify content already in memory
//! let java = registry.resolve("java").unwrap();
//! let result = classify_file("// hi\nclass A { String s = \"/* no */\"; }\n", java, &HeaderPolicy::disabled());
//! assert_eq!(result.counts.comment, 1);
//! assert_eq!(result.counts.code, 1);
//!
//! // Count a directory tree
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("lib.rs"), "/* licence */\npub fn hello() {}\n").unwrap();
//! let result = count_paths(&[dir.path()], &registry, &CountOptions::new(), &CancelFlag::new()).unwrap();
//! assert_eq!(result.total.header, 1);
//! assert_eq!(result.total.code, 1);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod language;
pub mod output;
pub mod source;

pub use config::Config;
pub use data::{
    classify_file, classify_line, classify_lines, count_file, count_paths, scan_line, CancelFlag,
    CountOptions, CountResult, FileClassifier, FileError, FileResult, FileStats, HeaderPolicy,
    HeaderStyle, LanguageStats, LineCategory, LineCounts, LineResult, ResultAccumulator,
    ScanState, ScannedLine, Segment, SegmentKind,
};
pub use error::{CodestatError, Warning};
pub use language::{DuplicatePolicy, Escape, LanguageProfile, ProfileRegistry};
pub use output::{LocTable, TableRow};
pub use source::FilterConfig;

/// Result type for codestatlib operations
pub type Result<T> = std::result::Result<T, CodestatError>;
