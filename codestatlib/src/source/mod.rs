//! Source discovery: find files to classify.
//!
//! Paths given on the command line are expanded into a list of files,
//! filtered with include/exclude glob patterns.
//!
//! ## Example
//!
//! ```rust,ignore
//! use codestatlib::source::{discover_paths, FilterConfig};
//!
//! let filter = FilterConfig::new().exclude("**/generated/**")?;
//! let files = discover_paths(&["src", "include"], &filter)?;
//! ```

pub mod filter;

pub use filter::{discover_files, discover_paths, FilterConfig};
