//! Data collection: scan, classify and count lines.
//!
//! The pipeline for one file is:
//!
//! - **Scanning**: [`scan_line`] splits a line into code, comment and string
//!   segments, threading a [`ScanState`] across lines
//! - **Classification**: [`classify_segments`] reduces a scanned line to one
//!   [`LineCategory`]
//! - **Header exemption**: [`FileClassifier`] turns the leading comment block
//!   into header lines, per [`HeaderPolicy`]
//! - **Counting**: [`count_paths`] runs files in parallel and sums them with a
//!   [`ResultAccumulator`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use codestatlib::data::{count_paths, CancelFlag, CountOptions};
//!
//! let result = count_paths(&["."], &registry, &CountOptions::new(), &CancelFlag::new())?;
//! println!("Total code lines: {}", result.total.code);
//! ```

pub mod accumulator;
pub mod classifier;
pub mod counter;
pub mod file;
pub mod header;
pub mod scanner;
pub mod stats;

pub use accumulator::ResultAccumulator;
pub use classifier::{classify_line, classify_segments, LineCategory, LineResult};
pub use counter::{count_file, count_paths, CancelFlag, CountOptions, CountResult, FileError};
pub use file::{classify_file, classify_lines, FileClassifier};
pub use header::{HeaderPolicy, HeaderStyle};
pub use scanner::{scan_line, ScanState, ScannedLine, Segment, SegmentKind};
pub use stats::{FileResult, FileStats, LanguageStats, LineCounts};
