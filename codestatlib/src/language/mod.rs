//! Language definitions: what counts as a comment or a string.
//!
//! This module handles the first stage of the pipeline - knowing how each
//! language marks comments and literals. It provides:
//!
//! - **Profiles**: Immutable lexical rules for one language (`LanguageProfile`)
//! - **Tables**: TOML declarations of profiles (`LanguageTable`)
//! - **Registry**: Resolution of ids and file names to profiles (`ProfileRegistry`)
//!
//! ## Example
//!
//! ```rust
//! use codestatlib::language::ProfileRegistry;
//!
//! let registry = ProfileRegistry::builtin().unwrap();
//! let profile = registry.resolve("src/main.cpp").unwrap();
//! assert_eq!(profile.id(), "cpp");
//! ```

pub mod profile;
pub mod registry;
pub mod table;

pub use profile::{BlockDelimiters, Escape, LanguageProfile, StringDelimiters};
pub use registry::{DuplicatePolicy, ProfileRegistry};
pub use table::{LanguageDeclaration, LanguageTable};
