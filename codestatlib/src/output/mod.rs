//! Output formatting: present counts as tables.
//!
//! ## Example
//!
//! ```rust,ignore
//! use codestatlib::output::LocTable;
//!
//! let table = LocTable::by_language(&result);
//! // table.headers: ["Language", "Files", "Code", "Comment", ...]
//! // table.footer: TableRow { label: "Total", ... }
//! ```

pub mod table;

pub use table::{LocTable, TableRow};
