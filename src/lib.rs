//! # csvtable
//!
//! Configurable-dialect CSV tokenizer and table preparation.
//!
//! The tokenizer consumes one record per call from a text buffer. It handles
//! quoted fields, doubled-quote and backslash-style escapes, embedded
//! delimiters and newlines, and CR/CRLF/LF line endings, all driven by a
//! single-character [`Dialect`](csv::Dialect). Malformed input never fails.
//!
//! The table builder drives the tokenizer over a whole document, pads rows
//! to the width of the first record and applies a [`Window`]: header rows,
//! an offset, a row cap and case-insensitive per-column regex filters.
//!
//! ## Quick start
//!
//! ```
//! use csvtable::{build_table, TableOptions};
//!
//! let options = TableOptions::parse(r#"filter[2]="*jones*""#);
//! let document = "Team,Name\nDefenders,Jessica Jones\nAvengers,Tony Stark\n";
//!
//! let table = build_table(document, &options.dialect, &options.window);
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.body()[0], vec!["Defenders", "Jessica Jones"]);
//! ```
//!
//! ## Loading documents
//!
//! [`prepare_table`] reads the document named in the options from a
//! [`ContentSource`](source::ContentSource), and [`ValueLookup`] answers
//! single-cell requests with a cache of prepared tables.

pub mod csv;
pub mod document;
pub mod error;
pub mod filter;
pub mod options;
pub mod source;
pub mod table;
pub mod types;
pub mod value;

pub use document::prepare_table;
pub use error::{CsvError, Result};
pub use filter::{ColumnFilter, FilterKind, FilterSet};
pub use options::TableOptions;
pub use table::{build_table, Window};
pub use types::{CellRef, Record, Table};
pub use value::ValueLookup;
