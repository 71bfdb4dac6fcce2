//! Per-column row filters
//!
//! Filters are compiled once, case-insensitively, when the configuration is
//! built. A data row is kept only if every filtered column matches.

use crate::error::{CsvError, Result};
use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};

/// How filter text is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Literal text where `*` matches anything; the whole value must match
    Glob,
    /// Raw regular expression, unanchored
    Regex,
}

impl FilterKind {
    /// Map the option type letter (`r` = regex, anything else = glob)
    pub fn from_type_letter(letter: &str) -> Self {
        if letter == "r" {
            FilterKind::Regex
        } else {
            FilterKind::Glob
        }
    }
}

/// Compiled case-insensitive filter for one column
#[derive(Debug, Clone)]
pub struct ColumnFilter {
    column: usize,
    regex: Regex,
}

impl ColumnFilter {
    /// Compile a regular expression filter for zero-based `column`
    pub fn new(column: usize, pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| CsvError::InvalidFilter {
                column,
                message: e.to_string(),
            })?;
        Ok(ColumnFilter { column, regex })
    }

    /// Compile filter text of the given kind
    pub fn with_kind(column: usize, text: &str, kind: FilterKind) -> Result<Self> {
        match kind {
            FilterKind::Regex => Self::new(column, text),
            FilterKind::Glob => Self::new(column, &glob_to_pattern(text)),
        }
    }

    /// Zero-based column this filter applies to
    pub fn column(&self) -> usize {
        self.column
    }

    /// Pattern source as compiled
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Test a record; a missing column is tested as an empty value
    pub fn matches(&self, record: &[String]) -> bool {
        let value = record.get(self.column).map(String::as_str).unwrap_or("");
        self.regex.is_match(value)
    }
}

/// Turn glob text into an anchored pattern: `*` becomes a lazy wildcard
pub fn glob_to_pattern(text: &str) -> String {
    let escaped = regex::escape(text).replace(r"\*", ".*?");
    format!("^{}$", escaped)
}

/// Filters keyed by zero-based column, in first-configured order
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    filters: IndexMap<usize, ColumnFilter>,
}

impl FilterSet {
    /// Create an empty filter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter, replacing any earlier filter on the same column
    pub fn insert(&mut self, filter: ColumnFilter) {
        self.filters.insert(filter.column, filter);
    }

    /// Add a filter (builder pattern)
    pub fn with(mut self, filter: ColumnFilter) -> Self {
        self.insert(filter);
        self
    }

    /// Filter configured for zero-based `column`, if any
    pub fn get(&self, column: usize) -> Option<&ColumnFilter> {
        self.filters.get(&column)
    }

    /// Number of filtered columns
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True when no column is filtered
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Filters in first-configured column order
    pub fn iter(&self) -> impl Iterator<Item = &ColumnFilter> {
        self.filters.values()
    }

    /// True when every filter matches the record
    pub fn matches(&self, record: &[String]) -> bool {
        self.filters.values().all(|f| f.matches(record))
    }
}
