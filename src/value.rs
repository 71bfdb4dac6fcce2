//! Single-value lookups with a per-lookup table cache

use crate::csv::Dialect;
use crate::error::{CsvError, Result};
use crate::options::TableOptions;
use crate::source::ContentSource;
use crate::table::build_table;
use crate::types::Table;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// Everything besides the document text that shapes a prepared table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    location: String,
    dialect: Dialect,
    header_rows: usize,
    offset: usize,
    max_rows: usize,
    filters: Vec<(usize, String)>,
}

impl CacheKey {
    fn new(location: &str, options: &TableOptions) -> Self {
        let window = &options.window;
        CacheKey {
            location: location.to_string(),
            dialect: options.dialect,
            header_rows: window.header_rows,
            offset: window.offset,
            max_rows: window.max_rows,
            filters: window
                .filters
                .iter()
                .map(|f| (f.column(), f.pattern().to_string()))
                .collect(),
        }
    }
}

/// Prepared table together with the text it was built from
struct CachedTable {
    content: String,
    table: Table,
}

impl CachedTable {
    fn build(content: String, options: &TableOptions) -> Self {
        let table = build_table(&content, &options.dialect, &options.window);
        CachedTable { content, table }
    }
}

/// Resolves single cells from CSV documents
///
/// Prepared tables are cached per location, dialect and window, so several
/// lookups into the same document only tokenize it once. The document is
/// reloaded on every lookup; when its text changed, the cached table for
/// that entry is rebuilt in place. The output cell is not part of the key.
///
/// # Examples
///
/// ```
/// use csvtable::{TableOptions, ValueLookup};
/// use csvtable::source::MemorySource;
///
/// let source = MemorySource::new().with("prices.csv", "item,price\napple,3\npear,4\n");
/// let mut lookup = ValueLookup::new(source);
///
/// let value = lookup.value(&TableOptions::parse("prices.csv output=2,2")).unwrap();
/// assert_eq!(value, "4");
/// ```
pub struct ValueLookup<S> {
    source: S,
    cache: HashMap<CacheKey, CachedTable>,
}

impl<S: ContentSource> ValueLookup<S> {
    /// Create a lookup reading documents from `source`
    pub fn new(source: S) -> Self {
        ValueLookup {
            source,
            cache: HashMap::new(),
        }
    }

    /// The content source documents are loaded from
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of prepared tables currently cached
    pub fn cached_tables(&self) -> usize {
        self.cache.len()
    }

    /// Drop all cached tables
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Look up the cell selected by `options.output`
    ///
    /// The row is counted after the configured header rows.
    pub fn value(&mut self, options: &TableOptions) -> Result<String> {
        let file = options.file.as_deref().ok_or(CsvError::NoFile)?;
        let content = self.source.load(file)?;

        let cached = match self.cache.entry(CacheKey::new(file, options)) {
            Entry::Occupied(mut entry) => {
                if entry.get().content == content {
                    debug!(file, "value cache hit");
                } else {
                    debug!(file, "document changed, rebuilding cached table");
                    entry.insert(CachedTable::build(content, options));
                }
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                debug!(file, "value cache miss, preparing table");
                entry.insert(CachedTable::build(content, options))
            }
        };

        cached
            .table
            .value_at(options.window.header_rows, options.output)
            .map(str::to_string)
    }
}
