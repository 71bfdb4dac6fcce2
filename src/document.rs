//! Turning configured options into a prepared table

use crate::error::{CsvError, Result};
use crate::options::TableOptions;
use crate::source::ContentSource;
use crate::table::build_table;
use crate::types::Table;

/// Load the document named by `options` (or use `inline` content when no
/// file is configured), trim it and build the table
///
/// An empty document after trimming is reported as [`CsvError::NoData`]. A
/// document whose rows were all filtered away yields an empty body, not an
/// error.
///
/// # Examples
///
/// ```
/// use csvtable::{prepare_table, TableOptions};
/// use csvtable::source::MemorySource;
///
/// let options = TableOptions::parse("maxlines=1");
/// let table = prepare_table(&options, "\n a,b\n1,2\n3,4\n", &MemorySource::new()).unwrap();
/// assert_eq!(table.len(), 2);
/// ```
pub fn prepare_table<S>(options: &TableOptions, inline: &str, source: &S) -> Result<Table>
where
    S: ContentSource + ?Sized,
{
    let loaded;
    let content = match options.file.as_deref() {
        Some(file) => {
            loaded = source.load(file)?;
            loaded.as_str()
        }
        None => inline,
    };

    let content = content.trim();
    if content.is_empty() {
        return Err(CsvError::NoData);
    }

    Ok(build_table(content, &options.dialect, &options.window))
}
