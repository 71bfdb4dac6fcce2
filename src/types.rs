//! Type definitions for parsed CSV data

use crate::error::{CsvError, Result};

/// One parsed row: field strings in column order
pub type Record = Vec<String>;

/// Zero-based cell coordinates relative to the data rows of a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRef {
    /// Column index (0-based)
    pub column: usize,
    /// Data row index after the header rows (0-based)
    pub row: usize,
}

impl CellRef {
    /// Create a new cell reference
    pub fn new(column: usize, row: usize) -> Self {
        CellRef { column, row }
    }
}

/// Prepared table: header rows followed by the kept data rows
///
/// Rows are right-padded with empty fields to the width of the first parsed
/// record. Rows that were wider than the first record keep their extra
/// fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    rows: Vec<Record>,
    width: usize,
    header_rows: usize,
}

impl Table {
    pub(crate) fn new(rows: Vec<Record>, width: usize, header_rows: usize) -> Self {
        Table {
            rows,
            width,
            header_rows,
        }
    }

    /// All rows in document order
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Number of rows, headers included
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column count fixed by the first parsed record
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of header rows actually present
    pub fn header_rows(&self) -> usize {
        self.header_rows
    }

    /// The header rows
    pub fn headers(&self) -> &[Record] {
        &self.rows[..self.header_rows]
    }

    /// The data rows following the headers
    pub fn body(&self) -> &[Record] {
        &self.rows[self.header_rows..]
    }

    /// Get the field at absolute row and column
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
    }

    /// Look up a single value the way single-cell references address it
    ///
    /// The absolute row is `header_rows + cell.row`, where `header_rows` is
    /// the configured header count rather than the number present.
    pub fn value_at(&self, header_rows: usize, cell: CellRef) -> Result<&str> {
        let not_found = CsvError::ValueNotFound {
            row: header_rows.saturating_add(cell.row),
            column: cell.column,
        };
        header_rows
            .checked_add(cell.row)
            .and_then(|row| self.get(row, cell.column))
            .ok_or(not_found)
    }

    /// Consume the table and return its rows
    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }
}
