//! Error types for csvtable

use thiserror::Error;

/// Result type alias for csvtable operations
pub type Result<T> = std::result::Result<T, CsvError>;

/// Errors that can occur while configuring, loading or querying CSV tables
///
/// Tokenizing and table building never fail; malformed input degrades to
/// whatever fields could be recovered.
#[derive(Debug, Error)]
pub enum CsvError {
    /// The requested content location does not exist
    #[error("requested CSV source does not exist: {0}")]
    NotFound(String),

    /// The content source refused access to the location
    #[error("access denied to CSV data: {0}")]
    AccessDenied(String),

    /// Fetching the content failed
    #[error("failed to fetch CSV data: {0}")]
    TransferFailed(String),

    /// I/O or archive error while reading content
    #[error("read error: {0}")]
    ReadError(String),

    /// A filter expression could not be compiled
    #[error("invalid filter for column {column}: {message}")]
    InvalidFilter { column: usize, message: String },

    /// The document was empty after trimming
    #[error("no csv data found")]
    NoData,

    /// A single-value lookup was requested without a file
    #[error("no csv file given")]
    NoFile,

    /// The requested cell lies outside the prepared table
    #[error("failed to find requested value at row {row}, column {column}")]
    ValueNotFound { row: usize, column: usize },
}
