//! Content sources that deliver CSV documents as text
//!
//! A source maps a location string to the full document. Bytes that are not
//! valid UTF-8 are taken as ISO-8859-1 so the tokenizer always sees one
//! consistent encoding.

use crate::error::{CsvError, Result};
use indexmap::IndexMap;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Capability returning a whole CSV document for a location
pub trait ContentSource {
    /// Load the document at `location`
    ///
    /// Fails with [`CsvError::NotFound`], [`CsvError::AccessDenied`] or
    /// [`CsvError::TransferFailed`] (or [`CsvError::ReadError`] for I/O
    /// trouble after the location was resolved).
    fn load(&self, location: &str) -> Result<String>;
}

impl<S: ContentSource + ?Sized> ContentSource for &S {
    fn load(&self, location: &str) -> Result<String> {
        (**self).load(location)
    }
}

/// True for `http://` and `https://` locations, case-insensitively
pub fn is_remote(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Decode raw bytes: UTF-8 when valid, ISO-8859-1 otherwise
pub fn decode_content(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            debug!("content is not valid UTF-8, decoding as ISO-8859-1");
            err.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

/// Loads documents from files below a root directory
///
/// Locations are relative paths. Absolute paths and `..` components are
/// refused, remote addresses are not fetched. Compressed documents
/// (`.csv.zst`, `.csv.zip`, `.csv.gz`) are unpacked when the `compressed`
/// feature is enabled.
///
/// # Examples
///
/// ```no_run
/// use csvtable::source::{ContentSource, FileSource};
///
/// let source = FileSource::new("/srv/data");
/// let text = source.load("reports/2024.csv").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Create a source rooted at `root`
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        FileSource { root: root.into() }
    }

    /// Directory all locations are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, location: &str) -> Result<PathBuf> {
        let relative = Path::new(location);
        let confined = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !confined {
            return Err(CsvError::AccessDenied(location.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl ContentSource for FileSource {
    fn load(&self, location: &str) -> Result<String> {
        if is_remote(location) {
            return Err(CsvError::TransferFailed(format!(
                "remote sources are not supported: {}",
                location
            )));
        }

        let path = self.resolve(location)?;
        if !path.is_file() {
            return Err(CsvError::NotFound(location.to_string()));
        }

        let bytes = if is_compressed(&path) {
            read_archive(&path)?
        } else {
            std::fs::read(&path)
                .map_err(|e| CsvError::ReadError(format!("Failed to read CSV file: {}", e)))?
        };

        debug!(location, bytes = bytes.len(), "loaded CSV content");
        Ok(decode_content(bytes))
    }
}

fn is_compressed(path: &Path) -> bool {
    let path_str = path.to_str().unwrap_or("");
    path_str.ends_with(".csv.zst") || path_str.ends_with(".csv.zip") || path_str.ends_with(".csv.gz")
}

#[cfg(feature = "compressed")]
fn read_archive(path: &Path) -> Result<Vec<u8>> {
    use s_zip::StreamingZipReader;

    let mut zip = StreamingZipReader::open(path)
        .map_err(|e| CsvError::ReadError(format!("Failed to open ZIP: {}", e)))?;

    // first .csv entry, else whatever comes first
    let entry_name = zip
        .entries()
        .iter()
        .find(|e| e.name.ends_with(".csv"))
        .or_else(|| zip.entries().first())
        .ok_or_else(|| CsvError::ReadError("No CSV entry found in archive".to_string()))?
        .name
        .clone();

    zip.read_entry_by_name(&entry_name)
        .map_err(|e| CsvError::ReadError(format!("Failed to read ZIP entry: {}", e)))
}

#[cfg(not(feature = "compressed"))]
fn read_archive(path: &Path) -> Result<Vec<u8>> {
    Err(CsvError::ReadError(format!(
        "compressed CSV support is disabled: {}",
        path.display()
    )))
}

/// In-memory documents keyed by location
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: IndexMap<String, String>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document under `location`
    pub fn insert<L: Into<String>, C: Into<String>>(&mut self, location: L, content: C) {
        self.documents.insert(location.into(), content.into());
    }

    /// Store a document (builder pattern)
    pub fn with<L: Into<String>, C: Into<String>>(mut self, location: L, content: C) -> Self {
        self.insert(location, content);
        self
    }
}

impl ContentSource for MemorySource {
    fn load(&self, location: &str) -> Result<String> {
        self.documents
            .get(location)
            .cloned()
            .ok_or_else(|| CsvError::NotFound(location.to_string()))
    }
}
