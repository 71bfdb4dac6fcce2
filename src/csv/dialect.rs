//! CSV dialect: delimiter, enclosure and escape characters

/// The three single characters that govern how raw text is split into fields
///
/// `escape` may equal `enclosure` (doubled-quote escaping, `""` inside a
/// quoted field) or differ from it (backslash-style escaping anywhere).
///
/// # Examples
///
/// ```
/// use csvtable::csv::Dialect;
///
/// let dialect = Dialect::default().delimiter(';').escape('\\');
/// assert_eq!(dialect.delimiter_char(), ';');
/// assert!(dialect.has_separate_escape());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dialect {
    delimiter: char,
    enclosure: char,
    escape: char,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect {
            delimiter: ',',
            enclosure: '"',
            escape: '"',
        }
    }
}

impl Dialect {
    /// Create a dialect from explicit characters
    pub fn new(delimiter: char, enclosure: char, escape: char) -> Self {
        Dialect {
            delimiter,
            enclosure,
            escape,
        }
    }

    /// Set field delimiter (builder pattern)
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set enclosure (quote) character (builder pattern)
    pub fn enclosure(mut self, enclosure: char) -> Self {
        self.enclosure = enclosure;
        self
    }

    /// Set escape character (builder pattern)
    pub fn escape(mut self, escape: char) -> Self {
        self.escape = escape;
        self
    }

    pub fn delimiter_char(&self) -> char {
        self.delimiter
    }

    pub fn enclosure_char(&self) -> char {
        self.enclosure
    }

    pub fn escape_char(&self) -> char {
        self.escape
    }

    /// True when the escape character works independently of the enclosure
    pub fn has_separate_escape(&self) -> bool {
        self.escape != self.enclosure
    }
}
