//! Table options and the option mini-language
//!
//! Options are written as space separated `name=value` pairs, for example
//!
//! ```text
//! data.csv delim=; hdr_rows=2 maxlines=10 filter[3]="*smith*" filter[1][r]="^a.+"
//! ```
//!
//! A bare word is the file location. Values may be wrapped in double quotes to
//! contain spaces. `filter[col][type]` takes a one-based column and an optional
//! type letter: `r` for a raw regular expression, anything else for a glob
//! where `*` matches any text.
//!
//! Parsing never fails. Values that cannot be used are reported with a
//! warning and the default is kept; filters that do not compile are dropped.

use crate::csv::Dialect;
use crate::filter::{ColumnFilter, FilterKind};
use crate::table::Window;
use crate::types::CellRef;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static OPTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([^ =\[\]]+)(?:\[(\d+)\](?:\[(\w)\])?)?(?:=((?:".*?")|(?:[^ ]+)))?"#)
        .expect("option pattern must compile")
});

/// Complete configuration for preparing and displaying one table
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Delimiter, enclosure and escape characters
    pub dialect: Dialect,
    /// Header/offset/limit window and column filters
    pub window: Window,
    /// Leading columns rendered as headers
    pub header_cols: usize,
    /// Whether empty cells merge into their left neighbour when rendered
    pub span_empty_cols: bool,
    /// Location of the CSV document; inline content is used when absent
    pub file: Option<String>,
    /// Cell addressed by single-value lookups
    pub output: CellRef,
    /// Options this crate does not interpret, in given order
    pub extra: IndexMap<String, String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            dialect: Dialect::default(),
            window: Window::default(),
            header_cols: 0,
            span_empty_cols: false,
            file: None,
            output: CellRef::default(),
            extra: IndexMap::new(),
        }
    }
}

impl TableOptions {
    /// Parse an option string on top of the defaults
    ///
    /// # Examples
    ///
    /// ```
    /// use csvtable::TableOptions;
    ///
    /// let opt = TableOptions::parse(r#"people.csv delim=tab maxlines=5 filter[2]="*son""#);
    /// assert_eq!(opt.file.as_deref(), Some("people.csv"));
    /// assert_eq!(opt.dialect.delimiter_char(), '\t');
    /// assert_eq!(opt.window.max_rows, 5);
    /// assert_eq!(opt.window.filters.get(1).unwrap().pattern(), "^.*?son$");
    /// ```
    pub fn parse(optstr: &str) -> Self {
        let mut opt = Self::default();
        let mut filters: IndexMap<usize, (String, FilterKind)> = IndexMap::new();

        for caps in OPTION_PATTERN.captures_iter(optstr) {
            let name = &caps[1];
            let value = caps
                .get(4)
                .map(|m| m.as_str())
                .unwrap_or("")
                .trim_matches('"');

            if name == "filter" {
                let column = match caps.get(2) {
                    Some(m) => match m.as_str().parse::<usize>() {
                        Ok(column) => column,
                        Err(_) => {
                            warn!("Invalid filter column {}", m.as_str());
                            continue;
                        }
                    },
                    None => 1,
                };
                let kind = caps
                    .get(3)
                    .map(|m| FilterKind::from_type_letter(m.as_str()))
                    .unwrap_or(FilterKind::Glob);
                filters.insert(column, (value.to_string(), kind));
            } else if value.is_empty() {
                opt.file = Some(name.to_string());
            } else {
                opt.set(name, value);
            }
        }

        for (column, (text, kind)) in filters {
            if column == 0 {
                warn!("Invalid filter for column 0, columns are counted from 1");
                continue;
            }
            // zero based index internally
            match ColumnFilter::with_kind(column - 1, &text, kind) {
                Ok(filter) => opt.window.filters.insert(filter),
                Err(e) => warn!("Invalid filter for column {}: {}", column, e),
            }
        }

        opt
    }

    /// Apply a single `name=value` option
    pub fn set(&mut self, name: &str, value: &str) {
        match name {
            "hdr_rows" => set_count(&mut self.window.header_rows, name, value),
            "hdr_cols" => set_count(&mut self.header_cols, name, value),
            "maxlines" => set_count(&mut self.window.max_rows, name, value),
            "offset" => set_count(&mut self.window.offset, name, value),
            "span_empty_cols" => self.span_empty_cols = !value.is_empty() && value != "0",
            "file" => self.file = Some(value.to_string()),
            "delim" => {
                let delim = if value == "tab" { "\t" } else { value };
                if let Some(c) = single_char(name, delim) {
                    self.dialect = self.dialect.delimiter(c);
                }
            }
            "enclosure" => {
                if let Some(c) = single_char(name, value) {
                    self.dialect = self.dialect.enclosure(c);
                }
            }
            "escape" => {
                if let Some(c) = single_char(name, value) {
                    self.dialect = self.dialect.escape(c);
                }
            }
            "output" => self.output = parse_output(value),
            _ => {
                self.extra.insert(name.to_string(), value.to_string());
            }
        }
    }

    /// True when the document comes from a remote address
    pub fn is_remote(&self) -> bool {
        self.file.as_deref().is_some_and(crate::source::is_remote)
    }
}

fn set_count(target: &mut usize, name: &str, value: &str) {
    match value.trim().parse::<usize>() {
        Ok(n) => *target = n,
        Err(_) => warn!("Invalid value {:?} for option {}, keeping {}", value, name, target),
    }
}

fn single_char(name: &str, value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => {
            warn!("Option {} must be a single character, got {:?}", name, value);
            None
        }
    }
}

/// `C,R` with one-based column and row into a zero-based cell
fn parse_output(value: &str) -> CellRef {
    let (column, row) = value.split_once(',').unwrap_or((value, ""));
    CellRef::new(one_based(column), one_based(row))
}

fn one_based(value: &str) -> usize {
    let value = value.trim();
    if value.is_empty() {
        return 0;
    }
    match value.parse::<usize>() {
        Ok(n) => n.saturating_sub(1),
        Err(_) => {
            warn!("Invalid output coordinate {:?}", value);
            0
        }
    }
}
