//! Table preparation: padding, header/offset/limit windowing and filtering

use crate::csv::{CsvParser, Dialect};
use crate::filter::FilterSet;
use crate::types::{Record, Table};

/// Row selection applied while building a table
///
/// `offset` and `max_rows` of `0` disable the respective constraint.
/// `max_rows` is measured in document rows after the headers, so rows
/// skipped by `offset` or dropped by filters still count against it.
#[derive(Debug, Clone)]
pub struct Window {
    /// Leading rows always kept verbatim
    pub header_rows: usize,
    /// Rows skipped after the headers
    pub offset: usize,
    /// Stop once this many rows after the headers were read
    pub max_rows: usize,
    /// Column filters every data row must satisfy
    pub filters: FilterSet,
}

impl Default for Window {
    fn default() -> Self {
        Window {
            header_rows: 1,
            offset: 0,
            max_rows: 0,
            filters: FilterSet::new(),
        }
    }
}

/// What happens to one row of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowClass {
    Header,
    Skipped,
    Stop,
    Data,
}

impl Window {
    /// Set header row count (builder pattern)
    pub fn header_rows(mut self, rows: usize) -> Self {
        self.header_rows = rows;
        self
    }

    /// Set offset (builder pattern)
    pub fn offset(mut self, rows: usize) -> Self {
        self.offset = rows;
        self
    }

    /// Set row cap (builder pattern)
    pub fn max_rows(mut self, rows: usize) -> Self {
        self.max_rows = rows;
        self
    }

    /// Set filters (builder pattern)
    pub fn filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    fn classify(&self, line: usize) -> RowClass {
        if line < self.header_rows {
            RowClass::Header
        } else if self.offset > 0 && line < self.offset.saturating_add(self.header_rows) {
            RowClass::Skipped
        } else if self.max_rows > 0 && line >= self.max_rows.saturating_add(self.header_rows) {
            RowClass::Stop
        } else {
            RowClass::Data
        }
    }

    /// Build a table from a stream of records
    ///
    /// Records are pulled lazily; once the row cap is reached no further
    /// record is requested.
    pub fn apply<I>(&self, records: I) -> Table
    where
        I: IntoIterator<Item = Record>,
    {
        let mut rows = Vec::new();
        let mut width = None;
        let mut header_count = 0;

        for (line, mut record) in records.into_iter().enumerate() {
            // the first record fixes the column count
            let width = *width.get_or_insert(record.len());
            if record.len() < width {
                record.resize(width, String::new());
            }

            match self.classify(line) {
                RowClass::Header => {
                    header_count += 1;
                    rows.push(record);
                }
                RowClass::Skipped => {}
                RowClass::Stop => break,
                RowClass::Data => {
                    if self.filters.matches(&record) {
                        rows.push(record);
                    }
                }
            }
        }

        Table::new(rows, width.unwrap_or(0), header_count)
    }
}

/// Parse `document` with `dialect` and select rows according to `window`
///
/// # Examples
///
/// ```
/// use csvtable::{build_table, Window};
/// use csvtable::csv::Dialect;
///
/// let table = build_table("id,name\n1,Ann\n2\n", &Dialect::default(), &Window::default());
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.rows()[2], vec!["2", ""]);
/// ```
pub fn build_table(document: &str, dialect: &Dialect, window: &Window) -> Table {
    let parser = CsvParser::new(*dialect);
    window.apply(parser.records(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ColumnFilter;
    use std::cell::Cell;

    const PEOPLE: &str = "Name,Gender,Team\n\
                          Tony Stark,MALE,Avengers\n\
                          Jessica Jones,Female,Defenders\n\
                          Steve Rogers,MALE,Avengers\n\
                          Carol Danvers,FEMALE,Avengers\n\
                          Jessica Drew,female,\n";

    fn names(table: &Table) -> Vec<&str> {
        table.rows().iter().map(|r| r[0].as_str()).collect()
    }

    #[test]
    fn test_default_keeps_everything() {
        let table = build_table(PEOPLE, &Dialect::default(), &Window::default());
        assert_eq!(table.len(), 6);
        assert_eq!(table.width(), 3);
        assert_eq!(table.header_rows(), 1);
        assert_eq!(table.rows()[5], vec!["Jessica Drew", "female", ""]);
    }

    #[test]
    fn test_rows_padded_to_first_width() {
        let table = build_table("a,b,c\n1\n2,3\n", &Dialect::default(), &Window::default());
        for row in table.rows() {
            assert_eq!(row.len(), 3);
        }
        assert_eq!(table.rows()[1], vec!["1", "", ""]);
    }

    #[test]
    fn test_wider_rows_are_not_truncated() {
        // padding only ever widens; extra fields survive
        let table = build_table("a,b\n1,2,3\n", &Dialect::default(), &Window::default());
        assert_eq!(table.width(), 2);
        assert_eq!(table.rows()[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_filter_case_insensitive() {
        let window = Window::default()
            .filters(FilterSet::new().with(ColumnFilter::new(1, "^FEMALE$").unwrap()));
        let table = build_table(PEOPLE, &Dialect::default(), &window);
        assert_eq!(
            names(&table),
            vec!["Name", "Jessica Jones", "Carol Danvers", "Jessica Drew"]
        );
    }

    #[test]
    fn test_multiple_filters() {
        let filters = FilterSet::new()
            .with(ColumnFilter::new(1, "^FEMALE$").unwrap())
            .with(ColumnFilter::new(0, "^.*?jessica.*?$").unwrap());
        let table = build_table(PEOPLE, &Dialect::default(), &Window::default().filters(filters));
        assert_eq!(names(&table), vec!["Name", "Jessica Jones", "Jessica Drew"]);
        assert_eq!(table.get(1, 1), Some("Female"));
    }

    #[test]
    fn test_headers_survive_filters() {
        let window = Window::default()
            .header_rows(2)
            .filters(FilterSet::new().with(ColumnFilter::new(2, "^nobody$").unwrap()));
        let table = build_table(PEOPLE, &Dialect::default(), &window);
        assert_eq!(names(&table), vec!["Name", "Tony Stark"]);
        assert_eq!(table.header_rows(), 2);
        assert!(table.body().is_empty());
    }

    #[test]
    fn test_offset() {
        let window = Window::default().offset(2);
        let table = build_table(PEOPLE, &Dialect::default(), &window);
        assert_eq!(
            names(&table),
            vec!["Name", "Steve Rogers", "Carol Danvers", "Jessica Drew"]
        );
    }

    #[test]
    fn test_max_rows() {
        let window = Window::default().max_rows(2);
        let table = build_table(PEOPLE, &Dialect::default(), &window);
        assert_eq!(names(&table), vec!["Name", "Tony Stark", "Jessica Jones"]);
    }

    #[test]
    fn test_max_rows_counts_from_after_headers() {
        // the row cap includes rows consumed by the offset
        let window = Window::default().offset(1).max_rows(3);
        let table = build_table(PEOPLE, &Dialect::default(), &window);
        assert_eq!(names(&table), vec!["Name", "Jessica Jones", "Steve Rogers"]);
    }

    #[test]
    fn test_max_rows_stops_pulling_records() {
        let pulled = Cell::new(0);
        let records = (0..100).map(|i| {
            pulled.set(pulled.get() + 1);
            vec![format!("row{}", i)]
        });

        let table = Window::default().max_rows(3).apply(records);
        assert_eq!(table.len(), 4);
        // header + 3 data rows + the row that triggered the stop
        assert_eq!(pulled.get(), 5);
        assert!(!names(&table).contains(&"row4"));
    }

    #[test]
    fn test_zero_header_rows() {
        let window = Window::default().header_rows(0).max_rows(1);
        let table = build_table(PEOPLE, &Dialect::default(), &window);
        assert_eq!(names(&table), vec!["Name"]);
        assert_eq!(table.header_rows(), 0);
        assert_eq!(table.body().len(), 1);
    }

    #[test]
    fn test_huge_offset_skips_all_data() {
        let window = Window::default().offset(usize::MAX);
        let table = build_table("h\n1\n2\n", &Dialect::default(), &window);
        assert_eq!(table.into_rows(), vec![vec!["h"]]);
    }

    #[test]
    fn test_huge_max_rows_keeps_all_data() {
        let window = Window::default().max_rows(usize::MAX);
        let table = build_table("h\n1\n2\n", &Dialect::default(), &window);
        assert_eq!(table.into_rows(), vec![vec!["h"], vec!["1"], vec!["2"]]);
    }

    #[test]
    fn test_huge_header_rows_with_window() {
        let window = Window::default()
            .header_rows(usize::MAX)
            .offset(usize::MAX)
            .max_rows(usize::MAX);
        let table = build_table("h\n1\n", &Dialect::default(), &window);
        assert_eq!(table.len(), 2);
        assert_eq!(table.header_rows(), 2);
    }

    #[test]
    fn test_empty_document() {
        let table = build_table("\n\n", &Dialect::default(), &Window::default());
        assert!(table.is_empty());
        assert_eq!(table.width(), 0);
    }

    #[test]
    fn test_build_is_idempotent() {
        let window = Window::default()
            .offset(1)
            .filters(FilterSet::new().with(ColumnFilter::new(2, "avengers").unwrap()));
        let first = build_table(PEOPLE, &Dialect::default(), &window);
        let second = build_table(PEOPLE, &Dialect::default(), &window);
        assert_eq!(first, second);
    }

    #[test]
    fn test_semicolon_dialect() {
        let dialect = Dialect::default().delimiter(';').enclosure('\'').escape('\\');
        let table = build_table("a;b\n'x;y';z\\;w\n", &dialect, &Window::default());
        assert_eq!(table.rows()[1], vec!["x;y", "z;w"]);
    }
}
