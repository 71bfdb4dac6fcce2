//! Record tokenizer for configurable CSV dialects
//!
//! Consumes one logical record per call from the front of a text buffer.
//! Handles quoting, doubled-quote and backslash-style escapes, embedded
//! delimiters and newlines, CR/CRLF/LF line endings and malformed trailing
//! data. Malformed input never fails; whatever was accumulated is flushed.

use super::Dialect;
use crate::types::Record;

/// Position into an immutable text buffer
///
/// Cursors are cheap to copy. [`CsvParser::extract_record`] takes a cursor by
/// value and hands back a new one positioned past the consumed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `text`
    pub fn new(text: &'a str) -> Self {
        Cursor { text, pos: 0 }
    }

    /// The unconsumed rest of the buffer
    pub fn remaining(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Byte offset into the original buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    /// True when nothing is left to consume
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn advance(self, consumed: usize) -> Self {
        Cursor {
            text: self.text,
            pos: (self.pos + consumed).min(self.text.len()),
        }
    }
}

/// CSV tokenizer bound to one dialect
///
/// # Examples
///
/// ```
/// use csvtable::csv::{CsvParser, Cursor, Dialect};
///
/// let parser = CsvParser::new(Dialect::default());
/// let (record, cursor) = parser.extract_record(Cursor::new("a,\"b,c\"\nd\n"));
/// assert_eq!(record, Some(vec!["a".to_string(), "b,c".to_string()]));
/// assert_eq!(cursor.remaining(), "d\n");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvParser {
    dialect: Dialect,
}

impl CsvParser {
    /// Create a parser for the given dialect
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Dialect this parser splits fields with
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Extract the next record from `cursor`
    ///
    /// Returns `None` only when no field could be produced, i.e. the rest of
    /// the buffer was empty or held nothing but blank lines and spaces. The
    /// returned cursor points past everything consumed, including the
    /// terminating line feed.
    pub fn extract_record<'a>(&self, cursor: Cursor<'a>) -> (Option<Record>, Cursor<'a>) {
        let delimiter = self.dialect.delimiter_char();
        let enclosure = self.dialect.enclosure_char();
        let escape = self.dialect.escape_char();
        let separate_escape = self.dialect.has_separate_escape();

        let text = cursor.remaining();
        let mut chars = text.char_indices().peekable();

        let mut in_field = false;
        let mut in_enclosure = false;
        let mut fields: Record = Vec::new();
        let mut word = String::new();
        let mut consumed = text.len();

        while let Some((mut at, mut ch)) = chars.next() {
            // lone CR and CRLF both end a line like LF
            if ch == '\r' {
                if let Some(&(lf_at, '\n')) = chars.peek() {
                    chars.next();
                    at = lf_at;
                }
                ch = '\n';
            }

            // a standalone escape takes the next char literally, whatever the state
            if separate_escape && ch == escape {
                if let Some((_, next)) = chars.next() {
                    word.push(next);
                }
                in_field = true;
                continue;
            }

            if !in_field {
                if ch == delimiter {
                    fields.push(std::mem::take(&mut word));
                    in_enclosure = false;
                } else if ch == '\n' {
                    in_enclosure = false;
                    // blank line
                    if fields.is_empty() && word.is_empty() {
                        continue;
                    }
                    fields.push(std::mem::take(&mut word));
                    consumed = at + 1;
                    break;
                } else if ch == ' ' {
                    continue;
                } else if ch == enclosure {
                    in_field = true;
                    in_enclosure = true;
                } else {
                    word.push(ch);
                    in_field = true;
                    in_enclosure = false;
                }
            } else if in_enclosure {
                if !separate_escape
                    && ch == escape
                    && chars.peek().map(|&(_, next)| next) == Some(enclosure)
                {
                    chars.next();
                    word.push(enclosure);
                    continue;
                }

                if ch == enclosure {
                    in_enclosure = false;
                    continue;
                }

                word.push(ch);
            } else if ch == delimiter {
                fields.push(std::mem::take(&mut word));
                in_field = false;
                in_enclosure = false;
            } else if ch == '\n' {
                in_field = false;
                in_enclosure = false;
                if fields.is_empty() && word.is_empty() {
                    continue;
                }
                fields.push(std::mem::take(&mut word));
                consumed = at + 1;
                break;
            } else {
                word.push(ch);
            }
        }

        // end of buffer inside a field
        if in_field && (!word.is_empty() || !fields.is_empty()) {
            fields.push(word);
        }

        let cursor = cursor.advance(consumed);
        if fields.is_empty() {
            (None, cursor)
        } else {
            (Some(fields), cursor)
        }
    }

    /// Iterate over every record of `text`
    pub fn records<'p, 'a>(&'p self, text: &'a str) -> Records<'p, 'a> {
        Records {
            parser: self,
            cursor: Cursor::new(text),
        }
    }
}

/// Extract one record from `cursor` using `dialect`
///
/// Shorthand for `CsvParser::new(*dialect).extract_record(cursor)`.
pub fn extract_record<'a>(cursor: Cursor<'a>, dialect: &Dialect) -> (Option<Record>, Cursor<'a>) {
    CsvParser::new(*dialect).extract_record(cursor)
}

/// Iterator over the records of a buffer
pub struct Records<'p, 'a> {
    parser: &'p CsvParser,
    cursor: Cursor<'a>,
}

impl<'p, 'a> Records<'p, 'a> {
    /// Cursor positioned after the last record yielded
    pub fn cursor(&self) -> Cursor<'a> {
        self.cursor
    }
}

impl<'p, 'a> Iterator for Records<'p, 'a> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        let (record, cursor) = self.parser.extract_record(self.cursor);
        self.cursor = cursor;
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(text: &str, dialect: Dialect) -> Vec<Vec<String>> {
        CsvParser::new(dialect).records(text).collect()
    }

    fn parse_default(text: &str) -> Vec<Vec<String>> {
        parse_all(text, Dialect::default())
    }

    fn backslash() -> Dialect {
        Dialect::default().escape('\\')
    }

    #[test]
    fn test_simple() {
        assert_eq!(parse_default("a,b,c"), vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_quoted() {
        assert_eq!(parse_default(r#""a,b",c"#), vec![vec!["a,b", "c"]]);
    }

    #[test]
    fn test_escaped_quotes() {
        assert_eq!(
            parse_default(r#""Say ""Hello""",world"#),
            vec![vec![r#"Say "Hello""#, "world"]]
        );
    }

    #[test]
    fn test_doubled_single_quote_enclosure() {
        let dialect = Dialect::new(',', '\'', '\'');
        assert_eq!(parse_all("'it''s',x\n", dialect), vec![vec!["it's", "x"]]);
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(parse_default("a,,c"), vec![vec!["a", "", "c"]]);
    }

    #[test]
    fn test_all_empty() {
        assert_eq!(parse_default(",,\n"), vec![vec!["", "", ""]]);
    }

    #[test]
    fn test_trailing_delimiter_at_end_of_buffer() {
        // no field was started after the last delimiter
        assert_eq!(parse_default("a,"), vec![vec!["a"]]);
        assert_eq!(parse_default("a,\n"), vec![vec!["a", ""]]);
    }

    #[test]
    fn test_quoted_with_newline() {
        assert_eq!(
            parse_default("\"Line 1\nLine 2\",normal"),
            vec![vec!["Line 1\nLine 2", "normal"]]
        );
        assert_eq!(
            parse_default("a,\"line1\nline2\",c\n"),
            vec![vec!["a", "line1\nline2", "c"]]
        );
    }

    #[test]
    fn test_mixed_quoted_unquoted() {
        assert_eq!(parse_default(r#"a,"b,c",d"#), vec![vec!["a", "b,c", "d"]]);
    }

    #[test]
    fn test_custom_delimiter() {
        let dialect = Dialect::default().delimiter(';');
        assert_eq!(parse_all(r#"a;"b;c";d"#, dialect), vec![vec!["a", "b;c", "d"]]);

        let dialect = Dialect::default().delimiter('\t');
        assert_eq!(parse_all("a\tb,c\n", dialect), vec![vec!["a", "b,c"]]);
    }

    #[test]
    fn test_empty_input() {
        let (record, cursor) = CsvParser::default().extract_record(Cursor::new(""));
        assert_eq!(record, None);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        assert_eq!(
            parse_default("a,b\n\n\nc,d\n"),
            vec![vec!["a", "b"], vec!["c", "d"]]
        );
    }

    #[test]
    fn test_only_blank_lines_and_spaces() {
        let (record, cursor) = CsvParser::default().extract_record(Cursor::new("  \n\n \r\n"));
        assert_eq!(record, None);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_line_endings() {
        let expected = vec![vec!["a", "b"], vec!["c", "d"]];
        assert_eq!(parse_default("a,b\r\nc,d\r\n"), expected);
        assert_eq!(parse_default("a,b\rc,d\r"), expected);
        assert_eq!(parse_default("a,b\nc,d"), expected);
    }

    #[test]
    fn test_crlf_inside_enclosure_collapses() {
        assert_eq!(parse_default("\"x\r\ny\",z\r\n"), vec![vec!["x\ny", "z"]]);
    }

    #[test]
    fn test_cursor_advances_past_line_feed() {
        let parser = CsvParser::default();
        let (record, cursor) = parser.extract_record(Cursor::new("a,b\r\nc\n"));
        assert_eq!(record, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(cursor.position(), 5);
        assert_eq!(cursor.remaining(), "c\n");

        let (record, cursor) = parser.extract_record(cursor);
        assert_eq!(record, Some(vec!["c".to_string()]));
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_leading_spaces_skipped() {
        assert_eq!(parse_default("  a,  b ,c\n"), vec![vec!["a", "b ", "c"]]);
        assert_eq!(parse_default("a, \"b\"\n"), vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_content_after_closing_enclosure() {
        assert_eq!(parse_default("\"ab\"cd,e\n"), vec![vec!["abcd", "e"]]);
        assert_eq!(parse_default("ab\"cd\",e\n"), vec![vec!["ab\"cd\"", "e"]]);
    }

    #[test]
    fn test_backslash_escapes_delimiter() {
        assert_eq!(parse_all("a\\,b,c\n", backslash()), vec![vec!["a,b", "c"]]);
    }

    #[test]
    fn test_backslash_escapes_enclosure() {
        assert_eq!(
            parse_all("\"x\\\"y\",z\n", backslash()),
            vec![vec!["x\"y", "z"]]
        );
        assert_eq!(parse_all("\\\"a,b\n", backslash()), vec![vec!["\"a", "b"]]);
    }

    #[test]
    fn test_backslash_escapes_line_feed() {
        assert_eq!(
            parse_all("a\\\nb,c\nd\n", backslash()),
            vec![vec!["a\nb", "c"], vec!["d"]]
        );
    }

    #[test]
    fn test_doubled_quote_not_special_with_backslash_escape() {
        // quotes after the closing enclosure are plain content
        assert_eq!(
            parse_all("\"a\"\"b\",c\n", backslash()),
            vec![vec!["a\"b\"", "c"]]
        );
    }

    #[test]
    fn test_unterminated_enclosure_flushes() {
        assert_eq!(parse_default("\"abc"), vec![vec!["abc"]]);
        assert_eq!(parse_default("a,\"bc\nd"), vec![vec!["a", "bc\nd"]]);
    }

    #[test]
    fn test_escape_at_end_of_buffer() {
        assert_eq!(parse_all("ab\\", backslash()), vec![vec!["ab"]]);
    }

    #[test]
    fn test_multibyte_content() {
        let parser = CsvParser::default();
        let (record, cursor) = parser.extract_record(Cursor::new("ä,\"ö\"\nü"));
        assert_eq!(record, Some(vec!["ä".to_string(), "ö".to_string()]));
        assert_eq!(cursor.remaining(), "ü");
    }

    #[test]
    fn test_free_function_matches_parser() {
        let dialect = Dialect::default().delimiter(';');
        let (record, cursor) = extract_record(Cursor::new("a;b\nc"), &dialect);
        assert_eq!(record, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(cursor.remaining(), "c");
    }

    #[test]
    fn test_records_iterator_is_repeatable() {
        let text = "h1,h2\n1,\"x\ny\"\n\n2,z\n";
        let first = parse_default(text);
        let second = parse_default(text);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }
}
