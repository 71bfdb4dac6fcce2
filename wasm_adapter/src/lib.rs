//! Minimal WASM adapter exposing CSV tokenizing and table preparation to JS

use csvtable::csv::{CsvParser, Dialect};
use csvtable::{build_table, TableOptions};
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

fn single_char(value: &str, fallback: char) -> char {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => fallback,
    }
}

/// Parse a whole CSV string into an array of records
#[wasm_bindgen]
pub fn parse_csv(contents: &str, delimiter: &str, enclosure: &str, escape: &str) -> JsValue {
    let dialect = Dialect::new(
        single_char(delimiter, ','),
        single_char(enclosure, '"'),
        single_char(escape, '"'),
    );
    let rows: Vec<Vec<String>> = CsvParser::new(dialect).records(contents).collect();
    to_value(&rows).unwrap_or(JsValue::NULL)
}

/// Prepare a table from inline CSV using an option string such as
/// `hdr_rows=1 maxlines=20 filter[2]="*smith*"`
#[wasm_bindgen]
pub fn build_table_with_options(contents: &str, options: &str) -> JsValue {
    let options = TableOptions::parse(options);
    let table = build_table(contents.trim(), &options.dialect, &options.window);
    to_value(&table.into_rows()).unwrap_or(JsValue::NULL)
}

/// Number of header rows an option string asks for, so JS can split thead/tbody
#[wasm_bindgen]
pub fn header_rows(options: &str) -> usize {
    TableOptions::parse(options).window.header_rows
}
