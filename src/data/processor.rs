//! Row Processor Module
//! Parses CSV text with Polars, types each cell and maps rows onto records.

use once_cell::sync::Lazy;
use polars::prelude::*;
use rand::Rng;
use regex::Regex;
use std::collections::HashMap;
use std::io::Cursor;
use thiserror::Error;
use tracing::debug;

use super::record::{BusinessRecord, UNKNOWN_BUSINESS};

static FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*-?(\d+\.?|\.\d+|\d+\.\d+)([eE][-+]?\d+)?\s*$").expect("valid float pattern")
});

/// Numbers at or beyond this magnitude stay text.
const MAX_SAFE_FLOAT: f64 = 9_007_199_254_740_992.0;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("CSV has a header but no data rows")]
    NoRows,
}

/// A dynamically typed CSV cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Type a raw cell: booleans, numbers within the safe range, empty to null.
    pub fn infer(raw: &str) -> Self {
        match raw {
            "" => return CellValue::Null,
            "true" | "TRUE" => return CellValue::Bool(true),
            "false" | "FALSE" => return CellValue::Bool(false),
            _ => {}
        }

        if FLOAT.is_match(raw) {
            if let Ok(value) = raw.trim().parse::<f64>() {
                if value > -MAX_SAFE_FLOAT && value < MAX_SAFE_FLOAT {
                    return CellValue::Number(value);
                }
            }
        }

        CellValue::Text(raw.to_string())
    }

    /// Whether the value counts as present when picking a field.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::Bool(b) => *b,
            CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CellValue::Text(s) => !s.is_empty(),
        }
    }

    /// Render back to the text stored on a record.
    pub fn to_field_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => number_text(*n),
            CellValue::Text(s) => s.clone(),
        }
    }
}

/// Format a number the way JavaScript's `String(n)` does: plain decimals
/// for magnitudes in `[1e-6, 1e21)`, exponent form with a signed exponent
/// otherwise.
fn number_text(n: f64) -> String {
    let magnitude = n.abs();
    if n == 0.0 {
        "0".to_string()
    } else if (1e-6..1e21).contains(&magnitude) {
        if n.fract() == 0.0 {
            format!("{}", n as i64)
        } else {
            n.to_string()
        }
    } else {
        let text = format!("{:e}", n);
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        }
    }
}

/// Drop lines that are empty outside quoted fields.
fn strip_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_quotes = false;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if content.is_empty() && !in_quotes {
            continue;
        }
        if content.matches('"').count() % 2 == 1 {
            in_quotes = !in_quotes;
        }
        out.push_str(line);
    }

    out
}

/// One typed data row keyed by header name.
#[derive(Debug, Clone, Default)]
pub struct CsvRow {
    cells: HashMap<String, CellValue>,
}

impl CsvRow {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// First truthy value among `columns`, rendered to text.
    fn pick(&self, columns: &[&str]) -> Option<String> {
        columns
            .iter()
            .filter_map(|column| self.get(column))
            .find(|value| value.is_truthy())
            .map(CellValue::to_field_text)
    }
}

impl FromIterator<(String, CellValue)> for CsvRow {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Handles turning CSV text into business records.
pub struct RowProcessor;

impl RowProcessor {
    /// Parse CSV text into typed rows, skipping blank lines.
    ///
    /// Every column is read as a string so typing happens per cell, not
    /// per column. Rows longer than the header are truncated to it; short
    /// rows are padded with nulls.
    pub fn parse_rows(text: &str) -> Result<Vec<CsvRow>, ProcessorError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_parse_options(CsvParseOptions::default().with_truncate_ragged_lines(true))
            .into_reader_with_file_handle(Cursor::new(strip_blank_lines(text).into_bytes()))
            .finish()?;

        let mut columns = Vec::with_capacity(df.width());
        for col in df.get_columns() {
            columns.push((col.name().to_string(), col.as_materialized_series().str()?));
        }

        let rows: Vec<CsvRow> = (0..df.height())
            .map(|i| {
                columns
                    .iter()
                    .map(|(name, values)| {
                        let cell = values.get(i).map(CellValue::infer).unwrap_or(CellValue::Null);
                        (name.clone(), cell)
                    })
                    .collect::<CsvRow>()
            })
            .collect();

        debug!("Parsed {} data rows across {} columns", rows.len(), columns.len());
        Ok(rows)
    }

    /// Map one typed row onto a record with the given id.
    pub fn to_record<R: Rng>(row: &CsvRow, id: u32, rng: &mut R) -> BusinessRecord {
        BusinessRecord {
            id,
            name: row
                .pick(&["name"])
                .unwrap_or_else(|| UNKNOWN_BUSINESS.to_string()),
            contact: row.pick(&["contact"]).unwrap_or_default(),
            description: row.pick(&["description"]).unwrap_or_default(),
            phone: row.pick(&["phone"]).unwrap_or_default(),
            fax: row.pick(&["fax"]).unwrap_or_default(),
            website: row.pick(&["website", "url"]).unwrap_or_default(),
            addresses: row.pick(&["addresses"]).unwrap_or_default(),
            tags: row.pick(&["tags", "keyword"]).unwrap_or_default(),
            verified: rng.random_bool(0.5),
        }
    }

    /// Parse and normalize CSV text. Ids run from 1 in row order.
    pub fn process<R: Rng>(
        text: &str,
        rng: &mut R,
    ) -> Result<Vec<BusinessRecord>, ProcessorError> {
        let rows = Self::parse_rows(text)?;
        if rows.is_empty() {
            return Err(ProcessorError::NoRows);
        }

        Ok(rows
            .iter()
            .zip(1u32..)
            .map(|(row, id)| Self::to_record(row, id, &mut *rng))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn process(text: &str) -> Vec<BusinessRecord> {
        let mut rng = StdRng::seed_from_u64(7);
        RowProcessor::process(text, &mut rng).unwrap()
    }

    #[test]
    fn test_infer_cells() {
        assert_eq!(CellValue::infer(""), CellValue::Null);
        assert_eq!(CellValue::infer("TRUE"), CellValue::Bool(true));
        assert_eq!(CellValue::infer("false"), CellValue::Bool(false));
        assert_eq!(CellValue::infer("True"), CellValue::Text("True".to_string()));
        assert_eq!(CellValue::infer("42"), CellValue::Number(42.0));
        assert_eq!(CellValue::infer(" -1.5e2 "), CellValue::Number(-150.0));
        assert_eq!(CellValue::infer(".5"), CellValue::Number(0.5));
        assert_eq!(
            CellValue::infer("123-456-7890"),
            CellValue::Text("123-456-7890".to_string())
        );
        assert_eq!(
            CellValue::infer("+15551234"),
            CellValue::Text("+15551234".to_string())
        );
    }

    #[test]
    fn test_unsafe_integers_stay_text() {
        assert_eq!(
            CellValue::infer("9007199254740993"),
            CellValue::Text("9007199254740993".to_string())
        );
    }

    #[test]
    fn test_field_text_rendering() {
        assert_eq!(CellValue::Number(5551234.0).to_field_text(), "5551234");
        assert_eq!(CellValue::Number(2.25).to_field_text(), "2.25");
        assert_eq!(CellValue::Bool(true).to_field_text(), "true");
        assert_eq!(CellValue::Null.to_field_text(), "");
    }

    #[test]
    fn test_number_text_matches_js() {
        assert_eq!(CellValue::Number(0.0000001).to_field_text(), "1e-7");
        assert_eq!(CellValue::Number(-1.5e-7).to_field_text(), "-1.5e-7");
        assert_eq!(CellValue::Number(0.000001).to_field_text(), "0.000001");
        assert_eq!(CellValue::Number(1e21).to_field_text(), "1e+21");
        assert_eq!(CellValue::Number(-0.0).to_field_text(), "0");
        assert_eq!(CellValue::infer("1e-7").to_field_text(), "1e-7");
    }

    #[test]
    fn test_strip_blank_lines_keeps_quoted_blanks() {
        assert_eq!(strip_blank_lines("a\n\n\r\nb\n"), "a\nb\n");
        assert_eq!(
            strip_blank_lines("name,description\nA,\"line one\n\nline three\"\n\nB,x\n"),
            "name,description\nA,\"line one\n\nline three\"\nB,x\n"
        );
    }

    #[test]
    fn test_all_comma_row_becomes_unknown_business() {
        let records = process("name,phone\nA,1\n,\nB,2\n");
        let summary: Vec<(u32, &str, &str)> = records
            .iter()
            .map(|r| (r.id, r.name.as_str(), r.phone.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![(1, "A", "1"), (2, UNKNOWN_BUSINESS, ""), (3, "B", "2")]
        );
    }

    #[test]
    fn test_blank_lines_take_no_id() {
        let records = process("name\n\nA\n\r\n\nB\n\n");
        let ids: Vec<(u32, &str)> = records.iter().map(|r| (r.id, r.name.as_str())).collect();
        assert_eq!(ids, vec![(1, "A"), (2, "B")]);
    }

    #[test]
    fn test_long_rows_are_truncated_not_fatal() {
        let records = process("name,phone\nA,1\nB,2,3\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "B");
        assert_eq!(records[1].phone, "2");
    }

    #[test]
    fn test_short_rows_pad_with_defaults() {
        let records = process("name,phone,addresses\nA\nB,2\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].phone, "");
        assert_eq!(records[1].addresses, "");
    }

    #[test]
    fn test_truthiness() {
        assert!(!CellValue::Number(0.0).is_truthy());
        assert!(!CellValue::Bool(false).is_truthy());
        assert!(!CellValue::Text(String::new()).is_truthy());
        assert!(CellValue::Number(-1.0).is_truthy());
        assert!(CellValue::Text("x".to_string()).is_truthy());
    }

    #[test]
    fn test_ids_follow_row_order() {
        let records = process("name,phone\nA,1\nB,2\nC,3\n");
        let ids: Vec<u32> = records.iter().map(|r| r.id).collect();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_defaults_and_aliases() {
        let records = process(
            "name,url,website,keyword,tags,phone\n\
             ,http://a.test,,food,,5551234\n\
             Shop,http://b.test,http://c.test,kw,t1,\n\
             0,,,,,\n",
        );

        assert_eq!(records[0].name, UNKNOWN_BUSINESS);
        assert_eq!(records[0].website, "http://a.test");
        assert_eq!(records[0].tags, "food");
        assert_eq!(records[0].phone, "5551234");
        assert_eq!(records[0].contact, "");

        assert_eq!(records[1].website, "http://c.test");
        assert_eq!(records[1].tags, "t1");
        assert_eq!(records[1].phone, "");

        assert_eq!(records[2].name, UNKNOWN_BUSINESS);
        assert_eq!(records[2].website, "");
    }

    #[test]
    fn test_unknown_columns_ignored() {
        let records = process("name,rating,owner\nDeli,5,Sam\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Deli");
        assert_eq!(records[0].description, "");
    }

    #[test]
    fn test_header_only_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(RowProcessor::process("name,phone\n", &mut rng).is_err());
    }

    #[test]
    fn test_quoted_commas_kept_in_tags() {
        let records = process("name,tags\n\"Supply Co\",\"produce, seafood\"\n");
        assert_eq!(records[0].tags, "produce, seafood");
        assert_eq!(records[0].services(), vec!["produce", "seafood"]);
    }
}
