use std::collections::HashMap;

use crate::upload::CsvPayload;
use crate::util::error::{CpError, CpResult};

/// A parsed CSV payload: header order plus row records keyed by header.
#[derive(Clone, Debug, Default)]
pub struct CsvTable {
    pub columns: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl CsvTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Parses a CSV payload into `(columns, rows)`. Trims surrounding whitespace
/// from every cell, skips empty lines (the `csv` crate's default), honors
/// double-quoted fields, and fails on unterminated quotes or a row whose
/// field count disagrees with the header (`flexible(false)`, the crate
/// default).
pub fn parse_csv(payload: &CsvPayload) -> CpResult<CsvTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .has_headers(true)
        .from_reader(payload.bytes.as_slice());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| CpError::ParseError(format!("reading CSV header: {}", e)))?
        .iter()
        .map(|s| s.to_owned())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CpError::ParseError(format!("reading CSV row: {}", e)))?;
        let mut row = HashMap::with_capacity(columns.len());
        for (col, cell) in columns.iter().zip(record.iter()) {
            row.insert(col.clone(), cell.to_owned());
        }
        rows.push(row);
    }

    Ok(CsvTable { columns, rows })
}
