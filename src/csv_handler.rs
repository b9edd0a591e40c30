// src/csv_handler.rs
use csv::{ReaderBuilder, StringRecord, Trim};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

use crate::data_types::{CellValue, Row};
use crate::error::Result;

static FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*-?(\d+\.?|\.\d+|\d+\.\d+)([eE][-+]?\d+)?\s*$").expect("valid float pattern")
});

/// 2^53 - 1, the largest integer an f64 holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

pub struct CsvHandler {
    delimiter: Option<u8>,
}

impl Default for CsvHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvHandler {
    pub fn new() -> Self {
        CsvHandler { delimiter: None }
    }

    /// Non-ASCII delimiters fall back to detection.
    pub fn with_delimiter(mut self, delimiter: Option<char>) -> Self {
        self.delimiter = delimiter.filter(char::is_ascii).map(|c| c as u8);
        self
    }

    /// Parse CSV text whose first line holds the field names.
    pub fn parse(&self, content: &str) -> Result<Vec<Row>> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| Self::detect_delimiter(content.lines().next().unwrap_or("")));

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::Headers)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = Self::unique_headers(reader.headers()?);
        let mut rows = Vec::new();

        // Empty lines never reach here; delimiter-only lines are kept as rows
        for result in reader.records() {
            let record = result?;

            if record.len() > headers.len() {
                debug!(
                    line = record.position().map(|p| p.line()),
                    extra = record.len() - headers.len(),
                    "Ignoring cells beyond the header row"
                );
            }

            rows.push(Self::to_row(&headers, &record));
        }

        Ok(rows)
    }

    /// Repeated header names get a `_1`, `_2`, ... suffix so no column is lost.
    fn unique_headers(record: &StringRecord) -> Vec<String> {
        let mut seen: HashSet<String> = record.iter().map(str::to_string).collect();
        let mut used = HashSet::new();
        let mut headers = Vec::with_capacity(record.len());

        for header in record.iter() {
            if used.insert(header.to_string()) {
                headers.push(header.to_string());
                continue;
            }

            let mut count = 1;
            let mut renamed = format!("{}_{}", header, count);
            while seen.contains(&renamed) {
                count += 1;
                renamed = format!("{}_{}", header, count);
            }
            debug!(header, renamed = %renamed, "Renaming duplicate column");
            seen.insert(renamed.clone());
            used.insert(renamed.clone());
            headers.push(renamed);
        }

        headers
    }

    fn to_row(headers: &[String], record: &StringRecord) -> Row {
        headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.clone(), Self::coerce(cell)))
            .collect()
    }

    /// Turn raw cell text into a typed value.
    pub fn coerce(cell: &str) -> CellValue {
        match cell {
            "" => CellValue::Null,
            "true" | "TRUE" => CellValue::Bool(true),
            "false" | "FALSE" => CellValue::Bool(false),
            _ if FLOAT.is_match(cell) => match cell.trim().parse::<f64>() {
                Ok(n) if n.abs() <= MAX_SAFE_INTEGER => CellValue::Number(n),
                _ => CellValue::Text(cell.to_string()),
            },
            _ => CellValue::Text(cell.to_string()),
        }
    }

    /// `;` when the header line has more of them than commas, otherwise `,`.
    pub fn detect_delimiter(first_line: &str) -> u8 {
        let semicolons = first_line.matches(';').count();
        let commas = first_line.matches(',').count();

        if semicolons > commas {
            b';'
        } else {
            b','
        }
    }
}
