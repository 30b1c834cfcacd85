//! CSV parsing module for reading numeric matrices.
//!
//! A CSV file is read as a 2-D matrix: each record is a row (axis 0) and
//! each field a column (axis 1). Every row must have the same number of
//! fields.
//!
//! # Header Detection
//!
//! The first record is a header when any of its fields is neither empty nor
//! a number. Header names are kept so the output can repeat them.
//!
//! # Missing Values
//!
//! Empty fields and `nan` (any case) parse as NaN.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use ndarray::Array2;

use crate::error::{CliError, Result};

/// A numeric matrix read from CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvMatrix {
    /// Column names, if the file had a header row.
    pub header: Option<Vec<String>>,
    /// The values, one row per data record.
    pub data: Array2<f64>,
}

impl CsvMatrix {
    /// Number of data rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }
}

/// Parse a string value to f64, treating empty and `nan` as NaN.
fn parse_value(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        Some(f64::NAN)
    } else {
        trimmed.parse::<f64>().ok()
    }
}

/// Returns true if any field of `record` is not a number.
fn is_header(record: &StringRecord) -> bool {
    record.iter().any(|field| parse_value(field).is_none())
}

/// Parse a CSV file into a matrix.
///
/// # Errors
///
/// Returns `CliError::IoError` if the file cannot be read, or
/// `CliError::CsvParseError` if it is not a rectangular numeric matrix.
pub fn parse_csv<P: AsRef<Path>>(path: P) -> Result<CsvMatrix> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CliError::IoError {
        source: e,
        path: Some(path.display().to_string()),
    })?;
    info!("reading {}", path.display());
    parse_csv_from_reader(BufReader::new(file))
}

/// Parse CSV data from a reader.
///
/// This is useful for testing or parsing from non-file sources.
///
/// # Errors
///
/// See [`parse_csv`].
pub fn parse_csv_from_reader<R: Read>(reader: R) -> Result<CsvMatrix> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut header: Option<Vec<String>> = None;
    let mut values: Vec<f64> = Vec::new();
    let mut cols: Option<usize> = None;
    let mut rows = 0_usize;

    for (idx, result) in csv_reader.records().enumerate() {
        let record = result?;
        let line = record.position().map_or(idx as u64 + 1, csv::Position::line);

        if idx == 0 && is_header(&record) {
            header = Some(record.iter().map(String::from).collect());
            cols = Some(record.len());
            continue;
        }

        let expected = *cols.get_or_insert(record.len());
        if record.len() != expected {
            return Err(CliError::CsvParseError {
                message: format!("found {} fields, expected {expected}", record.len()),
                line: Some(line),
            });
        }

        for field in &record {
            let value = parse_value(field).ok_or_else(|| CliError::CsvParseError {
                message: format!("cannot parse '{field}' as number"),
                line: Some(line),
            })?;
            values.push(value);
        }
        rows += 1;
    }

    let cols = cols.unwrap_or(0);
    if rows == 0 || cols == 0 {
        return Err(CliError::CsvParseError {
            message: "no data rows".to_string(),
            line: None,
        });
    }

    debug!("parsed {rows}x{cols} matrix, header: {}", header.is_some());
    let data = Array2::from_shape_vec((rows, cols), values)?;
    Ok(CsvMatrix { header, data })
}
