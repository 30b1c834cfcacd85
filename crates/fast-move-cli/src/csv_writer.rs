//! CSV output module for writing moving-window results.
//!
//! The result has the input's shape, so it is written back as the same
//! matrix: the header row (if the input had one) followed by one record per
//! row. NaN is written as `NaN`. `float32` results are formatted as `f32` so
//! they do not show widening noise.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use fast_move::dtype::DynArray;
use log::info;
use ndarray::{ArrayView2, Ix2};
use num_traits::Float;

use crate::error::{CliError, Result};

/// Output destination: either stdout or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDest {
    /// Write to stdout.
    Stdout,
    /// Write to a file at the given path.
    File(String),
}

impl OutputDest {
    /// Destination for an optional `-o` path.
    #[must_use]
    pub fn from_path(path: Option<&str>) -> Self {
        path.map_or(Self::Stdout, |p| Self::File(p.to_string()))
    }

    /// Create a writer for this output destination.
    ///
    /// # Errors
    ///
    /// Returns `CliError::IoError` if the file cannot be created.
    pub fn writer(&self) -> Result<Box<dyn Write>> {
        match self {
            Self::Stdout => Ok(Box::new(io::stdout())),
            Self::File(path) => {
                let file = File::create(path).map_err(|e| CliError::IoError {
                    source: e,
                    path: Some(path.clone()),
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }
}

/// Formats one value, writing NaN as `NaN`.
fn format_value<T: Float + Display>(value: T) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        value.to_string()
    }
}

/// Writes a header and 2-D values to any writer.
///
/// # Errors
///
/// Returns `CliError::IoError` if writing fails.
pub fn write_rows<T, W>(writer: W, header: Option<&[String]>, data: ArrayView2<'_, T>) -> Result<()>
where
    T: Float + Display,
    W: Write,
{
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    if let Some(names) = header {
        csv_writer.write_record(names)?;
    }
    for row in data.rows() {
        csv_writer.write_record(row.iter().map(|&v| format_value(v)))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes a 2-D result to `dest`.
///
/// # Errors
///
/// Returns `CliError::ComputeError` if `result` is not 2-D and
/// `CliError::IoError` if writing fails.
pub fn write_matrix(result: &DynArray, header: Option<&[String]>, dest: &OutputDest) -> Result<()> {
    let writer = dest.writer()?;
    match result {
        DynArray::Float32(a) => write_rows(writer, header, a.view().into_dimensionality::<Ix2>()?),
        DynArray::Float64(a) => write_rows(writer, header, a.view().into_dimensionality::<Ix2>()?),
        integer => {
            let widened = integer.to_f64().into_dimensionality::<Ix2>()?;
            write_rows(writer, header, widened.view())
        }
    }?;
    if let OutputDest::File(path) = dest {
        info!("wrote {} to {path}", result.dtype());
    }
    Ok(())
}
