//! fast-move CLI library
//!
//! This module exposes the CLI components for testing and reuse. [`run`]
//! is the whole command: read the CSV matrix, convert it to the requested
//! dtype, apply the moving-window reduction and write the result.

pub mod args;
pub mod csv_parser;
pub mod csv_writer;
pub mod error;

pub use error::{CliError, Result};

use fast_move::dtype::{DType, DynArray};
use fast_move::moving::MoveFunc;
use log::info;
use ndarray::Array2;

use crate::args::{Args, Engine};
use crate::csv_parser::CsvMatrix;
use crate::csv_writer::OutputDest;

/// Runs the command described by `args`.
///
/// # Errors
///
/// Any I/O, parse, argument or computation error, as a [`CliError`].
pub fn run(args: &Args) -> Result<()> {
    let func = args.command.func();
    let w = args.command.window_args();

    let matrix = csv_parser::parse_csv(&w.input)?;
    info!(
        "{func} window={} axis={} dtype={} method={:?} on {}x{} matrix",
        w.window,
        w.axis,
        w.dtype,
        w.method,
        matrix.rows(),
        matrix.cols()
    );

    let result = compute(&matrix, func, w.window, w.axis, w.dtype, w.method)?;
    let dest = OutputDest::from_path(w.output.as_deref());
    csv_writer::write_matrix(&result, matrix.header.as_deref(), &dest)
}

/// Applies `func` to a parsed matrix.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` if an integer dtype is requested for
/// values that are not integers, and `CliError::ComputeError` if the window
/// or axis is rejected.
pub fn compute(
    matrix: &CsvMatrix,
    func: MoveFunc,
    window: usize,
    axis: isize,
    dtype: DType,
    engine: Engine,
) -> Result<DynArray> {
    if !dtype.is_float() {
        check_integral(&matrix.data, dtype)?;
    }
    let array = DynArray::from_f64(matrix.data.clone().into_dyn(), dtype);
    let result = match engine.reference_method() {
        None => array.apply(func, window, axis)?,
        Some(method) => array.apply_slow(func, window, axis, method)?,
    };
    Ok(result)
}

/// Rejects values an integer dtype cannot hold exactly.
fn check_integral(data: &Array2<f64>, dtype: DType) -> Result<()> {
    // Half-open range of representable values
    let bits = if dtype == DType::Int32 { 31 } else { 63 };
    let (lo, hi) = (-(2f64.powi(bits)), 2f64.powi(bits));
    match data
        .iter()
        .find(|&&v| !v.is_finite() || v.fract() != 0.0 || v < lo || v >= hi)
    {
        Some(bad) => Err(CliError::InvalidArgument {
            argument: "--dtype".to_string(),
            reason: format!("{dtype} cannot hold the value {bad}"),
            suggestion: Some("Use --dtype float64 for data with fractions or missing values".to_string()),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_parser::parse_csv_from_reader;
    use ndarray::Ix2;

    fn matrix(csv: &str) -> CsvMatrix {
        parse_csv_from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_compute_mean_down_columns() {
        let m = matrix("a,b\n0,10\n1,11\n2,12\n");
        let out = compute(&m, MoveFunc::Mean, 2, 0, DType::Float64, Engine::Fast)
            .unwrap()
            .to_f64();
        assert!(out[[0, 0]].is_nan());
        assert!((out[[1, 0]] - 0.5).abs() < 1e-12);
        assert!((out[[2, 1]] - 11.5).abs() < 1e-12);
    }

    #[test]
    fn test_compute_engines_agree() {
        let m = matrix("3,1,4,1,5\n9,2,6,5,3\n");
        for engine in [Engine::Fast, Engine::Loop, Engine::Windows] {
            let out = compute(&m, MoveFunc::Max, 3, -1, DType::Float64, engine)
                .unwrap()
                .to_f64()
                .into_dimensionality::<Ix2>()
                .unwrap();
            assert_eq!(out.row(0).to_vec()[2..], [4.0, 4.0, 5.0]);
            assert_eq!(out.row(1).to_vec()[2..], [9.0, 6.0, 6.0]);
        }
    }

    #[test]
    fn test_compute_integer_dtype() {
        let m = matrix("1,2,3\n");
        let out = compute(&m, MoveFunc::Min, 2, 1, DType::Int32, Engine::Fast).unwrap();
        assert_eq!(out.dtype(), DType::Float64);
    }

    #[test]
    fn test_compute_integer_dtype_rejects_fractions_and_nan() {
        for csv in ["1,2.5\n", "1,\n"] {
            let m = matrix(csv);
            let err = compute(&m, MoveFunc::Min, 1, 1, DType::Int64, Engine::Fast).unwrap_err();
            assert!(matches!(err, CliError::InvalidArgument { .. }), "{csv:?}");
        }
    }

    #[test]
    fn test_compute_invalid_window() {
        let m = matrix("1,2\n3,4\n");
        let err = compute(&m, MoveFunc::Mean, 3, 0, DType::Float64, Engine::Fast).unwrap_err();
        assert!(matches!(
            err,
            CliError::ComputeError {
                source: fast_move::Error::InvalidWindow { .. }
            }
        ));
    }
}
