//! Error types for fast-move.
//!
//! Every failure is reported before any output is written: a call either
//! validates and fully succeeds, or returns one of these variants.

use thiserror::Error;

/// The main error type for fast-move operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The window is zero or longer than the array along the reduction axis.
    #[error("invalid window {window}: must be in [1, {extent}]")]
    InvalidWindow {
        /// The window that was requested.
        window: usize,
        /// Length of the array along the reduction axis.
        extent: usize,
    },

    /// The axis lies outside `[-ndim, ndim - 1]`.
    #[error("invalid axis {axis} for array of dimension {ndim}")]
    InvalidAxis {
        /// The axis that was requested, before normalization.
        axis: isize,
        /// Number of dimensions of the input array.
        ndim: usize,
    },

    /// The element type is not one of the supported dtypes.
    #[error("unsupported dtype '{dtype}': expected one of int32, int64, float32, float64")]
    UnsupportedDtype {
        /// Name of the rejected dtype.
        dtype: String,
    },

    /// The input array has no dimensions or no elements.
    #[error("empty input: no data provided")]
    EmptyInput,

    /// A caller-provided output buffer is shorter than the input.
    #[error("output buffer too short: required {required} elements, got {actual}")]
    OutputLength {
        /// The number of output slots required.
        required: usize,
        /// The number of output slots provided.
        actual: usize,
    },

    /// No moving-window function goes by this name.
    #[error("unknown function '{name}'")]
    UnknownFunction {
        /// The name that failed to parse.
        name: String,
    },

    /// No reference method goes by this name.
    #[error("unknown method '{name}': expected loop or windows")]
    UnknownMethod {
        /// The name that failed to parse.
        name: String,
    },

    /// Building the output array from its buffer failed.
    #[error("shape error: {0}")]
    Shape(String),
}

impl From<ndarray::ShapeError> for Error {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::Shape(err.to_string())
    }
}

/// Convenience type alias for Results using the fast-move Error type.
pub type Result<T> = std::result::Result<T, Error>;
