//! Runtime dtype tags and dispatch to the statically typed kernels.
//!
//! [`DynArray`] carries an array whose element type is only known at run
//! time (read from a file, chosen on the command line). Its dtype is matched
//! once per call and the generic kernel for that type runs; there is no
//! per-element type inspection.
//!
//! # Example
//!
//! ```
//! use fast_move::dtype::{DType, DynArray};
//! use fast_move::moving::MoveFunc;
//! use ndarray::{ArrayD, IxDyn};
//!
//! let dtype: DType = "int32".parse().unwrap();
//! let values = ArrayD::from_shape_vec(IxDyn(&[4]), vec![0.0, 1.0, 2.0, 3.0]).unwrap();
//! let array = DynArray::from_f64(values, dtype);
//!
//! let out = array.apply(MoveFunc::Mean, 2, -1).unwrap();
//! assert_eq!(out.dtype(), DType::Float64);
//! assert!((out.to_f64()[[3]] - 2.5).abs() < 1e-12);
//! ```

use std::fmt;
use std::str::FromStr;

use ndarray::ArrayD;

use crate::error::{Error, Result};
use crate::moving::{MoveFunc, Moving};
use crate::slow::{self, Method};
use crate::traits::Element;

/// Supported element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
}

impl DType {
    /// Every supported dtype.
    pub const ALL: [Self; 4] = [Self::Int32, Self::Int64, Self::Float32, Self::Float64];

    /// Canonical lowercase name, e.g. `"float64"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }

    /// Returns true for the floating-point dtypes.
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// The dtype every moving-window result of this dtype is produced in.
    #[must_use]
    pub const fn output(self) -> Self {
        match self {
            Self::Float32 => Self::Float32,
            Self::Int32 | Self::Int64 | Self::Float64 => Self::Float64,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int32" | "i32" => Ok(Self::Int32),
            "int64" | "i64" | "int" => Ok(Self::Int64),
            "float32" | "f32" => Ok(Self::Float32),
            "float64" | "f64" | "float" => Ok(Self::Float64),
            _ => Err(Error::UnsupportedDtype {
                dtype: s.to_string(),
            }),
        }
    }
}

/// An N-dimensional array of any supported dtype.
#[derive(Debug, Clone, PartialEq)]
pub enum DynArray {
    /// `int32` elements.
    Int32(ArrayD<i32>),
    /// `int64` elements.
    Int64(ArrayD<i64>),
    /// `float32` elements.
    Float32(ArrayD<f32>),
    /// `float64` elements.
    Float64(ArrayD<f64>),
}

/// Calls `$body` with `$array` bound to the typed array inside `$value`.
macro_rules! dispatch {
    ($value:expr, $array:ident => $body:expr) => {
        match $value {
            DynArray::Int32($array) => $body,
            DynArray::Int64($array) => $body,
            DynArray::Float32($array) => $body,
            DynArray::Float64($array) => $body,
        }
    };
}

impl DynArray {
    /// Runtime dtype of the elements.
    #[must_use]
    pub const fn dtype(&self) -> DType {
        match self {
            Self::Int32(_) => DType::Int32,
            Self::Int64(_) => DType::Int64,
            Self::Float32(_) => DType::Float32,
            Self::Float64(_) => DType::Float64,
        }
    }

    /// Shape of the array.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        dispatch!(self, a => a.shape())
    }

    /// Builds an array of `dtype` from `f64` values.
    ///
    /// Integer dtypes truncate toward zero and saturate at the type's
    /// bounds; NaN becomes 0. Callers that must reject non-integral input
    /// check it before converting.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_f64(values: ArrayD<f64>, dtype: DType) -> Self {
        match dtype {
            DType::Int32 => Self::Int32(values.mapv(|v| v as i32)),
            DType::Int64 => Self::Int64(values.mapv(|v| v as i64)),
            DType::Float32 => Self::Float32(values.mapv(|v| v as f32)),
            DType::Float64 => Self::Float64(values),
        }
    }

    /// Copies the elements out as `f64`.
    #[must_use]
    pub fn to_f64(&self) -> ArrayD<f64> {
        match self {
            Self::Int32(a) => a.mapv(f64::from),
            Self::Int64(a) => a.mapv(Element::to_output),
            Self::Float32(a) => a.mapv(f64::from),
            Self::Float64(a) => a.clone(),
        }
    }

    /// Applies `func` along `axis` with the fast kernels.
    ///
    /// # Errors
    ///
    /// See [`Moving::compute`].
    pub fn apply(&self, func: MoveFunc, window: usize, axis: isize) -> Result<Self> {
        self.apply_with(&Moving::new(func).axis(axis), window)
    }

    /// Applies a configured computation.
    ///
    /// # Errors
    ///
    /// See [`Moving::compute`].
    pub fn apply_with(&self, moving: &Moving, window: usize) -> Result<Self> {
        dispatch!(self, a => moving.compute(a, window).map(Self::from))
    }

    /// Applies `func` along `axis` with the reference implementation.
    ///
    /// # Errors
    ///
    /// See [`slow::move_func`].
    pub fn apply_slow(
        &self,
        func: MoveFunc,
        window: usize,
        axis: isize,
        method: Method,
    ) -> Result<Self> {
        dispatch!(self, a => slow::move_func(func, a, window, axis, method).map(Self::from))
    }
}

macro_rules! impl_from_array {
    ($($ty:ty => $variant:ident),*) => {
        $(
            impl From<ArrayD<$ty>> for DynArray {
                fn from(array: ArrayD<$ty>) -> Self {
                    Self::$variant(array)
                }
            }
        )*
    };
}

impl_from_array!(i32 => Int32, i64 => Int64, f32 => Float32, f64 => Float64);
