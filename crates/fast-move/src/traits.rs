//! Core traits for fast-move numeric operations.
//!
//! Two traits split the element types:
//!
//! - [`SeriesElement`] is the floating-point type results are computed and
//!   stored in. It must be able to hold NaN for positions without enough
//!   window history.
//! - [`Element`] is any supported input type. Each input type names the
//!   [`SeriesElement`] its results are produced in: floats keep their own
//!   width, integers widen to `f64`.
//!
//! The module also holds the window and axis validation shared by the fast
//! kernels and the reference implementation.
//!
//! # Example
//!
//! ```
//! use fast_move::traits::{normalize_axis, validate_window, Element};
//!
//! assert_eq!(normalize_axis(-1, 3).unwrap(), 2);
//! assert!(validate_window(0, 4).is_err());
//!
//! let widened: f64 = 7_i32.to_output();
//! assert!((widened - 7.0).abs() < 1e-12);
//! ```

use std::fmt::Debug;

use num_traits::{Float, NumCast};

use crate::dtype::DType;
use crate::error::{Error, Result};

/// A floating-point type that moving-window results are written in.
///
/// Implemented for every type satisfying the bounds, which in practice means
/// `f32` and `f64`.
pub trait SeriesElement: Float + NumCast + Copy + Default + Debug + Send + Sync + 'static {
    /// Creates a series element from a `usize` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::Shape` if the value cannot be represented in this type.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value)
            .ok_or_else(|| Error::Shape(format!("cannot represent {value} as a float")))
    }
}

impl<T: Float + NumCast + Copy + Default + Debug + Send + Sync + 'static> SeriesElement for T {}

/// A supported input element type.
///
/// The associated [`Output`](Element::Output) fixes the dtype of every
/// moving-window result computed from this type.
///
/// `i64` values beyond `2^53` in magnitude are rounded to the nearest `f64`,
/// so a moving min or max over such values can return a number that is not
/// in the input.
pub trait Element: Copy + PartialOrd + Debug + Send + Sync + 'static {
    /// The floating-point type results are produced in.
    type Output: SeriesElement;

    /// Runtime tag of this type.
    const DTYPE: DType;

    /// Converts one input value to the output type.
    fn to_output(self) -> Self::Output;
}

impl Element for f64 {
    type Output = Self;
    const DTYPE: DType = DType::Float64;

    #[inline]
    fn to_output(self) -> Self {
        self
    }
}

impl Element for f32 {
    type Output = Self;
    const DTYPE: DType = DType::Float32;

    #[inline]
    fn to_output(self) -> Self {
        self
    }
}

impl Element for i32 {
    type Output = f64;
    const DTYPE: DType = DType::Int32;

    #[inline]
    fn to_output(self) -> f64 {
        <f64 as From<i32>>::from(self)
    }
}

impl Element for i64 {
    type Output = f64;
    const DTYPE: DType = DType::Int64;

    #[inline]
    #[allow(clippy::cast_precision_loss)]
    fn to_output(self) -> f64 {
        self as f64
    }
}

/// Normalizes a possibly negative axis against `ndim` dimensions.
///
/// # Errors
///
/// Returns `Error::EmptyInput` for `ndim == 0` and `Error::InvalidAxis` if
/// `axis` is outside `[-ndim, ndim - 1]`.
#[inline]
pub fn normalize_axis(axis: isize, ndim: usize) -> Result<usize> {
    if ndim == 0 {
        return Err(Error::EmptyInput);
    }
    let invalid = || Error::InvalidAxis { axis, ndim };
    let signed_ndim = isize::try_from(ndim).map_err(|_| invalid())?;
    let normalized = if axis < 0 { axis + signed_ndim } else { axis };
    if (0..signed_ndim).contains(&normalized) {
        usize::try_from(normalized).map_err(|_| invalid())
    } else {
        Err(invalid())
    }
}

/// Validates that `window` fits in a lane of length `extent`.
///
/// # Errors
///
/// Returns `Error::InvalidWindow` unless `1 <= window <= extent`.
#[inline]
pub const fn validate_window(window: usize, extent: usize) -> Result<()> {
    if window == 0 || window > extent {
        Err(Error::InvalidWindow { window, extent })
    } else {
        Ok(())
    }
}

/// Validates shape, axis and window together and returns the normalized axis.
///
/// # Errors
///
/// - `Error::EmptyInput` if the shape has no dimensions or a zero-length one
/// - `Error::InvalidAxis` if the axis is out of range
/// - `Error::InvalidWindow` if the window does not fit along the axis
pub fn validate_move_input(shape: &[usize], window: usize, axis: isize) -> Result<usize> {
    let axis = normalize_axis(axis, shape.len())?;
    if shape.iter().any(|&dim| dim == 0) {
        return Err(Error::EmptyInput);
    }
    validate_window(window, shape[axis])?;
    Ok(axis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_element_from_usize() {
        let val: f64 = SeriesElement::from_usize(42).unwrap();
        assert!((val - 42.0).abs() < 1e-10);

        let val_f32: f32 = SeriesElement::from_usize(100).unwrap();
        assert!((val_f32 - 100.0).abs() < 1e-5);
    }

    #[test]
    fn test_element_output_types() {
        let a: f64 = 3_i32.to_output();
        let b: f64 = (-4_i64).to_output();
        let c: f32 = 1.5_f32.to_output();
        assert!((a - 3.0).abs() < 1e-12);
        assert!((b + 4.0).abs() < 1e-12);
        assert!((c - 1.5).abs() < 1e-6);
        assert!(f64::NAN.to_output().is_nan());
    }

    #[test]
    fn test_element_dtype_tags() {
        assert_eq!(<i32 as Element>::DTYPE, DType::Int32);
        assert_eq!(<i64 as Element>::DTYPE, DType::Int64);
        assert_eq!(<f32 as Element>::DTYPE, DType::Float32);
        assert_eq!(<f64 as Element>::DTYPE, DType::Float64);
    }

    #[test]
    fn test_normalize_axis_positive() {
        assert_eq!(normalize_axis(0, 1).unwrap(), 0);
        assert_eq!(normalize_axis(2, 3).unwrap(), 2);
    }

    #[test]
    fn test_normalize_axis_negative() {
        assert_eq!(normalize_axis(-1, 1).unwrap(), 0);
        assert_eq!(normalize_axis(-1, 4).unwrap(), 3);
        assert_eq!(normalize_axis(-4, 4).unwrap(), 0);
    }

    #[test]
    fn test_normalize_axis_out_of_range() {
        assert_eq!(
            normalize_axis(3, 3),
            Err(Error::InvalidAxis { axis: 3, ndim: 3 })
        );
        assert_eq!(
            normalize_axis(-4, 3),
            Err(Error::InvalidAxis { axis: -4, ndim: 3 })
        );
    }

    #[test]
    fn test_normalize_axis_zero_dim() {
        assert_eq!(normalize_axis(0, 0), Err(Error::EmptyInput));
    }

    #[test]
    fn test_validate_window() {
        assert!(validate_window(1, 1).is_ok());
        assert!(validate_window(4, 4).is_ok());
        assert_eq!(
            validate_window(0, 4),
            Err(Error::InvalidWindow {
                window: 0,
                extent: 4
            })
        );
        assert_eq!(
            validate_window(5, 4),
            Err(Error::InvalidWindow {
                window: 5,
                extent: 4
            })
        );
    }

    #[test]
    fn test_validate_move_input() {
        assert_eq!(validate_move_input(&[2, 3, 4], 3, -2).unwrap(), 1);
        assert!(matches!(
            validate_move_input(&[2, 3, 4], 4, 1),
            Err(Error::InvalidWindow { window: 4, extent: 3 })
        ));
        assert!(matches!(
            validate_move_input(&[2, 0], 1, 0),
            Err(Error::EmptyInput)
        ));
        assert!(matches!(
            validate_move_input(&[], 1, 0),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_series_element_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<f64>();
        assert_send_sync::<f32>();
    }

    #[test]
    fn test_i64_output_rounds_beyond_f64_mantissa() {
        let exact = (1_i64 << 53).to_output();
        assert_eq!(exact, 9_007_199_254_740_992.0);
        assert_eq!(((1_i64 << 53) + 1).to_output(), exact);
        assert_eq!(i32::MIN.to_output(), -2_147_483_648.0);
    }
}
