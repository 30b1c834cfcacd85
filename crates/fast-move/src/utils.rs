//! Comparison and NaN helpers shared by the tests and the CLI.
//!
//! Moving-window outputs are full of NaN (every lane starts with
//! `window - 1` of them), so the comparisons here treat two NaN as equal.
//!
//! # Example
//!
//! ```
//! use fast_move::utils::{almost_equal_decimal, approx_eq, EPSILON};
//!
//! assert!(approx_eq(1.0 / 3.0, 0.333333333333333, EPSILON));
//! assert!(almost_equal_decimal(2.5, 2.500001, 5));
//! assert!(almost_equal_decimal(f64::NAN, f64::NAN, 5));
//! ```

use ndarray::{ArrayBase, Data, Dimension};
use num_traits::Float;

use crate::traits::SeriesElement;

/// Tolerance for results that involve only a handful of operations.
pub const EPSILON: f64 = 1e-10;

/// Default number of decimals for [`almost_equal_decimal`].
pub const DEFAULT_DECIMAL: i32 = 5;

/// Absolute-tolerance equality, with NaN equal to NaN.
///
/// Equal infinities compare equal.
///
/// # Example
///
/// ```
/// use fast_move::utils::{approx_eq, EPSILON};
///
/// assert!(approx_eq(1.0, 1.0 + 1e-11, EPSILON));
/// assert!(approx_eq(f64::INFINITY, f64::INFINITY, EPSILON));
/// assert!(!approx_eq(f64::NAN, 1.0, EPSILON));
/// ```
#[inline]
#[must_use]
pub fn approx_eq<T: SeriesElement>(a: T, b: T, tolerance: T) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    a == b || (a - b).abs() < tolerance
}

/// Returns true if `a` and `b` agree to `decimal` places.
///
/// The test is `|a - b| < 1.5 * 10^-decimal`. NaN equals NaN and
/// infinities must match exactly.
#[must_use]
pub fn almost_equal_decimal<T: SeriesElement>(a: T, b: T, decimal: i32) -> bool {
    let tolerance = <T as num_traits::NumCast>::from(1.5 * 10f64.powi(-decimal))
        .unwrap_or_else(T::epsilon);
    approx_eq(a, b, tolerance)
}

/// Element-wise [`almost_equal_decimal`] over two arrays of the same shape.
///
/// Returns false if the shapes differ.
#[must_use]
pub fn arrays_almost_equal<T, S1, S2, D>(
    a: &ArrayBase<S1, D>,
    b: &ArrayBase<S2, D>,
    decimal: i32,
) -> bool
where
    T: SeriesElement,
    S1: Data<Elem = T>,
    S2: Data<Elem = T>,
    D: Dimension,
{
    a.shape() == b.shape()
        && a
            .iter()
            .zip(b.iter())
            .all(|(&x, &y)| almost_equal_decimal(x, y, decimal))
}

/// Number of NaN values in a slice.
#[inline]
#[must_use]
pub fn count_nans<T: Float>(data: &[T]) -> usize {
    data.iter().filter(|x| x.is_nan()).count()
}

/// Number of NaN values at the start of a slice.
///
/// For a rank-1 moving-window output over NaN-free input this is
/// `window - 1`.
///
/// ```
/// use fast_move::utils::count_nan_prefix;
///
/// let data = [f64::NAN, f64::NAN, 1.0, 2.0, f64::NAN];
/// assert_eq!(count_nan_prefix(&data), 2);
/// ```
#[inline]
#[must_use]
pub fn count_nan_prefix<T: Float>(data: &[T]) -> usize {
    data.iter().take_while(|x| x.is_nan()).count()
}
