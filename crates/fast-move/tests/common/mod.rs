//! Shared test utilities for fast-move tests.

use fast_move::dtype::{DType, DynArray};
use ndarray::{ArrayD, IxDyn};

/// Shapes every reference comparison runs over, ranks 1 through 4.
#[allow(dead_code)]
pub const SHAPES: &[&[usize]] = &[
    &[4],
    &[1, 6],
    &[2, 3],
    &[6, 1],
    &[1, 1, 24],
    &[24, 1, 1],
    &[1, 24, 1],
    &[2, 3, 4],
    &[1, 2, 3, 4],
];

/// `0, 1, 2, ...` laid out in `shape`.
#[allow(dead_code)]
pub fn arange(shape: &[usize]) -> ArrayD<f64> {
    let size: usize = shape.iter().product();
    let values = (0..size).map(|i| i as f64).collect();
    ArrayD::from_shape_vec(IxDyn(shape), values).expect("shape matches arange length")
}

/// Test arrays of one shape and dtype.
///
/// Yields `arange` and its negation; float dtypes additionally yield copies
/// with NaN written into the first 1, 2, ... elements (and their negations)
/// until the array is all NaN.
#[allow(dead_code)]
pub fn arrays(shape: &[usize], dtype: DType) -> Vec<DynArray> {
    let base = arange(shape);
    let mut out = vec![
        DynArray::from_f64(base.clone(), dtype),
        DynArray::from_f64(-&base, dtype),
    ];
    if dtype.is_float() {
        let mut a = base;
        for i in 0..a.len() {
            if let Some(x) = a.iter_mut().nth(i) {
                *x = f64::NAN;
            }
            out.push(DynArray::from_f64(a.clone(), dtype));
            out.push(DynArray::from_f64(-&a, dtype));
        }
    }
    out
}

/// Windows to test along an axis of length `extent`.
#[allow(dead_code)]
pub fn windows(extent: usize) -> std::ops::RangeInclusive<usize> {
    1..=extent.max(1)
}

/// Exact equality with NaN equal to NaN.
#[allow(dead_code)]
pub fn same_or_both_nan(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

/// Approximate equality check for floating-point values.
///
/// Two NaN values are considered equal.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    a == b || (a - b).abs() < eps
}

/// Standard epsilon for high-precision comparisons.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-10;

/// Verify that the first `n` values are NaN and the rest are not.
#[allow(dead_code)]
pub fn verify_nan_prefix(data: &[f64], expected_nan_count: usize) -> bool {
    data.iter()
        .enumerate()
        .all(|(i, x)| x.is_nan() == (i < expected_nan_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrays_count() {
        assert_eq!(arrays(&[2, 3], DType::Int32).len(), 2);
        assert_eq!(arrays(&[2, 3], DType::Float64).len(), 14);
    }

    #[test]
    fn test_verify_nan_prefix() {
        assert!(verify_nan_prefix(&[f64::NAN, 1.0, 2.0], 1));
        assert!(!verify_nan_prefix(&[f64::NAN, f64::NAN, 2.0], 1));
    }
}
