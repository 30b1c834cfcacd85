//! Brute-force reference implementations of the moving-window reductions.
//!
//! Every output position recomputes its whole window, O(n * window) per
//! lane. These functions exist to check the fast kernels against and share
//! their signature, validation and edge policy.
//!
//! Two methods are provided so the reference does not hinge on a single
//! indexing scheme:
//!
//! - [`Method::Loop`]: explicit index loops over each lane
//! - [`Method::Windows`]: ndarray's `windows` producer over each lane
//!
//! # Example
//!
//! ```
//! use fast_move::slow::{self, Method};
//! use ndarray::array;
//!
//! let a = array![[0.0_f64, 1.0, 2.0], [3.0, 4.0, 5.0]];
//! let loop_max = slow::move_max(&a, 2, 0, Method::Loop).unwrap();
//! let win_max = slow::move_max(&a, 2, 0, Method::Windows).unwrap();
//! assert_eq!(loop_max.row(1), win_max.row(1));
//! ```

use std::fmt;
use std::str::FromStr;

use ndarray::{Array, ArrayBase, ArrayView1, ArrayViewMut1, Axis, Data, Dimension, Zip};
use num_traits::Float;

use crate::error::{Error, Result};
use crate::kernels::{Extremum, NanPolicy};
use crate::moving::MoveFunc;
use crate::traits::{validate_move_input, Element, SeriesElement};

/// How the reference walks each window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    /// Index loops.
    #[default]
    Loop,
    /// `ArrayBase::windows`.
    Windows,
}

impl Method {
    /// Lowercase name as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Loop => "loop",
            Self::Windows => "windows",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loop" => Ok(Self::Loop),
            "windows" | "strides" => Ok(Self::Windows),
            _ => Err(Error::UnknownMethod {
                name: s.to_string(),
            }),
        }
    }
}

/// Reference computation of `func` over `array` along `axis`.
///
/// # Errors
///
/// Same validation as [`crate::moving::Moving::compute`].
pub fn move_func<T, S, D>(
    func: MoveFunc,
    array: &ArrayBase<S, D>,
    window: usize,
    axis: isize,
    method: Method,
) -> Result<Array<T::Output, D>>
where
    T: Element,
    S: Data<Elem = T>,
    D: Dimension,
{
    let axis = Axis(validate_move_input(array.shape(), window, axis)?);
    let mut out = Array::from_elem(array.raw_dim(), T::Output::nan());

    Zip::from(array.lanes(axis))
        .and(out.lanes_mut(axis))
        .for_each(|src, dst| match method {
            Method::Loop => by_loop(func, src, dst, window),
            Method::Windows => by_windows(func, src, dst, window),
        });
    Ok(out)
}

fn by_loop<T: Element>(
    func: MoveFunc,
    src: ArrayView1<'_, T>,
    mut dst: ArrayViewMut1<'_, T::Output>,
    window: usize,
) {
    for i in window - 1..src.len() {
        let start = i + 1 - window;
        dst[i] = reduce(func, (start..=i).map(|j| src[j].to_output()));
    }
}

fn by_windows<T: Element>(
    func: MoveFunc,
    src: ArrayView1<'_, T>,
    mut dst: ArrayViewMut1<'_, T::Output>,
    window: usize,
) {
    for (k, values) in src.windows(window).into_iter().enumerate() {
        dst[k + window - 1] = reduce(func, values.iter().map(|x| x.to_output()));
    }
}

/// Reduces one complete window.
fn reduce<F, I>(func: MoveFunc, values: I) -> F
where
    F: SeriesElement,
    I: IntoIterator<Item = F>,
{
    let skip_nan = func.nan_policy() == NanPolicy::Skip;
    let kind = func.extremum();
    let mut acc: Option<F> = None;
    let mut count = 0_usize;

    for value in values {
        if value.is_nan() {
            if skip_nan {
                continue;
            }
            return F::nan();
        }
        count += 1;
        acc = Some(match (acc, kind) {
            (None, _) => value,
            (Some(sum), None) => sum + value,
            (Some(best), Some(Extremum::Min)) => best.min(value),
            (Some(best), Some(Extremum::Max)) => best.max(value),
        });
    }

    match (acc, kind) {
        (None, _) => F::nan(),
        (Some(sum), None) => F::from_usize(count).map_or_else(|_| F::nan(), |n| sum / n),
        (Some(best), Some(_)) => best,
    }
}

macro_rules! define_slow_fn {
    ($($(#[$doc:meta])* $name:ident => $func:expr;)*) => {
        $(
            $(#[$doc])*
            ///
            /// # Errors
            ///
            /// See [`move_func`].
            pub fn $name<T, S, D>(
                array: &ArrayBase<S, D>,
                window: usize,
                axis: isize,
                method: Method,
            ) -> Result<Array<T::Output, D>>
            where
                T: Element,
                S: Data<Elem = T>,
                D: Dimension,
            {
                move_func($func, array, window, axis, method)
            }
        )*
    };
}

define_slow_fn! {
    /// Reference moving mean.
    move_mean => MoveFunc::Mean;
    /// Reference moving mean ignoring NaN.
    move_nanmean => MoveFunc::NanMean;
    /// Reference moving minimum.
    move_min => MoveFunc::Min;
    /// Reference moving maximum.
    move_max => MoveFunc::Max;
    /// Reference moving minimum ignoring NaN.
    move_nanmin => MoveFunc::NanMin;
    /// Reference moving maximum ignoring NaN.
    move_nanmax => MoveFunc::NanMax;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    const METHODS: [Method; 2] = [Method::Loop, Method::Windows];

    fn same(a: f64, b: f64) -> bool {
        (a.is_nan() && b.is_nan()) || (a - b).abs() < 1e-12
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("loop".parse::<Method>().unwrap(), Method::Loop);
        assert_eq!("Windows".parse::<Method>().unwrap(), Method::Windows);
        assert_eq!("strides".parse::<Method>().unwrap(), Method::Windows);
        assert!(matches!(
            "fast".parse::<Method>(),
            Err(Error::UnknownMethod { .. })
        ));
        assert_eq!(Method::default(), Method::Loop);
    }

    #[test]
    fn test_slow_concrete_scenario() {
        let a = array![0.0_f64, 1.0, 2.0, 3.0];
        for method in METHODS {
            let mean = move_mean(&a, 2, 0, method).unwrap();
            let min = move_min(&a, 2, 0, method).unwrap();
            let max = move_max(&a, 2, 0, method).unwrap();
            assert!(mean[0].is_nan() && min[0].is_nan() && max[0].is_nan());
            for (i, expected) in [0.5, 1.5, 2.5].iter().enumerate() {
                assert!(same(mean[i + 1], *expected), "{method}");
            }
            assert_eq!(min.to_vec()[1..], [0.0, 1.0, 2.0]);
            assert_eq!(max.to_vec()[1..], [1.0, 2.0, 3.0]);
        }
    }

    #[test]
    fn test_slow_nan_policies() {
        let nan = f64::NAN;
        let a = array![0.0_f64, nan, 2.0, 3.0];
        for method in METHODS {
            let nanmean = move_nanmean(&a, 2, 0, method).unwrap();
            assert!(same(nanmean[1], 0.0) && same(nanmean[2], 2.0) && same(nanmean[3], 2.5));

            let nanmin = move_nanmin(&a, 2, 0, method).unwrap();
            assert_eq!(nanmin.to_vec()[1..], [0.0, 2.0, 2.0]);

            let max = move_max(&a, 2, 0, method).unwrap();
            assert!(max[1].is_nan() && max[2].is_nan());
            assert_eq!(max[3], 3.0);
        }
    }

    #[test]
    fn test_slow_all_nan_window() {
        let nan = f64::NAN;
        let a = array![nan, nan, 1.0];
        for method in METHODS {
            let out = move_nanmax(&a, 2, 0, method).unwrap();
            assert!(out[1].is_nan());
            assert_eq!(out[2], 1.0);
        }
    }

    #[test]
    fn test_slow_methods_agree_on_every_axis() {
        let a = Array2::from_shape_fn((4, 5), |(i, j)| ((i * 7 + j * 3) % 11) as f64);
        for func in MoveFunc::ALL {
            for axis in [0_isize, 1, -1, -2] {
                let by_loop = move_func(func, &a, 3, axis, Method::Loop).unwrap();
                let by_windows = move_func(func, &a, 3, axis, Method::Windows).unwrap();
                for (x, y) in by_loop.iter().zip(by_windows.iter()) {
                    assert!(same(*x, *y), "{func} axis {axis}");
                }
            }
        }
    }

    #[test]
    fn test_slow_integer_input_widens() {
        let a = array![[1_i32, 2, 3], [4, 5, 6]];
        let out = move_mean(&a, 2, 1, Method::Loop).unwrap();
        assert!(same(out[[1, 2]], 5.5));
    }

    #[test]
    fn test_slow_validates_like_fast() {
        let a = array![1.0_f64, 2.0];
        assert!(matches!(
            move_min(&a, 3, 0, Method::Loop),
            Err(Error::InvalidWindow { .. })
        ));
        assert!(matches!(
            move_min(&a, 1, -2, Method::Windows),
            Err(Error::InvalidAxis { .. })
        ));
    }
}
