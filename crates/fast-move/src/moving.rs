//! The six moving-window reductions over N-dimensional arrays.
//!
//! Every function takes an array of any rank, a window and an axis
//! (negative axes count from the end, `-1` is the last axis) and returns an
//! array of the same shape. Position `i` along the axis holds the reduction
//! of positions `i - window + 1 ..= i`; the first `window - 1` positions of
//! every lane are NaN.
//!
//! | function       | NaN inputs                           |
//! |----------------|--------------------------------------|
//! | `move_mean`    | NaN while a NaN is in the window     |
//! | `move_nanmean` | ignored; all-NaN window gives NaN    |
//! | `move_min`     | NaN while a NaN is in the window     |
//! | `move_max`     | NaN while a NaN is in the window     |
//! | `move_nanmin`  | ignored; all-NaN window gives NaN    |
//! | `move_nanmax`  | ignored; all-NaN window gives NaN    |
//!
//! Results are produced in [`Element::Output`]: `f32` and `f64` keep their
//! type, integer inputs widen to `f64`.
//!
//! # Example
//!
//! ```
//! use fast_move::moving::{move_max, move_mean, move_min};
//! use ndarray::array;
//!
//! let a = array![0.0_f64, 1.0, 2.0, 3.0];
//!
//! let mean = move_mean(&a, 2, 0).unwrap();
//! assert!(mean[0].is_nan());
//! assert_eq!(mean.slice(ndarray::s![1..]).to_vec(), vec![0.5, 1.5, 2.5]);
//!
//! let max = move_max(&a, 2, 0).unwrap();
//! assert_eq!(max.slice(ndarray::s![1..]).to_vec(), vec![1.0, 2.0, 3.0]);
//!
//! let min = move_min(&a, 2, -1).unwrap();
//! assert_eq!(min.slice(ndarray::s![1..]).to_vec(), vec![0.0, 1.0, 2.0]);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use log::debug;
use ndarray::{Array, ArrayBase, Data, Dimension};
use num_traits::Float;

use crate::driver;
use crate::error::{Error, Result};
use crate::kernels::{Extremum, NanPolicy, RunningMean, SlidingExtremum};
use crate::layout::LaneLayout;
use crate::traits::{validate_move_input, Element};

/// Arrays with at least this many elements use the parallel lane driver.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 16;

/// One of the six moving-window reductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFunc {
    /// Moving mean; NaN propagates.
    Mean,
    /// Moving mean ignoring NaN.
    NanMean,
    /// Moving minimum; NaN propagates.
    Min,
    /// Moving maximum; NaN propagates.
    Max,
    /// Moving minimum ignoring NaN.
    NanMin,
    /// Moving maximum ignoring NaN.
    NanMax,
}

impl MoveFunc {
    /// Every reduction, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Mean,
        Self::NanMean,
        Self::Min,
        Self::Max,
        Self::NanMin,
        Self::NanMax,
    ];

    /// The function's public name, e.g. `"move_nanmean"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mean => "move_mean",
            Self::NanMean => "move_nanmean",
            Self::Min => "move_min",
            Self::Max => "move_max",
            Self::NanMin => "move_nanmin",
            Self::NanMax => "move_nanmax",
        }
    }

    /// How the reduction treats NaN inputs.
    #[must_use]
    pub const fn nan_policy(self) -> NanPolicy {
        match self {
            Self::Mean | Self::Min | Self::Max => NanPolicy::Propagate,
            Self::NanMean | Self::NanMin | Self::NanMax => NanPolicy::Skip,
        }
    }

    /// The extremum tracked, or `None` for the means.
    #[must_use]
    pub const fn extremum(self) -> Option<Extremum> {
        match self {
            Self::Min | Self::NanMin => Some(Extremum::Min),
            Self::Max | Self::NanMax => Some(Extremum::Max),
            Self::Mean | Self::NanMean => None,
        }
    }
}

impl fmt::Display for MoveFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MoveFunc {
    type Err = Error;

    /// Parses `"move_mean"` or the short form `"mean"`, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let short = lower.strip_prefix("move_").unwrap_or(&lower);
        match short {
            "mean" => Ok(Self::Mean),
            "nanmean" => Ok(Self::NanMean),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "nanmin" => Ok(Self::NanMin),
            "nanmax" => Ok(Self::NanMax),
            _ => Err(Error::UnknownFunction {
                name: s.to_string(),
            }),
        }
    }
}

/// Configuration for a moving-window computation.
///
/// # Example
///
/// ```
/// use fast_move::moving::{MoveFunc, Moving};
/// use ndarray::Array;
///
/// let a = Array::from_shape_vec((2, 3), vec![0_i32, 1, 2, 3, 4, 5]).unwrap();
/// let out = Moving::new(MoveFunc::Max).axis(0).compute(&a, 2).unwrap();
///
/// assert!(out[[0, 1]].is_nan());
/// assert_eq!(out[[1, 1]], 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moving {
    func: MoveFunc,
    axis: isize,
    parallel_threshold: usize,
}

impl Moving {
    /// Creates a configuration for `func` along the last axis.
    #[must_use]
    pub const fn new(func: MoveFunc) -> Self {
        Self {
            func,
            axis: -1,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Sets the reduction axis. Negative values count from the last axis.
    #[must_use]
    pub const fn axis(mut self, axis: isize) -> Self {
        self.axis = axis;
        self
    }

    /// Sets the minimum array size for the parallel lane driver.
    ///
    /// `usize::MAX` forces sequential execution, `0` always requests the
    /// parallel path.
    #[must_use]
    pub const fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// The configured reduction.
    #[must_use]
    pub const fn func(&self) -> MoveFunc {
        self.func
    }

    /// Computes the moving reduction of `array` with the given window.
    ///
    /// # Errors
    ///
    /// - `Error::EmptyInput` if the array is zero-dimensional or empty
    /// - `Error::InvalidAxis` if the axis is outside `[-ndim, ndim - 1]`
    /// - `Error::InvalidWindow` if the window is outside `[1, shape[axis]]`
    pub fn compute<T, S, D>(
        &self,
        array: &ArrayBase<S, D>,
        window: usize,
    ) -> Result<Array<T::Output, D>>
    where
        T: Element,
        S: Data<Elem = T>,
        D: Dimension,
    {
        let shape = array.shape();
        let axis = validate_move_input(shape, window, self.axis)?;

        let data: Cow<'_, [T]> = array
            .as_slice()
            .map_or_else(|| Cow::Owned(array.iter().copied().collect()), Cow::Borrowed);

        let mut out = vec![T::Output::nan(); data.len()];
        self.run(&data, shape, axis, window, &mut out)?;
        Ok(Array::from_shape_vec(array.raw_dim(), out)?)
    }

    /// Computes the moving reduction of a row-major buffer of `shape` into
    /// `out`.
    ///
    /// Nothing is written to `out` unless validation succeeds.
    ///
    /// # Errors
    ///
    /// Same as [`compute`](Self::compute), plus `Error::Shape` if `data`
    /// does not hold exactly `shape.iter().product()` elements and
    /// `Error::OutputLength` if `out` is shorter than `data`.
    pub fn compute_slice<T: Element>(
        &self,
        data: &[T],
        shape: &[usize],
        window: usize,
        out: &mut [T::Output],
    ) -> Result<()> {
        let axis = validate_move_input(shape, window, self.axis)?;
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(Error::Shape(format!(
                "buffer of {} elements does not match shape {shape:?}",
                data.len()
            )));
        }
        if out.len() < data.len() {
            return Err(Error::OutputLength {
                required: data.len(),
                actual: out.len(),
            });
        }
        self.run(data, shape, axis, window, out)
    }

    fn run<T: Element>(
        &self,
        data: &[T],
        shape: &[usize],
        axis: usize,
        window: usize,
        out: &mut [T::Output],
    ) -> Result<()> {
        let layout = LaneLayout::new(shape, axis)?;
        let parallel = data.len() >= self.parallel_threshold;
        let policy = self.func.nan_policy();

        let ran_parallel = match self.func.extremum() {
            Some(kind) => driver::run_lanes(data, out, &layout, window, parallel, || {
                SlidingExtremum::new(window, kind, policy)
            }),
            None => driver::run_lanes(data, out, &layout, window, parallel, || {
                RunningMean::new(policy)
            }),
        };

        debug!(
            "{} dtype={} shape={shape:?} axis={axis} window={window} lanes={} parallel={ran_parallel}",
            self.func,
            T::DTYPE,
            layout.lane_count()
        );
        Ok(())
    }
}

/// Computes `func` over `array` along `axis`.
///
/// # Errors
///
/// See [`Moving::compute`].
pub fn move_func<T, S, D>(
    func: MoveFunc,
    array: &ArrayBase<S, D>,
    window: usize,
    axis: isize,
) -> Result<Array<T::Output, D>>
where
    T: Element,
    S: Data<Elem = T>,
    D: Dimension,
{
    Moving::new(func).axis(axis).compute(array, window)
}

macro_rules! define_move_fn {
    ($($(#[$doc:meta])* $name:ident => $func:expr;)*) => {
        $(
            $(#[$doc])*
            ///
            /// # Errors
            ///
            /// See [`Moving::compute`].
            pub fn $name<T, S, D>(
                array: &ArrayBase<S, D>,
                window: usize,
                axis: isize,
            ) -> Result<Array<T::Output, D>>
            where
                T: Element,
                S: Data<Elem = T>,
                D: Dimension,
            {
                move_func($func, array, window, axis)
            }
        )*
    };
}

define_move_fn! {
    /// Moving window mean along `axis`. NaN propagates.
    move_mean => MoveFunc::Mean;
    /// Moving window mean along `axis`, ignoring NaN.
    move_nanmean => MoveFunc::NanMean;
    /// Moving window minimum along `axis`. NaN propagates.
    move_min => MoveFunc::Min;
    /// Moving window maximum along `axis`. NaN propagates.
    move_max => MoveFunc::Max;
    /// Moving window minimum along `axis`, ignoring NaN.
    move_nanmin => MoveFunc::NanMin;
    /// Moving window maximum along `axis`, ignoring NaN.
    move_nanmax => MoveFunc::NanMax;
}

/// Computes `func` over a 1-D series into a pre-allocated buffer.
///
/// Returns the number of positions with a full window
/// (`data.len() - window + 1`).
///
/// # Errors
///
/// See [`Moving::compute_slice`].
///
/// # Example
///
/// ```
/// use fast_move::moving::{move_1d_into, MoveFunc};
///
/// let data = [0.0_f64, f64::NAN, 2.0, 3.0];
/// let mut out = [0.0_f64; 4];
/// let valid = move_1d_into(MoveFunc::NanMax, &data, 2, &mut out).unwrap();
///
/// assert_eq!(valid, 3);
/// assert!(out[0].is_nan());
/// assert_eq!(&out[1..], &[0.0, 2.0, 3.0]);
/// ```
pub fn move_1d_into<T: Element>(
    func: MoveFunc,
    data: &[T],
    window: usize,
    out: &mut [T::Output],
) -> Result<usize> {
    Moving::new(func)
        .axis(0)
        .parallel_threshold(usize::MAX)
        .compute_slice(data, &[data.len()], window, out)?;
    Ok(data.len() - window + 1)
}

/// Number of leading NaN positions per lane for `window`.
#[inline]
#[must_use]
pub const fn move_lookback(window: usize) -> usize {
    window.saturating_sub(1)
}

/// Minimum lane length accepted for `window`.
#[inline]
#[must_use]
pub const fn move_min_len(window: usize) -> usize {
    window
}
