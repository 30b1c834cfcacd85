//! Running window mean with incremental add/remove updates.
//!
//! The accumulator keeps a running sum of the finite values inside the
//! window together with counters for everything that cannot live in a
//! plain sum:
//!
//! - `count`: non-NaN values in the window (the mean's denominator)
//! - `nan_count`: NaN values in the window
//! - `pos_inf` / `neg_inf`: infinities in the window
//!
//! Infinities are counted instead of summed, so an infinity that leaves the
//! window is subtracted exactly and cannot turn the sum into `inf - inf`.
//!
//! The sum is Neumaier-compensated, so small values added next to a huge one
//! are not lost when the huge one leaves. Finite values can still overflow
//! the sum: the accumulator keeps the finite values of the window in arrival
//! order and, while the sum is not finite, rebuilds it from them after every
//! update.
//!
//! # Formula
//!
//! ```text
//! mean = NaN              if the window holds no non-NaN value
//!      = NaN              if it holds both +inf and -inf
//!      = +inf / -inf      if it holds infinities of one sign
//!      = sum / count      otherwise
//! ```
//!
//! Under [`NanPolicy::Propagate`] any NaN in the window makes the mean NaN.
//!
//! # Example
//!
//! ```
//! use fast_move::kernels::running_mean::RunningMean;
//! use fast_move::kernels::{NanPolicy, WindowKernel};
//!
//! let data = [0.0_f64, f64::NAN, 2.0, 3.0];
//! let mut acc: RunningMean<f64> = RunningMean::new(NanPolicy::Skip);
//!
//! let mut out = Vec::new();
//! for (i, &x) in data.iter().enumerate() {
//!     let outgoing = if i >= 2 { Some(data[i - 2]) } else { None };
//!     out.push(acc.step(x, outgoing));
//! }
//! assert!((out[1] - 0.0).abs() < 1e-10);
//! assert!((out[2] - 2.0).abs() < 1e-10);
//! assert!((out[3] - 2.5).abs() < 1e-10);
//! ```

use std::collections::VecDeque;

use num_traits::NumCast;

use crate::kernels::{NanPolicy, WindowKernel};
use crate::traits::SeriesElement;

/// Running sum and counts of the values inside a sliding window.
///
/// Values must be removed in the order they were added.
///
/// # Type Parameters
///
/// - `T`: The numeric type (typically `f32` or `f64`)
#[derive(Debug, Clone)]
pub struct RunningMean<T> {
    sum: T,
    compensation: T,
    values: VecDeque<T>,
    count: usize,
    finite: usize,
    nan_count: usize,
    pos_inf: usize,
    neg_inf: usize,
    policy: NanPolicy,
}

impl<T: SeriesElement> RunningMean<T> {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new(policy: NanPolicy) -> Self {
        Self {
            sum: T::zero(),
            compensation: T::zero(),
            values: VecDeque::new(),
            count: 0,
            finite: 0,
            nan_count: 0,
            pos_inf: 0,
            neg_inf: 0,
            policy,
        }
    }

    /// Adds a value entering the window.
    #[inline]
    pub fn add(&mut self, value: T) {
        if value.is_nan() {
            self.nan_count += 1;
            return;
        }
        self.count += 1;
        if value.is_finite() {
            self.finite += 1;
            self.values.push_back(value);
            self.accumulate(value);
            self.settle();
        } else if value > T::zero() {
            self.pos_inf += 1;
        } else {
            self.neg_inf += 1;
        }
    }

    /// Removes the oldest value still in the window.
    ///
    /// `value` must be the earliest [`add`](Self::add)ed value not yet
    /// removed.
    #[inline]
    pub fn remove(&mut self, value: T) {
        if value.is_nan() {
            self.nan_count = self.nan_count.saturating_sub(1);
            return;
        }
        self.count = self.count.saturating_sub(1);
        if value.is_finite() {
            self.finite = self.finite.saturating_sub(1);
            self.values.pop_front();
            // Drop accumulated rounding once the window holds no finite value
            if self.finite == 0 {
                self.sum = T::zero();
                self.compensation = T::zero();
            } else {
                self.accumulate(-value);
                self.settle();
            }
        } else if value > T::zero() {
            self.pos_inf = self.pos_inf.saturating_sub(1);
        } else {
            self.neg_inf = self.neg_inf.saturating_sub(1);
        }
    }

    /// Neumaier step: adds `value` to the sum and its rounding error to the
    /// compensation.
    #[inline]
    fn accumulate(&mut self, value: T) {
        let total = self.sum + value;
        if total.is_finite() {
            self.compensation = self.compensation
                + if self.sum.abs() >= value.abs() {
                    (self.sum - total) + value
                } else {
                    (value - total) + self.sum
                };
        }
        self.sum = total;
    }

    /// Rebuilds an overflowed sum from the finite values in the window.
    #[inline]
    fn settle(&mut self) {
        if self.sum.is_finite() {
            return;
        }
        self.sum = T::zero();
        self.compensation = T::zero();
        let values = std::mem::take(&mut self.values);
        for &value in &values {
            self.accumulate(value);
        }
        self.values = values;
    }

    /// Number of non-NaN values currently in the window.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Number of NaN values currently in the window.
    #[must_use]
    pub const fn nan_count(&self) -> usize {
        self.nan_count
    }

    /// Running sum of the finite values in the window.
    #[must_use]
    pub fn sum(&self) -> T {
        if self.sum.is_finite() {
            self.sum + self.compensation
        } else {
            self.sum
        }
    }

    /// Mean of the values currently in the window.
    #[inline]
    #[must_use]
    pub fn mean(&self) -> T {
        if self.count == 0 || (self.policy == NanPolicy::Propagate && self.nan_count > 0) {
            return T::nan();
        }
        match (self.pos_inf > 0, self.neg_inf > 0) {
            (true, true) => T::nan(),
            (true, false) => T::infinity(),
            (false, true) => T::neg_infinity(),
            (false, false) => <T as NumCast>::from(self.count)
                .map_or_else(T::nan, |count| self.sum() / count),
        }
    }
}

impl<T: SeriesElement> Default for RunningMean<T> {
    fn default() -> Self {
        Self::new(NanPolicy::Skip)
    }
}

impl<T: SeriesElement> WindowKernel<T> for RunningMean<T> {
    fn reset(&mut self) {
        self.sum = T::zero();
        self.compensation = T::zero();
        self.values.clear();
        self.count = 0;
        self.finite = 0;
        self.nan_count = 0;
        self.pos_inf = 0;
        self.neg_inf = 0;
    }

    #[inline]
    fn step(&mut self, incoming: T, outgoing: Option<T>) -> T {
        if let Some(value) = outgoing {
            self.remove(value);
        }
        self.add(incoming);
        self.mean()
    }
}
