//! Per-lane sliding window kernels.
//!
//! Each kernel consumes one lane element at a time and reports the reduction
//! of the window ending at that element. Kernels do not apply the edge
//! policy: the driver overwrites the first `window - 1` outputs of a lane
//! with NaN.
//!
//! # Kernels
//!
//! - [`monotonic_deque`]: O(1) amortized rolling min/max
//! - [`running_mean`]: O(1) rolling mean from a running sum and counts

pub mod monotonic_deque;
pub mod running_mean;

pub use monotonic_deque::{Extremum, MonotonicDeque, SlidingExtremum};
pub use running_mean::RunningMean;

/// How a kernel treats NaN inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NanPolicy {
    /// A NaN anywhere in the window makes the result NaN.
    #[default]
    Propagate,
    /// NaN values are ignored; a window with no other value yields NaN.
    Skip,
}

/// A sliding window reduction advanced one element at a time.
pub trait WindowKernel<T> {
    /// Returns the kernel to its freshly constructed state.
    fn reset(&mut self);

    /// Advances by one element.
    ///
    /// `outgoing` is the element leaving the window, present once the
    /// window is full. Returns the reduction of the current window.
    fn step(&mut self, incoming: T, outgoing: Option<T>) -> T;
}
