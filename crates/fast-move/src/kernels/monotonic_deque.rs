//! Sliding window extrema using a monotonic deque.
//!
//! The deque holds `(value, index)` candidates for the extremum of the
//! current window:
//! - For a rolling max the values are strictly decreasing front to back
//! - For a rolling min the values are strictly increasing front to back
//!
//! Indices increase front to back, so the front is always both the oldest
//! surviving candidate and the current extremum. Every element is pushed once
//! and popped at most once, giving O(1) amortized work per element instead of
//! O(k) for a rescan of the window.
//!
//! The deque lives in a fixed ring buffer sized to the next power of two of
//! the window, so advancing never allocates.
//!
//! # Example
//!
//! ```
//! use fast_move::kernels::monotonic_deque::{Extremum, SlidingExtremum};
//! use fast_move::kernels::{NanPolicy, WindowKernel};
//!
//! let data = [3.0_f64, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
//! let mut tracker = SlidingExtremum::new(3, Extremum::Max, NanPolicy::Propagate);
//!
//! let out: Vec<f64> = data.iter().map(|&x| tracker.step(x, None)).collect();
//! assert!((out[2] - 4.0).abs() < 1e-10); // max of [3, 1, 4]
//! assert!((out[5] - 9.0).abs() < 1e-10); // max of [1, 5, 9]
//! ```

use crate::kernels::{NanPolicy, WindowKernel};
use crate::traits::SeriesElement;

/// Which extremum a deque tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extremum {
    /// Rolling minimum.
    Min,
    /// Rolling maximum.
    Max,
}

impl Extremum {
    /// Returns true if a queued `back` value can never again be the extremum
    /// once `value` has entered the window.
    ///
    /// Ties evict the older entry so the deque keeps the newest index.
    #[inline]
    fn dominates<T: SeriesElement>(self, value: T, back: T) -> bool {
        match self {
            Self::Min => back >= value,
            Self::Max => back <= value,
        }
    }
}

/// A fixed-capacity monotonic deque of `(value, index)` candidates.
///
/// # Type Parameters
///
/// - `T`: The numeric type (typically `f32` or `f64`)
#[derive(Debug, Clone)]
pub struct MonotonicDeque<T> {
    buf: Vec<(T, usize)>,
    head: usize,
    len: usize,
    mask: usize,
    window: usize,
    kind: Extremum,
}

impl<T: SeriesElement> MonotonicDeque<T> {
    /// Creates an empty deque for windows of `window` elements.
    ///
    /// # Example
    ///
    /// ```
    /// use fast_move::kernels::monotonic_deque::{Extremum, MonotonicDeque};
    ///
    /// let deque: MonotonicDeque<f64> = MonotonicDeque::new(5, Extremum::Min);
    /// assert!(deque.is_empty());
    /// assert_eq!(deque.capacity(), 8);
    /// ```
    #[must_use]
    pub fn new(window: usize, kind: Extremum) -> Self {
        let size = window.max(1).next_power_of_two();
        Self {
            buf: vec![(T::zero(), 0); size],
            head: 0,
            len: 0,
            mask: size - 1,
            window,
            kind,
        }
    }

    /// Returns the window size.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Returns the number of slots in the ring buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the extremum this deque tracks.
    #[must_use]
    pub const fn kind(&self) -> Extremum {
        self.kind
    }

    /// Returns true if the deque is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of candidates currently queued.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Clears the deque.
    #[inline]
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    #[inline]
    fn back(&self) -> (T, usize) {
        self.buf[(self.head + self.len - 1) & self.mask]
    }

    /// Returns the front candidate, which is the current extremum.
    #[inline]
    #[must_use]
    pub fn front(&self) -> Option<(T, usize)> {
        if self.is_empty() {
            None
        } else {
            Some(self.buf[self.head])
        }
    }

    /// Drops candidates whose index has left the window ending at `index`.
    #[inline]
    pub fn expire(&mut self, index: usize) {
        if index < self.window {
            return;
        }
        let oldest_allowed = index + 1 - self.window;
        while self.len > 0 && self.buf[self.head].1 < oldest_allowed {
            self.head = (self.head + 1) & self.mask;
            self.len -= 1;
        }
    }

    /// Pushes the value at `index` onto the back, first expiring candidates
    /// older than the window ending at `index` and evicting every candidate
    /// it dominates.
    ///
    /// Indices are expected to increase. If they do not, the oldest
    /// candidate is dropped whenever the ring is full, so the deque never
    /// overwrites a live slot.
    #[inline]
    pub fn push(&mut self, value: T, index: usize) {
        self.expire(index);
        while self.len > 0 && self.kind.dominates(value, self.back().0) {
            self.len -= 1;
        }
        if self.len == self.buf.len() {
            self.head = (self.head + 1) & self.mask;
            self.len -= 1;
        }
        self.buf[(self.head + self.len) & self.mask] = (value, index);
        self.len += 1;
    }

    /// Returns the current extremum, or NaN if the deque is empty.
    #[inline]
    #[must_use]
    pub fn extremum(&self) -> T {
        self.front().map_or_else(T::nan, |(value, _)| value)
    }
}

/// Sliding minimum or maximum over one lane.
///
/// NaN inputs never enter the deque. Under [`NanPolicy::Skip`] they only
/// advance the position, so a window without any non-NaN value yields NaN.
/// Under [`NanPolicy::Propagate`] the tracker remembers the most recent NaN
/// and reports NaN while it is inside the window.
#[derive(Debug, Clone)]
pub struct SlidingExtremum<T> {
    deque: MonotonicDeque<T>,
    policy: NanPolicy,
    next_index: usize,
    last_nan: Option<usize>,
}

impl<T: SeriesElement> SlidingExtremum<T> {
    /// Creates a tracker for windows of `window` elements.
    #[must_use]
    pub fn new(window: usize, kind: Extremum, policy: NanPolicy) -> Self {
        Self {
            deque: MonotonicDeque::new(window, kind),
            policy,
            next_index: 0,
            last_nan: None,
        }
    }

    /// Borrow the underlying deque.
    #[must_use]
    pub const fn deque(&self) -> &MonotonicDeque<T> {
        &self.deque
    }

    #[inline]
    fn nan_in_window(&self, index: usize) -> bool {
        self.last_nan
            .is_some_and(|nan_index| nan_index + self.deque.window() > index)
    }
}

impl<T: SeriesElement> WindowKernel<T> for SlidingExtremum<T> {
    fn reset(&mut self) {
        self.deque.clear();
        self.next_index = 0;
        self.last_nan = None;
    }

    #[inline]
    fn step(&mut self, incoming: T, _outgoing: Option<T>) -> T {
        let index = self.next_index;
        self.next_index += 1;

        self.deque.expire(index);
        if incoming.is_nan() {
            if self.policy == NanPolicy::Propagate {
                self.last_nan = Some(index);
            }
        } else {
            self.deque.push(incoming, index);
        }

        if self.policy == NanPolicy::Propagate && self.nan_in_window(index) {
            T::nan()
        } else {
            self.deque.extremum()
        }
    }
}
