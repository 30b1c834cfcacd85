//! Lane enumeration over row-major N-dimensional buffers.
//!
//! A lane is the 1-D sequence of elements that varies along the reduction
//! axis while every other index is held fixed. For a row-major buffer of
//! shape `[d0, .., dk, .., dn]` reduced along axis `k`:
//!
//! ```text
//! stride = d(k+1) * .. * dn       distance between neighbours in a lane
//! outer  = d0 * .. * d(k-1)       number of independent blocks
//! block  = dk * stride            elements per block
//! ```
//!
//! The buffer is `outer` contiguous blocks, each holding `stride` lanes
//! interleaved with step `stride`. Blocks never share a cell, which is what
//! lets the driver hand them to different threads without locking.
//!
//! # Example
//!
//! ```
//! use fast_move::layout::LaneLayout;
//!
//! // Shape (2, 3, 4) reduced along axis 1
//! let layout = LaneLayout::new(&[2, 3, 4], 1).unwrap();
//! assert_eq!(layout.lane_len(), 3);
//! assert_eq!(layout.stride(), 4);
//! assert_eq!(layout.lane_count(), 8);
//!
//! let starts: Vec<usize> = layout.lane_starts().collect();
//! assert_eq!(starts, vec![0, 1, 2, 3, 12, 13, 14, 15]);
//! ```

use crate::error::{Error, Result};

/// Geometry of the lanes of a row-major buffer along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneLayout {
    len: usize,
    stride: usize,
    outer: usize,
}

impl LaneLayout {
    /// Computes the lane geometry of `shape` along `axis`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidAxis` if `axis >= shape.len()`.
    pub fn new(shape: &[usize], axis: usize) -> Result<Self> {
        let Some(&len) = shape.get(axis) else {
            return Err(Error::InvalidAxis {
                axis: isize::try_from(axis).unwrap_or(isize::MAX),
                ndim: shape.len(),
            });
        };
        Ok(Self {
            len,
            stride: shape[axis + 1..].iter().product(),
            outer: shape[..axis].iter().product(),
        })
    }

    /// Number of elements in every lane.
    #[inline]
    #[must_use]
    pub const fn lane_len(&self) -> usize {
        self.len
    }

    /// Distance between consecutive elements of a lane.
    #[inline]
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Number of contiguous blocks the buffer splits into.
    #[inline]
    #[must_use]
    pub const fn block_count(&self) -> usize {
        self.outer
    }

    /// Number of elements in one block.
    #[inline]
    #[must_use]
    pub const fn block_len(&self) -> usize {
        self.len * self.stride
    }

    /// Total number of lanes.
    #[inline]
    #[must_use]
    pub const fn lane_count(&self) -> usize {
        self.outer * self.stride
    }

    /// Total number of elements covered by the layout.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.outer * self.len * self.stride
    }

    /// Buffer offset of the first element of lane `lane`.
    ///
    /// Lanes are numbered in row-major order of their fixed indices.
    #[inline]
    #[must_use]
    pub const fn lane_start(&self, lane: usize) -> usize {
        (lane / self.stride) * self.block_len() + lane % self.stride
    }

    /// Start offsets of every lane, in row-major order.
    pub fn lane_starts(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.lane_count()).map(|lane| self.lane_start(lane))
    }

    /// Read-only view of the lane beginning at `start` within `data`.
    ///
    /// `data` is either the whole buffer or a single block; `start` is
    /// relative to it.
    #[inline]
    #[must_use]
    pub fn lane<'a, T: Copy>(&self, data: &'a [T], start: usize) -> Lane<'a, T> {
        Lane::new(data, start, self.stride, self.len)
    }

    /// Mutable view of the lane beginning at `start` within `data`.
    #[inline]
    #[must_use]
    pub fn lane_mut<'a, T>(&self, data: &'a mut [T], start: usize) -> LaneMut<'a, T> {
        LaneMut::new(data, start, self.stride, self.len)
    }
}

/// A strided read-only lane.
#[derive(Debug, Clone, Copy)]
pub struct Lane<'a, T> {
    data: &'a [T],
    start: usize,
    stride: usize,
    len: usize,
}

impl<'a, T: Copy> Lane<'a, T> {
    /// Creates a lane of `len` elements at `start`, `start + stride`, ...
    ///
    /// # Panics
    ///
    /// Panics if the last element lies outside `data`.
    #[must_use]
    pub fn new(data: &'a [T], start: usize, stride: usize, len: usize) -> Self {
        assert!(
            len == 0 || start + (len - 1) * stride < data.len(),
            "lane exceeds buffer"
        );
        Self {
            data,
            start,
            stride,
            len,
        }
    }

    /// Number of elements in the lane.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the lane has no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element at position `i` along the lane.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize) -> T {
        self.data[self.start + i * self.stride]
    }

    /// Iterates the lane's elements in order.
    pub fn iter(&self) -> impl Iterator<Item = T> + 'a {
        let data = self.data;
        data[self.start..]
            .iter()
            .step_by(self.stride)
            .take(self.len)
            .copied()
    }
}

/// A strided mutable lane.
#[derive(Debug)]
pub struct LaneMut<'a, T> {
    data: &'a mut [T],
    start: usize,
    stride: usize,
    len: usize,
}

impl<'a, T> LaneMut<'a, T> {
    /// Creates a mutable lane of `len` elements at `start`, `start + stride`, ...
    ///
    /// # Panics
    ///
    /// Panics if the last element lies outside `data`.
    #[must_use]
    pub fn new(data: &'a mut [T], start: usize, stride: usize, len: usize) -> Self {
        assert!(
            len == 0 || start + (len - 1) * stride < data.len(),
            "lane exceeds buffer"
        );
        Self {
            data,
            start,
            stride,
            len,
        }
    }

    /// Number of elements in the lane.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the lane has no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Writes `value` at position `i` along the lane.
    #[inline]
    pub fn set(&mut self, i: usize, value: T) {
        self.data[self.start + i * self.stride] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_rank_one() {
        let layout = LaneLayout::new(&[4], 0).unwrap();
        assert_eq!(layout.lane_len(), 4);
        assert_eq!(layout.stride(), 1);
        assert_eq!(layout.lane_count(), 1);
        assert_eq!(layout.block_count(), 1);
        assert_eq!(layout.lane_starts().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_layout_last_axis_is_contiguous() {
        let layout = LaneLayout::new(&[2, 3], 1).unwrap();
        assert_eq!(layout.stride(), 1);
        assert_eq!(layout.lane_starts().collect::<Vec<_>>(), vec![0, 3]);
    }

    #[test]
    fn test_layout_first_axis() {
        let layout = LaneLayout::new(&[2, 3], 0).unwrap();
        assert_eq!(layout.stride(), 3);
        assert_eq!(layout.block_count(), 1);
        assert_eq!(layout.block_len(), 6);
        assert_eq!(layout.lane_starts().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_layout_rank_four_counts() {
        let shape = [1, 2, 3, 4];
        for axis in 0..shape.len() {
            let layout = LaneLayout::new(&shape, axis).unwrap();
            assert_eq!(layout.size(), 24);
            assert_eq!(layout.lane_count() * layout.lane_len(), 24);
        }
    }

    #[test]
    fn test_lanes_cover_buffer_exactly_once() {
        let shape = [2, 3, 4];
        for axis in 0..shape.len() {
            let layout = LaneLayout::new(&shape, axis).unwrap();
            let mut seen = vec![0_u8; layout.size()];
            for start in layout.lane_starts() {
                for i in 0..layout.lane_len() {
                    seen[start + i * layout.stride()] += 1;
                }
            }
            assert!(seen.iter().all(|&count| count == 1), "axis {axis}");
        }
    }

    #[test]
    fn test_lane_reads_along_axis() {
        // arange(24).reshape(2, 3, 4), lane at fixed (1, :, 2)
        let data: Vec<i32> = (0..24).collect();
        let layout = LaneLayout::new(&[2, 3, 4], 1).unwrap();
        let lane = layout.lane(&data, layout.lane_start(6));
        assert_eq!(lane.iter().collect::<Vec<_>>(), vec![14, 18, 22]);
        assert_eq!(lane.get(1), 18);
        assert_eq!(lane.len(), 3);
    }

    #[test]
    fn test_lane_mut_writes_along_axis() {
        let mut data = vec![0_i32; 6];
        let layout = LaneLayout::new(&[2, 3], 0).unwrap();
        let mut lane = layout.lane_mut(&mut data, 2);
        lane.set(0, 7);
        lane.set(1, 8);
        assert_eq!(data, vec![0, 0, 7, 0, 0, 8]);
    }

    #[test]
    fn test_layout_invalid_axis() {
        assert!(matches!(
            LaneLayout::new(&[2, 3], 2),
            Err(Error::InvalidAxis { axis: 2, ndim: 2 })
        ));
    }

    #[test]
    #[should_panic(expected = "lane exceeds buffer")]
    fn test_lane_out_of_bounds_panics() {
        let data = [1.0_f64, 2.0, 3.0];
        let _ = Lane::new(&data, 1, 2, 2);
    }
}
