//! Drives a window kernel across every lane of a row-major buffer.
//!
//! Lanes share no state: the kernel is reset at the start of each lane and
//! writes only its own lane's output cells. The buffer is handed out one
//! [`LaneLayout`] block at a time, and blocks are disjoint, so with the
//! `parallel` feature enabled blocks are fanned out over the Rayon pool with
//! `par_chunks_mut` and no locking.
//!
//! When the whole buffer is a single block (reducing along the first axis)
//! the lanes are interleaved, so the parallel path reduces them into a
//! lane-major scratch buffer and transposes it back row by row. A rank-1
//! input is one lane and always runs sequentially.
//!
//! The edge policy lives here rather than in the kernels: the first
//! `window - 1` positions of every lane are written as NaN.

use log::trace;
use num_traits::Float;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::kernels::WindowKernel;
use crate::layout::{Lane, LaneLayout};
use crate::traits::Element;

/// Runs one kernel per lane over `input`, writing results into `output`.
///
/// `make_kernel` builds the lane state; it is called once per worker (or
/// once in total on the sequential path) and the kernel is reset per lane.
/// `parallel` requests the Rayon path; it is ignored without the `parallel`
/// feature or when the layout has a single lane.
///
/// Returns true if the parallel path ran.
///
/// # Panics
///
/// Panics if `input` or `output` is shorter than `layout.size()`.
pub fn run_lanes<T, K, F>(
    input: &[T],
    output: &mut [T::Output],
    layout: &LaneLayout,
    window: usize,
    parallel: bool,
    make_kernel: F,
) -> bool
where
    T: Element,
    K: WindowKernel<T::Output>,
    F: Fn() -> K + Send + Sync,
{
    let size = layout.size();
    assert!(
        input.len() >= size && output.len() >= size,
        "buffers shorter than layout"
    );
    if size == 0 {
        return false;
    }
    let block_len = layout.block_len();
    let input = &input[..size];
    let output = &mut output[..size];

    #[cfg(feature = "parallel")]
    {
        if parallel && layout.block_count() > 1 {
            trace!(
                "fanning out {} blocks of {} lanes",
                layout.block_count(),
                layout.stride()
            );
            input
                .par_chunks(block_len)
                .zip(output.par_chunks_mut(block_len))
                .for_each_init(&make_kernel, |kernel, (src, dst)| {
                    reduce_block(src, dst, layout, window, kernel);
                });
            return true;
        }
        if parallel && layout.stride() > 1 {
            trace!(
                "fanning out {} interleaved lanes of {}",
                layout.stride(),
                layout.lane_len()
            );
            reduce_interleaved(input, output, layout, window, &make_kernel);
            return true;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    trace!("reducing {} lanes sequentially", layout.lane_count());
    let mut kernel = make_kernel();
    for (src, dst) in input.chunks(block_len).zip(output.chunks_mut(block_len)) {
        reduce_block(src, dst, layout, window, &mut kernel);
    }
    false
}

/// Reduces the lanes of a single block in parallel through a lane-major
/// scratch buffer.
#[cfg(feature = "parallel")]
fn reduce_interleaved<T, K, F>(
    input: &[T],
    output: &mut [T::Output],
    layout: &LaneLayout,
    window: usize,
    make_kernel: &F,
) where
    T: Element,
    K: WindowKernel<T::Output>,
    F: Fn() -> K + Send + Sync,
{
    let len = layout.lane_len();
    let lanes = layout.stride();
    let mut scratch = vec![T::Output::nan(); output.len()];
    scratch
        .par_chunks_mut(len)
        .enumerate()
        .for_each_init(make_kernel, |kernel, (start, dst)| {
            reduce_lane(layout.lane(input, start), window, kernel, |i, v| dst[i] = v);
        });
    output
        .par_chunks_mut(lanes)
        .enumerate()
        .for_each(|(i, row)| {
            for (start, cell) in row.iter_mut().enumerate() {
                *cell = scratch[start * len + i];
            }
        });
}

/// Feeds one lane through `kernel`, handing each output position to `write`.
#[inline]
fn reduce_lane<T, K, W>(lane: Lane<'_, T>, window: usize, kernel: &mut K, mut write: W)
where
    T: Element,
    K: WindowKernel<T::Output>,
    W: FnMut(usize, T::Output),
{
    kernel.reset();
    for i in 0..lane.len() {
        let incoming = lane.get(i).to_output();
        let outgoing = (i >= window).then(|| lane.get(i - window).to_output());
        let value = kernel.step(incoming, outgoing);
        write(i, if i + 1 < window { T::Output::nan() } else { value });
    }
}

/// Reduces every lane of one block.
fn reduce_block<T, K>(
    src: &[T],
    dst: &mut [T::Output],
    layout: &LaneLayout,
    window: usize,
    kernel: &mut K,
) where
    T: Element,
    K: WindowKernel<T::Output>,
{
    for start in 0..layout.stride() {
        let mut out = layout.lane_mut(dst, start);
        reduce_lane(layout.lane(src, start), window, kernel, |i, v| out.set(i, v));
    }
}
