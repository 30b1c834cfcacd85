//! fast-move: moving-window reductions over N-dimensional arrays
//!
//! This crate computes the moving mean, minimum and maximum of an array
//! along any axis, in plain and NaN-ignoring flavors. Each result has the
//! input's shape and costs O(n) regardless of the window: the mean keeps a
//! running sum and the extrema a monotonic deque.
//!
//! # Quick Start
//!
//! ```
//! use fast_move::prelude::*;
//! use ndarray::array;
//!
//! let a = array![[1.0_f64, 3.0, 2.0, 5.0], [4.0, f64::NAN, 6.0, 0.0]];
//!
//! // Window of 2 along the last axis
//! let max = move_max(&a, 2, -1).unwrap();
//! assert!(max[[0, 0]].is_nan());
//! assert_eq!(max[[0, 1]], 3.0);
//! assert!(max[[1, 2]].is_nan()); // NaN still in the window
//!
//! let nanmax = move_nanmax(&a, 2, -1).unwrap();
//! assert_eq!(nanmax[[1, 2]], 6.0);
//! ```
//!
//! # Functions
//!
//! - [`moving::move_mean()`] / [`moving::move_nanmean()`]
//! - [`moving::move_min()`] / [`moving::move_nanmin()`]
//! - [`moving::move_max()`] / [`moving::move_nanmax()`]
//!
//! The plain variants return NaN while any NaN is inside the window; the
//! `nan` variants skip NaN and return NaN only when the whole window is NaN.
//! In every variant the first `window - 1` positions of each lane are NaN.
//!
//! # Element Types
//!
//! `f32` and `f64` inputs produce results of the same type; `i32` and `i64`
//! inputs produce `f64`. [`dtype::DynArray`] dispatches on a dtype chosen at
//! run time.
//!
//! # Error Handling
//!
//! ```
//! use fast_move::prelude::*;
//! use ndarray::array;
//!
//! let a = array![1.0_f64, 2.0];
//! assert!(matches!(move_mean(&a, 3, 0), Err(Error::InvalidWindow { .. })));
//! assert!(matches!(move_mean(&a, 1, 1), Err(Error::InvalidAxis { .. })));
//! ```
//!
//! # Features
//!
//! - `parallel` (default): large arrays spread their lanes over the Rayon
//!   thread pool

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]

pub mod driver;
pub mod dtype;
pub mod error;
pub mod kernels;
pub mod layout;
pub mod moving;
pub mod prelude;
pub mod slow;
pub mod traits;
pub mod utils;

pub use error::{Error, Result};
