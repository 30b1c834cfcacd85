//! Commonly used types and functions for convenient importing.
//!
//! ```
//! use fast_move::prelude::*;
//! use ndarray::array;
//!
//! let a = array![0.0_f64, 1.0, 2.0, 3.0];
//! let mean = move_mean(&a, 2, 0).unwrap();
//! let min = Moving::new(MoveFunc::Min).compute(&a, 3).unwrap();
//! assert_eq!(min[3], 1.0);
//! assert_eq!(mean[3], 2.5);
//! ```

// Error types
pub use crate::error::{Error, Result};

// Traits
pub use crate::traits::{Element, SeriesElement};

// Moving-window functions
pub use crate::moving::{
    move_1d_into, move_func, move_lookback, move_max, move_mean, move_min, move_min_len,
    move_nanmax, move_nanmean, move_nanmin, MoveFunc, Moving,
};

// Runtime dtype dispatch
pub use crate::dtype::{DType, DynArray};
