//! Error Handling Example
//!
//! This example shows the errors returned for invalid windows, axes and
//! dtypes, and how to match on them.
//!
//! Run with: `cargo run --example error_handling`

use fast_move::dtype::DType;
use fast_move::error::Error;
use fast_move::moving::move_mean;
use ndarray::{array, Array2};

fn main() {
    let data = array![[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0]];

    let cases: [(usize, isize); 4] = [(3, -1), (3, 0), (0, 1), (1, 2)];
    for (window, axis) in cases {
        match move_mean(&data, window, axis) {
            Ok(out) => println!("window={window} axis={axis}: ok, shape {:?}", out.shape()),
            Err(Error::InvalidWindow { window, extent }) => {
                println!("window={window} axis={axis}: window must be in [1, {extent}]");
            }
            Err(Error::InvalidAxis { axis, ndim }) => {
                println!("axis {axis} does not exist on a {ndim}-d array");
            }
            Err(e) => println!("unexpected error: {e}"),
        }
    }

    let empty = Array2::<f64>::zeros((0, 4));
    if let Err(e) = move_mean(&empty, 1, 0) {
        println!("empty input: {e}");
    }

    for name in ["float32", "int64", "uint8"] {
        match name.parse::<DType>() {
            Ok(dtype) => println!("{name}: results produced as {}", dtype.output()),
            Err(e) => println!("{name}: {e}"),
        }
    }
}
