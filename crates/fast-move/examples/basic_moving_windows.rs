//! Basic Moving Window Examples
//!
//! This example computes the six moving-window reductions over a matrix,
//! along each axis.
//!
//! Run with: `cargo run --example basic_moving_windows`

use fast_move::moving::{
    move_max, move_mean, move_min, move_nanmax, move_nanmean, move_nanmin,
};
use ndarray::array;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Three sensors (rows) sampled six times (columns); one reading dropped
    let readings = array![
        [20.1, 20.4, 21.0, 20.8, 21.5, 22.0],
        [18.0, f64::NAN, 18.6, 19.1, 18.9, 19.4],
        [25.2, 25.0, 24.7, 24.9, 25.3, 25.1],
    ];

    println!("Readings:\n{readings:.1}");
    println!();

    // Along time (last axis): NaN propagates in the plain variants
    println!("3-sample moving mean along time:");
    println!("{:.3}", move_mean(&readings, 3, -1)?);
    println!();
    println!("3-sample moving nanmean along time:");
    println!("{:.3}", move_nanmean(&readings, 3, -1)?);
    println!();

    println!("Moving min / nanmin / max / nanmax along time (window 2):");
    println!("{:.1}", move_min(&readings, 2, -1)?);
    println!("{:.1}", move_nanmin(&readings, 2, -1)?);
    println!("{:.1}", move_max(&readings, 2, -1)?);
    println!("{:.1}", move_nanmax(&readings, 2, -1)?);
    println!();

    // Across sensors (first axis)
    println!("2-sensor moving nanmax across sensors:");
    println!("{:.1}", move_nanmax(&readings, 2, 0)?);

    Ok(())
}
