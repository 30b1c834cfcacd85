//! Pre-allocated Buffer Example
//!
//! This example uses `move_1d_into` to compute moving windows of a
//! streaming series into output buffers allocated once and reused.
//!
//! Run with: `cargo run --example zero_allocation`

#![allow(clippy::cast_precision_loss)]

use fast_move::moving::{move_1d_into, move_lookback, MoveFunc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data_size = 1000;
    let window = 20;

    println!("=== Pre-allocated Buffers ===");
    println!();
    println!("Processing {data_size} points, window {window}");
    println!("Lookback: first {} values of each output are NaN", move_lookback(window));
    println!();

    // Allocate output buffers once
    let mut mean = vec![0.0_f64; data_size];
    let mut low = vec![0.0_f64; data_size];
    let mut high = vec![0.0_f64; data_size];

    for batch in 0..3 {
        let prices: Vec<f64> = (0..data_size)
            .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0 + f64::from(batch) * 5.0)
            .collect();

        move_1d_into(MoveFunc::Mean, &prices, window, &mut mean)?;
        move_1d_into(MoveFunc::Min, &prices, window, &mut low)?;
        let valid = move_1d_into(MoveFunc::Max, &prices, window, &mut high)?;

        let last = data_size - 1;
        println!("Batch {}: {valid} full windows", batch + 1);
        println!("  mean: {:.4}", mean[last]);
        println!("  range: {:.4} .. {:.4}", low[last], high[last]);
    }

    Ok(())
}
