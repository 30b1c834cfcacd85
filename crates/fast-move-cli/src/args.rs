//! CLI argument parsing module.
//!
//! This module defines the command-line interface for fast-move using clap.
//! The CLI follows the pattern:
//! `fast-move <func> <input.csv> <window> [--axis N] [--dtype T] [--method M] [-o output.csv]`
//!
//! # Examples
//!
//! ```bash
//! # Moving mean over 3 rows (down each column)
//! fast-move mean input.csv 3 --axis 0
//!
//! # Moving max along each row, written to a file
//! fast-move max input.csv 5 -o output.csv
//!
//! # NaN-ignoring minimum on integer data, checked with the reference loop
//! fast-move nanmin input.csv 2 --dtype int64 --method loop
//! ```

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use fast_move::dtype::DType;
use fast_move::moving::MoveFunc;
use fast_move::slow::Method;

/// fast-move: moving-window statistics over CSV matrices
#[derive(Parser, Debug)]
#[command(name = "fast-move")]
#[command(author, version, about = "Moving-window mean, min and max of CSV matrices")]
#[command(long_about = "fast-move computes moving-window reductions of a numeric CSV \
    matrix along its rows or columns. Output has the input's shape; the first \
    window-1 positions of every lane are NaN.")]
pub struct Args {
    /// The reduction to compute
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available reductions.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Moving mean; a NaN in the window makes the result NaN
    #[command(alias = "move_mean")]
    Mean(WindowArgs),

    /// Moving mean ignoring NaN
    #[command(name = "nanmean", alias = "move_nanmean")]
    NanMean(WindowArgs),

    /// Moving minimum; a NaN in the window makes the result NaN
    #[command(alias = "move_min")]
    Min(WindowArgs),

    /// Moving maximum; a NaN in the window makes the result NaN
    #[command(alias = "move_max")]
    Max(WindowArgs),

    /// Moving minimum ignoring NaN
    #[command(name = "nanmin", alias = "move_nanmin")]
    NanMin(WindowArgs),

    /// Moving maximum ignoring NaN
    #[command(name = "nanmax", alias = "move_nanmax")]
    NanMax(WindowArgs),
}

/// Arguments shared by every reduction.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct WindowArgs {
    /// Input CSV file
    pub input: String,

    /// Number of elements in the moving window
    pub window: usize,

    /// Axis to move along: 0 down the columns, 1 (or -1) along the rows
    #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
    pub axis: isize,

    /// Element type the input is converted to before computing
    #[arg(short, long, default_value = "float64")]
    pub dtype: DType,

    /// Implementation to run
    #[arg(short, long, value_enum, default_value_t = Engine::Fast)]
    pub method: Engine,

    /// Output CSV file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Which implementation computes the result.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    /// O(n) running-sum and monotonic-deque kernels
    #[default]
    Fast,
    /// Brute-force index loops
    Loop,
    /// Brute-force sliding views
    Windows,
}

impl Engine {
    /// The reference method, or `None` for the fast kernels.
    #[must_use]
    pub const fn reference_method(self) -> Option<Method> {
        match self {
            Self::Fast => None,
            Self::Loop => Some(Method::Loop),
            Self::Windows => Some(Method::Windows),
        }
    }
}

impl Command {
    /// The reduction this command names.
    #[must_use]
    pub const fn func(&self) -> MoveFunc {
        match self {
            Self::Mean(_) => MoveFunc::Mean,
            Self::NanMean(_) => MoveFunc::NanMean,
            Self::Min(_) => MoveFunc::Min,
            Self::Max(_) => MoveFunc::Max,
            Self::NanMin(_) => MoveFunc::NanMin,
            Self::NanMax(_) => MoveFunc::NanMax,
        }
    }

    /// The shared window arguments.
    #[must_use]
    pub const fn window_args(&self) -> &WindowArgs {
        match self {
            Self::Mean(args)
            | Self::NanMean(args)
            | Self::Min(args)
            | Self::Max(args)
            | Self::NanMin(args)
            | Self::NanMax(args) => args,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the input file path from the command.
    #[must_use]
    pub fn input_path(&self) -> &str {
        &self.command.window_args().input
    }

    /// Get the output file path from the command, if specified.
    #[must_use]
    pub fn output_path(&self) -> Option<&str> {
        self.command.window_args().output.as_deref()
    }

    /// Default log filter for the requested verbosity.
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mean_basic() {
        let args = Args::try_parse_from(["fast-move", "mean", "input.csv", "3"]).unwrap();
        assert_eq!(args.command.func(), MoveFunc::Mean);
        let w = args.command.window_args();
        assert_eq!(w.input, "input.csv");
        assert_eq!(w.window, 3);
        assert_eq!(w.axis, -1);
        assert_eq!(w.dtype, DType::Float64);
        assert_eq!(w.method, Engine::Fast);
        assert!(w.output.is_none());
    }

    #[test]
    fn test_parse_all_function_names() {
        let cases = [
            ("mean", MoveFunc::Mean),
            ("nanmean", MoveFunc::NanMean),
            ("min", MoveFunc::Min),
            ("max", MoveFunc::Max),
            ("nanmin", MoveFunc::NanMin),
            ("nanmax", MoveFunc::NanMax),
            ("move_nanmax", MoveFunc::NanMax),
            ("move_mean", MoveFunc::Mean),
        ];
        for (name, func) in cases {
            let args = Args::try_parse_from(["fast-move", name, "in.csv", "2"]).unwrap();
            assert_eq!(args.command.func(), func, "{name}");
        }
    }

    #[test]
    fn test_parse_negative_axis_and_output() {
        let args = Args::try_parse_from([
            "fast-move", "nanmin", "in.csv", "4", "--axis", "-2", "-o", "out.csv",
        ])
        .unwrap();
        assert_eq!(args.command.window_args().axis, -2);
        assert_eq!(args.output_path(), Some("out.csv"));
        assert_eq!(args.input_path(), "in.csv");
    }

    #[test]
    fn test_parse_dtype_and_method() {
        let args = Args::try_parse_from([
            "fast-move", "max", "in.csv", "2", "--dtype", "int32", "--method", "windows",
        ])
        .unwrap();
        let w = args.command.window_args();
        assert_eq!(w.dtype, DType::Int32);
        assert_eq!(w.method, Engine::Windows);
        assert_eq!(w.method.reference_method(), Some(Method::Windows));
    }

    #[test]
    fn test_parse_rejects_unsupported_dtype() {
        let result =
            Args::try_parse_from(["fast-move", "max", "in.csv", "2", "--dtype", "uint8"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_function() {
        assert!(Args::try_parse_from(["fast-move", "median", "in.csv", "2"]).is_err());
    }

    #[test]
    fn test_parse_rejects_negative_window() {
        assert!(Args::try_parse_from(["fast-move", "mean", "in.csv", "-2"]).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        let quiet = Args::try_parse_from(["fast-move", "mean", "in.csv", "2"]).unwrap();
        assert_eq!(quiet.log_filter(), "warn");

        let loud = Args::try_parse_from(["fast-move", "-vv", "mean", "in.csv", "2"]).unwrap();
        assert_eq!(loud.log_filter(), "debug");

        let after = Args::try_parse_from(["fast-move", "mean", "in.csv", "2", "-vvvv"]).unwrap();
        assert_eq!(after.log_filter(), "trace");
    }
}
