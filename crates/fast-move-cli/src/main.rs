//! fast-move command-line interface
//!
//! This binary computes moving-window reductions of numeric CSV matrices.

use std::process::ExitCode;

use fast_move_cli::args::Args;

fn main() -> ExitCode {
    let args = Args::parse_args();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    match fast_move_cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{e:?}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
