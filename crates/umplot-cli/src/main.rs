//! umplot CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, info};

use umplot::{EXIT_MISSING_DEPENDENCY, EXIT_SUCCESS};
use umplot_cli::{Args, error_adapter::render_report};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    // Usage errors exit with the missing-arguments code instead of clap's default
    let args = Args::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        let code = if err.use_stderr() {
            EXIT_MISSING_DEPENDENCY
        } else {
            EXIT_SUCCESS
        };
        process::exit(code);
    });

    // Initialize the logger with the specified log level
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting umplot");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = umplot_cli::run(&args) {
        eprint!("{}", render_report(&err));
        process::exit(err.exit_code());
    }

    info!("Completed successfully");
}
