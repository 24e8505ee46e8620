//! CLI logic for the umplot diagram generator.
//!
//! This module wires argument parsing, configuration loading and the
//! generation pipeline together and formats the result for stdout.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::io;

use log::info;

use umplot::{Generator, UmplotError, report::GenerationReport};

/// Run the umplot CLI application
///
/// Validates the arguments, loads configuration, runs the generation
/// pipeline and prints the result line (or JSON record) to stdout.
///
/// # Errors
///
/// Returns `UmplotError` for:
/// - Missing `--input` or `--output`
/// - Configuration loading errors
/// - Any pipeline failure (missing tools, compilation, rendering, placement)
pub fn run(args: &Args) -> Result<(), UmplotError> {
    let report = generate(args)?;
    println!("{}", format_result(&report, args.json)?);
    Ok(())
}

/// Run the pipeline for `args` and return the report without printing it.
///
/// # Errors
///
/// Same as [`run`].
pub fn generate(args: &Args) -> Result<GenerationReport, UmplotError> {
    args.validate()?;

    let app_config = config::load_config(args.config.as_ref())?;
    let request = args.to_request(&app_config)?;

    let generator = Generator::from_config(&app_config);
    let report = generator.run(&request)?;

    info!(
        mode = report.mode(),
        image = report.image_path().display().to_string();
        "Diagram generated successfully"
    );

    Ok(report)
}

/// Format a report as the plain image path or a pretty-printed JSON record.
///
/// # Errors
///
/// Returns an error if the report cannot be serialized.
pub fn format_result(report: &GenerationReport, json: bool) -> io::Result<String> {
    if json {
        report.to_json()
    } else {
        Ok(report.image_path().display().to_string())
    }
}
