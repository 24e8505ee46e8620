//! Command-line argument definitions for the umplot CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Required paths are optional at the clap level so that a
//! missing `--input` or `--output` is reported with umplot's own exit code.

use std::path::{self, PathBuf};

use clap::Parser;

use umplot::{GenerationRequest, UmplotError, config::AppConfig};

const AFTER_HELP: &str = "\
Modes:
  Folder mode: when --name is given or --output is a directory.
               Creates a named, timestamped folder with the .ump, .gv and .svg files.
  Exact path:  when --output ends with .svg and no --name is given.
               Saves only the SVG to that exact path.

Exit codes:
  0  Success
  1  Missing dependencies (umple or dot) or missing --input/--output
  2  Input not found or Umple validation/compilation failed
  3  SVG generation failed or unsupported diagram type";

/// Command-line arguments for the umplot diagram generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, after_help = AFTER_HELP)]
pub struct Args {
    /// Input .ump file
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Input .ump file, used when --input is not given; extra values are ignored
    #[arg(value_name = "INPUT", num_args = 0..)]
    pub positional_inputs: Vec<PathBuf>,

    /// Output directory (folder mode) or .svg file path (exact path mode)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Diagram name; forces folder mode
    #[arg(short, long)]
    pub name: Option<String>,

    /// Diagram type: state-machine (default) or class-diagram
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub diagram_type: Option<String>,

    /// Diagram generator suboption, repeatable (e.g. hideactions, hideguards)
    #[arg(short, long = "suboption", value_name = "OPT")]
    pub suboptions: Vec<String>,

    /// Print a JSON record instead of the plain output path
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Returns the input path, preferring `--input` over the first positional.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().or(self.positional_inputs.first())
    }

    /// Fail with [`UmplotError::MissingArgument`] unless input and output are set.
    ///
    /// # Errors
    ///
    /// Returns `UmplotError::MissingArgument` if either path is absent.
    pub fn validate(&self) -> Result<(), UmplotError> {
        match (self.input_path(), &self.output) {
            (Some(_), Some(_)) => Ok(()),
            _ => Err(UmplotError::MissingArgument),
        }
    }

    /// Build the generation request, making both paths absolute.
    ///
    /// The diagram type falls back to the configured default.
    ///
    /// # Errors
    ///
    /// Returns `UmplotError::MissingArgument` if a required path is absent,
    /// or `UmplotError::Io` if the current directory cannot be determined.
    pub fn to_request(&self, config: &AppConfig) -> Result<GenerationRequest, UmplotError> {
        let (Some(input), Some(output)) = (self.input_path(), &self.output) else {
            return Err(UmplotError::MissingArgument);
        };

        let diagram_type = self
            .diagram_type
            .clone()
            .unwrap_or_else(|| config.generation().default_type().to_string());

        Ok(GenerationRequest {
            input: path::absolute(input)?,
            diagram_type,
            suboptions: self.suboptions.clone(),
            output: path::absolute(output)?,
            name: self.name.clone(),
        })
    }
}
