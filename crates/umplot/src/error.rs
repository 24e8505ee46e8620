//! Error types for umplot operations.
//!
//! This module provides the main error type [`UmplotError`]. Every variant maps
//! to one of the fixed process exit codes through [`UmplotError::exit_code`].

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Exit code for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for a missing external tool or missing required arguments.
pub const EXIT_MISSING_DEPENDENCY: i32 = 1;
/// Exit code for a missing input or a failed compilation.
pub const EXIT_VALIDATION_FAILED: i32 = 2;
/// Exit code for an unsupported diagram type or a missing image.
pub const EXIT_SVG_GENERATION_FAILED: i32 = 3;

/// The external tools the pipeline depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// The model compiler (`umple`)
    Compiler,
    /// The graph layout renderer (`dot`)
    Renderer,
}

impl Tool {
    /// Returns installation guidance for this tool.
    pub fn install_hint(self) -> &'static str {
        match self {
            Self::Compiler => {
                "Install from: https://cruise.umple.org/umpleonline/download_umple.shtml"
            }
            Self::Renderer => "Install Graphviz, e.g. `brew install graphviz` or `apt install graphviz`",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compiler => write!(f, "model compiler"),
            Self::Renderer => write!(f, "graph renderer"),
        }
    }
}

/// The main error type for umplot operations.
#[derive(Debug, Error)]
pub enum UmplotError {
    #[error("--input and --output are required")]
    MissingArgument,

    #[error("{tool} `{program}` not found")]
    MissingDependency { tool: Tool, program: String },

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Umple generation failed:\n{0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(
        "Unsupported diagram type: {0}. Supported types: {supported}",
        supported = umplot_core::diagram::SUPPORTED_TYPES.join(", ")
    )]
    UnsupportedDiagramType(String),

    #[error("SVG file was not generated")]
    ImageNotGenerated,
}

impl UmplotError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingArgument | Self::MissingDependency { .. } => EXIT_MISSING_DEPENDENCY,
            Self::InputNotFound(_) | Self::Generation(_) | Self::Config(_) | Self::Io(_) => {
                EXIT_VALIDATION_FAILED
            }
            Self::UnsupportedDiagramType(_) | Self::ImageNotGenerated => {
                EXIT_SVG_GENERATION_FAILED
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(UmplotError::MissingArgument.exit_code(), 1);
        assert_eq!(
            UmplotError::MissingDependency {
                tool: Tool::Renderer,
                program: "dot".to_string(),
            }
            .exit_code(),
            1
        );
        assert_eq!(
            UmplotError::InputNotFound(PathBuf::from("/x.ump")).exit_code(),
            2
        );
        assert_eq!(UmplotError::Generation(String::new()).exit_code(), 2);
        assert_eq!(
            UmplotError::UnsupportedDiagramType("sequence".to_string()).exit_code(),
            3
        );
        assert_eq!(UmplotError::ImageNotGenerated.exit_code(), 3);
    }

    #[test]
    fn test_unsupported_type_message_names_supported_set() {
        let err = UmplotError::UnsupportedDiagramType("sequence".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported diagram type: sequence. Supported types: state-machine, class-diagram"
        );
    }

    #[test]
    fn test_missing_dependency_message() {
        let err = UmplotError::MissingDependency {
            tool: Tool::Compiler,
            program: "umple".to_string(),
        };
        assert_eq!(err.to_string(), "model compiler `umple` not found");
    }
}
