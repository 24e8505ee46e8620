//! Error adapter for converting UmplotError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use umplot::UmplotError;

/// Adapter rendering an [`UmplotError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a UmplotError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            UmplotError::MissingArgument => "umplot::missing_argument",
            UmplotError::MissingDependency { .. } => "umplot::missing_dependency",
            UmplotError::InputNotFound(_) => "umplot::input_not_found",
            UmplotError::Generation(_) => "umplot::generation",
            UmplotError::Config(_) => "umplot::config",
            UmplotError::Io(_) => "umplot::io",
            UmplotError::UnsupportedDiagramType(_) => "umplot::unsupported_type",
            UmplotError::ImageNotGenerated => "umplot::svg_generation",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: &str = match &self.0 {
            UmplotError::MissingArgument => "Run `umplot --help` for usage",
            UmplotError::MissingDependency { tool, .. } => tool.install_hint(),
            UmplotError::ImageNotGenerated => {
                "The compiler produced neither an .svg nor a .gv that Graphviz could render"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Render `err` as a human-readable report.
pub fn render_report(err: &UmplotError) -> String {
    let reporter = miette::GraphicalReportHandler::new();
    let mut writer = String::new();
    if reporter
        .render_report(&mut writer, &ErrorAdapter(err))
        .is_err()
    {
        return format!("Error: {err}");
    }
    writer
}
