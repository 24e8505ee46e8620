//! Ports for the external tools driven by the pipeline.
//!
//! The model compiler and the graph renderer are reached through the
//! [`Compiler`] and [`Renderer`] traits. [`ProcessCompiler`] and
//! [`ProcessRenderer`] are the default adapters that spawn the real
//! executables; tests substitute their own implementations.

mod probe;
mod process;

pub use probe::find_executable;
pub use process::{ProcessCompiler, ProcessRenderer};

use std::path::Path;

/// Outcome of one model compiler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutput {
    /// `true` only when the compiler exited with status zero.
    pub success: bool,
    /// Standard output followed by diagnostic output, trimmed.
    pub output: String,
}

impl GenerationOutput {
    /// Build an output from the raw captured streams.
    pub fn from_streams(success: bool, stdout: &[u8], stderr: &[u8]) -> Self {
        let mut output = String::from_utf8_lossy(stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(stderr));
        Self {
            success,
            output: output.trim().to_string(),
        }
    }

    /// A failed run carrying only a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: message.into(),
        }
    }
}

/// A model compiler that turns a model file into graph and image files.
pub trait Compiler {
    /// Executable name or path, used in diagnostics.
    fn program(&self) -> &str;

    /// Returns `true` if the compiler can be invoked in this environment.
    fn is_available(&self) -> bool;

    /// Compile `input` with the given generator flag and suboptions.
    ///
    /// On success the compiler writes its artifacts next to `input`.
    /// Suboptions are passed in order, duplicates included.
    fn compile(&self, input: &Path, generator: &str, suboptions: &[String]) -> GenerationOutput;
}

/// A layout renderer that turns a graph description into an image.
pub trait Renderer {
    /// Executable name or path, used in diagnostics.
    fn program(&self) -> &str;

    /// Returns `true` if the renderer can be invoked in this environment.
    fn is_available(&self) -> bool;

    /// Render `graph` into `image`.
    ///
    /// Returns `true` only if `image` exists afterwards.
    fn render(&self, graph: &Path, image: &Path) -> bool;
}

/// Availability of both external tools, computed once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyStatus {
    pub compiler_available: bool,
    pub renderer_available: bool,
}

impl DependencyStatus {
    /// Probe both tools.
    pub fn probe(compiler: &impl Compiler, renderer: &impl Renderer) -> Self {
        Self {
            compiler_available: compiler.is_available(),
            renderer_available: renderer.is_available(),
        }
    }
}
