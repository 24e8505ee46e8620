//! Umplot - Generate Umple diagrams through external tools.
//!
//! The pipeline checks that the model compiler and graph renderer are
//! installed, compiles a model file with the generator for the requested
//! diagram type, renders the intermediate graph when the compiler stops short
//! of an image, and delivers the result either to an exact file path or into
//! a fresh, named folder.

pub mod config;
pub mod placement;
pub mod report;
pub mod tools;

mod error;

pub use umplot_core::{artifact, diagram, naming, output};

pub use error::{
    EXIT_MISSING_DEPENDENCY, EXIT_SUCCESS, EXIT_SVG_GENERATION_FAILED, EXIT_VALIDATION_FAILED,
    Tool, UmplotError,
};

use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, info, warn};

use artifact::{ArtifactSet, image_path_for_graph};
use config::AppConfig;
use diagram::DiagramType;
use output::OutputMode;
use placement::{Artifacts, place};
use report::GenerationReport;
use tools::{
    Compiler, DependencyStatus, GenerationOutput, ProcessCompiler, ProcessRenderer, Renderer,
};

/// A single generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Absolute path of the model source file.
    pub input: PathBuf,
    /// Logical diagram type name, resolved against the supported set.
    pub diagram_type: String,
    /// Generator suboptions, passed through in order.
    pub suboptions: Vec<String>,
    /// Absolute output directory or exact `.svg` path.
    pub output: PathBuf,
    /// Optional folder label; its presence forces folder mode.
    pub name: Option<String>,
}

/// Runs the generation pipeline against a pair of tools.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::PathBuf;
///
/// use umplot::{Generator, GenerationRequest, config::AppConfig};
///
/// let generator = Generator::from_config(&AppConfig::default());
/// let request = GenerationRequest {
///     input: PathBuf::from("/work/model.ump"),
///     diagram_type: "state-machine".to_string(),
///     suboptions: vec![],
///     output: PathBuf::from("/work/out/model.svg"),
///     name: None,
/// };
///
/// let report = generator.run(&request).expect("Failed to generate");
/// println!("{}", report.image_path().display());
/// ```
#[derive(Debug, Clone)]
pub struct Generator<C = ProcessCompiler, R = ProcessRenderer> {
    compiler: C,
    renderer: R,
}

impl Generator {
    /// Create a generator that spawns the configured executables.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            ProcessCompiler::from_config(config),
            ProcessRenderer::from_config(config),
        )
    }
}

impl<C: Compiler, R: Renderer> Generator<C, R> {
    /// Create a generator from explicit tool implementations.
    pub fn new(compiler: C, renderer: R) -> Self {
        Self { compiler, renderer }
    }

    /// Returns the model compiler.
    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// Returns the graph renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Probe both external tools.
    pub fn check_dependencies(&self) -> DependencyStatus {
        DependencyStatus::probe(&self.compiler, &self.renderer)
    }

    /// Run the full pipeline for `request`.
    ///
    /// Stages run in order and the first failure ends the run: input check,
    /// dependency probe, compilation, artifact lookup, renderer fallback,
    /// placement.
    ///
    /// # Errors
    ///
    /// Returns `UmplotError` for:
    /// - A missing input file
    /// - A missing compiler or renderer
    /// - An unsupported diagram type or failed compilation
    /// - No image after compilation and fallback rendering
    /// - File system errors during placement
    pub fn run(&self, request: &GenerationRequest) -> Result<GenerationReport, UmplotError> {
        info!(
            input:? = request.input,
            output:? = request.output,
            diagram_type = request.diagram_type;
            "Generating diagram"
        );

        if !request.input.exists() {
            return Err(UmplotError::InputNotFound(request.input.clone()));
        }

        self.require_dependencies()?;

        let (diagram_type, generation) = self.compile(
            &request.input,
            &request.diagram_type,
            &request.suboptions,
        )?;
        if !generation.success {
            return Err(UmplotError::Generation(generation.output));
        }
        debug!(output = generation.output; "Model compiler finished");

        let mut artifacts = ArtifactSet::locate(&request.input);
        if artifacts.needs_rendering() {
            self.render_fallback(&mut artifacts);
        }

        let image = artifacts.image.as_deref().ok_or(UmplotError::ImageNotGenerated)?;

        let mode = OutputMode::select(&request.output, request.name.as_deref());
        debug!(mode = mode.tag(); "Selected output mode");

        let placement = place(
            &mode,
            Artifacts {
                source: &request.input,
                intermediate: artifacts.intermediate.as_deref(),
                image,
            },
            diagram_type,
            Utc::now(),
        )?;

        Ok(GenerationReport::new(
            &request.input,
            &request.diagram_type,
            &placement,
        ))
    }

    /// Fail with [`UmplotError::MissingDependency`] unless both tools are present.
    ///
    /// The renderer is required even when the compiler would emit the image
    /// directly.
    fn require_dependencies(&self) -> Result<(), UmplotError> {
        let status = self.check_dependencies();
        debug!(status:?; "Dependency status");

        if !status.compiler_available {
            return Err(UmplotError::MissingDependency {
                tool: Tool::Compiler,
                program: self.compiler.program().to_string(),
            });
        }
        if !status.renderer_available {
            return Err(UmplotError::MissingDependency {
                tool: Tool::Renderer,
                program: self.renderer.program().to_string(),
            });
        }
        Ok(())
    }

    /// Resolve the generator flag and run the compiler.
    ///
    /// An unsupported diagram type fails before any process is spawned.
    fn compile(
        &self,
        input: &Path,
        diagram_type: &str,
        suboptions: &[String],
    ) -> Result<(DiagramType, GenerationOutput), UmplotError> {
        let diagram_type: DiagramType = diagram_type
            .parse()
            .map_err(|_| UmplotError::UnsupportedDiagramType(diagram_type.to_string()))?;

        let output = self
            .compiler
            .compile(input, diagram_type.generator_flag(), suboptions);
        Ok((diagram_type, output))
    }

    /// Render the intermediate graph into the sibling image path.
    ///
    /// On success `artifacts.image` is filled in; failures leave it empty.
    fn render_fallback(&self, artifacts: &mut ArtifactSet) {
        let Some(graph) = artifacts.intermediate.as_deref() else {
            return;
        };

        let image = image_path_for_graph(graph);
        info!(graph:? = graph; "Compiler produced no image, rendering graph");

        if self.renderer.render(graph, &image) {
            artifacts.image = Some(image);
        } else {
            warn!(graph:? = graph; "Renderer fallback failed");
        }
    }
}
