//! Configuration types for umplot.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file by the CLI. Every field has a default, so an empty file is a
//! valid configuration.
//!
//! # Example
//!
//! ```
//! # use umplot::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.tools().compiler(), "umple");
//! assert_eq!(config.tools().renderer(), "dot");
//! ```

use std::time::Duration;

use serde::Deserialize;

use umplot_core::diagram::DiagramType;

const DEFAULT_COMPILER: &str = "umple";
const DEFAULT_RENDERER: &str = "dot";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// External tool section.
    #[serde(default)]
    tools: ToolsConfig,

    /// Generation behavior section.
    #[serde(default)]
    generation: GenerationConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(tools: ToolsConfig, generation: GenerationConfig) -> Self {
        Self { tools, generation }
    }

    /// Returns the external tool configuration.
    pub fn tools(&self) -> &ToolsConfig {
        &self.tools
    }

    /// Returns the generation configuration.
    pub fn generation(&self) -> &GenerationConfig {
        &self.generation
    }
}

/// Names or paths of the external executables.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_compiler")]
    compiler: String,

    #[serde(default = "default_renderer")]
    renderer: String,
}

impl ToolsConfig {
    /// Creates a new [`ToolsConfig`].
    ///
    /// # Arguments
    ///
    /// * `compiler` - Executable name or path of the model compiler.
    /// * `renderer` - Executable name or path of the graph renderer.
    pub fn new(compiler: impl Into<String>, renderer: impl Into<String>) -> Self {
        Self {
            compiler: compiler.into(),
            renderer: renderer.into(),
        }
    }

    /// Returns the model compiler executable.
    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    /// Returns the graph renderer executable.
    pub fn renderer(&self) -> &str {
        &self.renderer
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COMPILER, DEFAULT_RENDERER)
    }
}

/// Settings that shape a single generation run.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Diagram type used when `--type` is not given.
    #[serde(default)]
    default_type: DiagramType,

    /// Upper bound on each external tool run, in seconds. Zero disables it.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

impl GenerationConfig {
    /// Creates a new [`GenerationConfig`].
    pub fn new(default_type: DiagramType, timeout_secs: u64) -> Self {
        Self {
            default_type,
            timeout_secs,
        }
    }

    /// Returns the default [`DiagramType`].
    pub fn default_type(&self) -> DiagramType {
        self.default_type
    }

    /// Returns the tool timeout, or `None` when unbounded.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(DiagramType::default(), DEFAULT_TIMEOUT_SECS)
    }
}

fn default_compiler() -> String {
    DEFAULT_COMPILER.to_string()
}

fn default_renderer() -> String {
    DEFAULT_RENDERER.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout_is_bounded() {
        let config = GenerationConfig::default();
        assert_eq!(config.timeout(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_zero_timeout_disables_bound() {
        let config = GenerationConfig::new(DiagramType::StateMachine, 0);
        assert_eq!(config.timeout(), None);
    }
}
