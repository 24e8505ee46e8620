//! Result record of a successful generation.

use std::{
    io,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::placement::Placement;

/// Outcome of a successful run, serializable as the `--json` record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    success: bool,
    mode: &'static str,
    input_path: PathBuf,
    diagram_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_path: Option<PathBuf>,
    files: ReportFiles,
}

/// Delivered artifact paths keyed by kind.
#[derive(Debug, Clone, Serialize)]
pub struct ReportFiles {
    #[serde(skip_serializing_if = "Option::is_none")]
    ump: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gv: Option<PathBuf>,
    svg: PathBuf,
}

impl GenerationReport {
    /// Build the report for a completed placement.
    pub fn new(input_path: &Path, diagram_type: &str, placement: &Placement) -> Self {
        let (mode, output_dir, output_path, files) = match placement {
            Placement::Exact { image } => (
                "exact",
                None,
                Some(image.clone()),
                ReportFiles {
                    ump: None,
                    gv: None,
                    svg: image.clone(),
                },
            ),
            Placement::Folder {
                dir,
                source,
                intermediate,
                image,
            } => (
                "folder",
                Some(dir.clone()),
                None,
                ReportFiles {
                    ump: Some(source.clone()),
                    gv: intermediate.clone(),
                    svg: image.clone(),
                },
            ),
        };

        Self {
            success: true,
            mode,
            input_path: input_path.to_path_buf(),
            diagram_type: diagram_type.to_string(),
            output_dir,
            output_path,
            files,
        }
    }

    /// Output mode tag, `exact` or `folder`.
    pub fn mode(&self) -> &'static str {
        self.mode
    }

    /// Path of the delivered image; the plain-text result line.
    pub fn image_path(&self) -> &Path {
        &self.files.svg
    }

    /// Pretty-printed JSON record.
    ///
    /// # Errors
    ///
    /// Fails only if a path is not valid UTF-8.
    pub fn to_json(&self) -> io::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
