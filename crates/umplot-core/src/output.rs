//! Output placement modes.

use std::path::{Path, PathBuf};

use crate::artifact::has_image_extension;

/// Where the generated artifacts are delivered.
///
/// Selected once per run by [`OutputMode::select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Copy only the image to this exact file path.
    Exact(PathBuf),
    /// Create a fresh named folder under `base` holding every artifact.
    Folder {
        base: PathBuf,
        label: Option<String>,
    },
}

impl OutputMode {
    /// Decide the output mode from the output path and optional label.
    ///
    /// Exact mode requires both an output path ending in `.svg` and no label.
    /// A label always forces folder mode, in which case `output` is used as
    /// the base directory even if it looks like a file path.
    pub fn select(output: &Path, label: Option<&str>) -> Self {
        match label {
            None if has_image_extension(output) => Self::Exact(output.to_path_buf()),
            _ => Self::Folder {
                base: output.to_path_buf(),
                label: label.map(str::to_string),
            },
        }
    }

    /// Short tag for this mode, as used in structured output.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Exact(_) => "exact",
            Self::Folder { .. } => "folder",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_path_without_label_is_exact() {
        let mode = OutputMode::select(Path::new("/out/diagram.svg"), None);
        assert_eq!(mode, OutputMode::Exact(PathBuf::from("/out/diagram.svg")));
        assert_eq!(mode.tag(), "exact");
    }

    #[test]
    fn test_directory_without_label_is_folder() {
        let mode = OutputMode::select(Path::new("/out/diagrams"), None);
        assert_eq!(
            mode,
            OutputMode::Folder {
                base: PathBuf::from("/out/diagrams"),
                label: None,
            }
        );
        assert_eq!(mode.tag(), "folder");
    }

    #[test]
    fn test_label_forces_folder_mode() {
        let mode = OutputMode::select(Path::new("/out/diagram.svg"), Some("auth"));
        assert_eq!(
            mode,
            OutputMode::Folder {
                base: PathBuf::from("/out/diagram.svg"),
                label: Some("auth".to_string()),
            }
        );
    }
}
