//! Location of the files the model compiler writes next to its input.
//!
//! The compiler writes `<base>.gv` and, for some generators, `<base>.svg` into
//! the directory of the model file, where `<base>` is the model file name with
//! its `.ump` suffix removed.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use log::debug;

/// Extension of model source files, without the leading dot.
pub const MODEL_EXTENSION: &str = "ump";

/// Extension of intermediate graph description files.
pub const GRAPH_EXTENSION: &str = "gv";

/// Extension of rendered image files.
pub const IMAGE_EXTENSION: &str = "svg";

/// The compiler artifacts that exist on disk for a given model file.
///
/// Each path is present only if the file existed when the set was located.
/// The renderer fallback fills in `image` once it has produced one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    pub intermediate: Option<PathBuf>,
    pub image: Option<PathBuf>,
}

impl ArtifactSet {
    /// Look up the compiler output files expected for `input`.
    ///
    /// Only existence is checked; file contents are not inspected.
    pub fn locate(input: &Path) -> Self {
        let intermediate = expected_intermediate_path(input);
        let image = expected_image_path(input);

        let set = Self {
            intermediate: intermediate.is_file().then_some(intermediate),
            image: image.is_file().then_some(image),
        };

        debug!(
            intermediate:? = set.intermediate,
            image:? = set.image;
            "Located compiler artifacts"
        );

        set
    }

    /// Returns `true` when an intermediate exists but no image does.
    pub fn needs_rendering(&self) -> bool {
        self.image.is_none() && self.intermediate.is_some()
    }
}

/// Returns the base name of a model file: its file name minus a trailing `.ump`.
///
/// Files without the `.ump` suffix keep their full file name.
pub fn model_base_name(input: &Path) -> OsString {
    let is_model = input.extension().is_some_and(|ext| ext == MODEL_EXTENSION);
    let name = if is_model {
        input.file_stem()
    } else {
        input.file_name()
    };
    name.unwrap_or_default().to_os_string()
}

/// Path where the compiler writes the intermediate graph for `input`.
pub fn expected_intermediate_path(input: &Path) -> PathBuf {
    sibling_with_extension(input, GRAPH_EXTENSION)
}

/// Path where the compiler (or the renderer) writes the image for `input`.
pub fn expected_image_path(input: &Path) -> PathBuf {
    sibling_with_extension(input, IMAGE_EXTENSION)
}

/// Returns the image path that sits next to an intermediate graph file.
///
/// A trailing `.gv` is replaced by `.svg`; any other name gets `.svg` appended.
pub fn image_path_for_graph(graph: &Path) -> PathBuf {
    if graph.extension().is_some_and(|ext| ext == GRAPH_EXTENSION) {
        return graph.with_extension(IMAGE_EXTENSION);
    }

    let mut path = graph.as_os_str().to_os_string();
    path.push(".");
    path.push(IMAGE_EXTENSION);
    PathBuf::from(path)
}

/// Returns `true` when `path` names an image file, judged by its literal suffix.
pub fn has_image_extension(path: &Path) -> bool {
    let suffix = [b".", IMAGE_EXTENSION.as_bytes()].concat();
    path.as_os_str()
        .as_encoded_bytes()
        .ends_with(suffix.as_slice())
}

fn sibling_with_extension(input: &Path, extension: &str) -> PathBuf {
    let mut name = model_base_name(input);
    name.push(".");
    name.push(extension);

    match input.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
