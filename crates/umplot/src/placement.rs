//! Output placement: copying generated artifacts to where the caller asked.
//!
//! Placement never moves or deletes the compiler's own output next to the
//! model file; it only adds copies.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use umplot_core::{diagram::DiagramType, naming::folder_name, output::OutputMode};

use crate::error::UmplotError;

/// Files delivered by a placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// A single image copied to an exact path.
    Exact { image: PathBuf },
    /// A freshly created folder holding every artifact.
    Folder {
        dir: PathBuf,
        source: PathBuf,
        intermediate: Option<PathBuf>,
        image: PathBuf,
    },
}

impl Placement {
    /// Path of the delivered image.
    pub fn image(&self) -> &Path {
        match self {
            Self::Exact { image } | Self::Folder { image, .. } => image,
        }
    }
}

/// The artifacts available for placement.
#[derive(Debug, Clone, Copy)]
pub struct Artifacts<'a> {
    pub source: &'a Path,
    pub intermediate: Option<&'a Path>,
    pub image: &'a Path,
}

/// Copy `artifacts` according to `mode`.
///
/// # Arguments
///
/// * `mode` - Exact or folder output mode
/// * `artifacts` - Source model, optional intermediate graph and image
/// * `diagram_type` - Used to derive the folder name when no label is given
/// * `now` - Time stamped into the folder name
///
/// # Errors
///
/// Returns [`UmplotError::Io`] if a directory cannot be created or a copy
/// fails. In folder mode, a folder created by this call is removed again
/// before the error is returned.
pub fn place(
    mode: &OutputMode,
    artifacts: Artifacts<'_>,
    diagram_type: DiagramType,
    now: DateTime<Utc>,
) -> Result<Placement, UmplotError> {
    match mode {
        OutputMode::Exact(path) => place_exact(path, artifacts.image),
        OutputMode::Folder { base, label } => {
            let dir = base.join(folder_name(label.as_deref(), diagram_type, now));
            place_folder(&dir, artifacts)
        }
    }
}

fn place_exact(path: &Path, image: &Path) -> Result<Placement, UmplotError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    copy_file(image, path)?;
    info!(path:? = path; "Image copied to exact path");

    Ok(Placement::Exact {
        image: path.to_path_buf(),
    })
}

fn place_folder(dir: &Path, artifacts: Artifacts<'_>) -> Result<Placement, UmplotError> {
    let folder = StagedFolder::create(dir)?;

    let image = folder.copy_in(artifacts.image)?;
    let intermediate = artifacts
        .intermediate
        .map(|path| folder.copy_in(path))
        .transpose()?;
    let source = folder.copy_in(artifacts.source)?;

    let dir = folder.commit();
    info!(dir:? = dir; "Artifacts copied to output folder");

    Ok(Placement::Folder {
        dir,
        source,
        intermediate,
        image,
    })
}

/// Copy `from` to `to`, overwriting `to`.
///
/// Copying a file onto itself is a no-op; `fs::copy` would truncate it first.
fn copy_file(from: &Path, to: &Path) -> io::Result<()> {
    if to.exists() && fs::canonicalize(from)? == fs::canonicalize(to)? {
        debug!(path:? = to; "Source and destination are the same file, skipping copy");
        return Ok(());
    }

    fs::copy(from, to)?;
    Ok(())
}

/// An output folder that is removed on drop unless committed.
///
/// Only a folder this run created is ever removed; a pre-existing folder with
/// the same name is left alone.
struct StagedFolder {
    path: PathBuf,
    created: bool,
}

impl StagedFolder {
    fn create(path: &Path) -> io::Result<Self> {
        let created = !path.exists();
        fs::create_dir_all(path)?;
        debug!(path:? = path, created; "Prepared output folder");
        Ok(Self {
            path: path.to_path_buf(),
            created,
        })
    }

    /// Copy `file` into the folder under its own file name.
    fn copy_in(&self, file: &Path) -> io::Result<PathBuf> {
        let name = file.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a file path: {}", file.display()),
            )
        })?;
        let target = self.path.join(name);
        copy_file(file, &target)?;
        Ok(target)
    }

    fn commit(mut self) -> PathBuf {
        self.created = false;
        std::mem::take(&mut self.path)
    }
}

impl Drop for StagedFolder {
    fn drop(&mut self) {
        if !self.created {
            return;
        }

        warn!(path:? = self.path; "Removing partially populated output folder");
        if let Err(err) = fs::remove_dir_all(&self.path) {
            warn!(path:? = self.path, err:err; "Failed to remove output folder");
        }
    }
}
