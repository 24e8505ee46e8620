//! Locating and reading `umplot` settings files.
//!
//! Settings come from the first file found among an explicit `--config` path,
//! `umplot/config.toml` under the working directory and the per-user config
//! directory. With none of them present the built-in defaults apply.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use umplot::{UmplotError, config::AppConfig};

/// Name of the settings file inside a config directory.
const CONFIG_FILE: &str = "config.toml";

/// Failure to turn a settings file into an [`AppConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("Cannot read config file {}: {err}", .path.display())]
    Unreadable { path: PathBuf, err: io::Error },

    #[error("Invalid settings in {}: {message}", .path.display())]
    Invalid { path: PathBuf, message: String },
}

impl From<ConfigError> for UmplotError {
    fn from(err: ConfigError) -> Self {
        UmplotError::Config(err.to_string())
    }
}

/// Where a settings file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSource {
    /// Given with `--config`; it must exist.
    Explicit,
    /// `umplot/config.toml` relative to the working directory.
    Project,
    /// The platform's per-user config directory.
    User,
}

/// Resolve settings for this run.
///
/// An explicit path wins and must exist. Otherwise the project file, then the
/// user file, is used when present.
///
/// # Errors
///
/// Returns [`UmplotError::Config`] when the explicit file is missing, or when
/// the chosen file cannot be read or holds invalid settings.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, UmplotError> {
    if let Some(path) = explicit_path {
        return read_settings(path.as_ref(), ConfigSource::Explicit);
    }

    match discover() {
        Some((path, source)) => read_settings(&path, source),
        None => {
            debug!("No settings file present, using built-in defaults");
            Ok(AppConfig::default())
        }
    }
}

/// First existing implicit settings file, in lookup order.
fn discover() -> Option<(PathBuf, ConfigSource)> {
    let user = ProjectDirs::from("org", "umplot", "umplot")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE));
    if user.is_none() {
        debug!("No per-user config directory on this platform");
    }

    let candidates = [
        (Some(Path::new("umplot").join(CONFIG_FILE)), ConfigSource::Project),
        (user, ConfigSource::User),
    ];

    candidates
        .into_iter()
        .filter_map(|(path, source)| path.map(|path| (path, source)))
        .find(|(path, source)| {
            let found = path.is_file();
            debug!(path:? = path, source:?, found; "Checked settings location");
            found
        })
}

fn read_settings(path: &Path, source: ConfigSource) -> Result<AppConfig, UmplotError> {
    info!(path:? = path, source:?; "Reading settings file");

    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::Unreadable {
            path: path.to_path_buf(),
            err,
        },
    })?;

    let config = toml::from_str(&content).map_err(|err| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    Ok(config)
}
