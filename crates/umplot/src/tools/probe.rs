//! Executable lookup on the search path.

use std::{
    env,
    path::{Path, PathBuf},
};

use log::trace;

/// Locate `program` the way a shell would.
///
/// A name containing a path separator is checked as given. Otherwise every
/// directory in `PATH` is searched in order and the first executable match
/// is returned.
pub fn find_executable(program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }

    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let path = env::var_os("PATH")?;
    env::split_paths(&path)
        .flat_map(|dir| with_executable_extensions(dir.join(program)))
        .inspect(|path| trace!(path:? = path; "Probing executable"))
        .find(|path| is_executable(path))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(windows)]
fn with_executable_extensions(path: PathBuf) -> Vec<PathBuf> {
    use std::ffi::OsString;

    let exts = env::var_os("PATHEXT").unwrap_or_else(|| OsString::from(".COM;.EXE;.BAT;.CMD"));
    let mut candidates = vec![path.clone()];
    for ext in exts.to_string_lossy().split(';').filter(|ext| !ext.is_empty()) {
        let mut name = path.clone().into_os_string();
        name.push(ext);
        candidates.push(PathBuf::from(name));
    }
    candidates
}

#[cfg(not(windows))]
fn with_executable_extensions(path: PathBuf) -> Vec<PathBuf> {
    vec![path]
}

#[cfg(all(test, unix))]
mod tests {
    use std::{fs, os::unix::fs::PermissionsExt};

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_explicit_path_must_be_executable() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let tool = temp_dir.path().join("tool");
        fs::write(&tool, "#!/bin/sh\n").unwrap();

        let name = tool.to_string_lossy().to_string();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o644)).unwrap();
        assert_eq!(find_executable(&name), None);

        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(find_executable(&name), Some(tool));
    }

    #[test]
    fn test_missing_program_is_not_found() {
        assert_eq!(find_executable("umplot-definitely-not-installed"), None);
        assert_eq!(find_executable(""), None);
    }

    #[test]
    fn test_common_shell_is_found() {
        assert!(find_executable("sh").is_some());
    }
}
