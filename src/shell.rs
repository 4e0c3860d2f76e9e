//! Resolution of the interpreter used to run commands.

use std::env;
use std::ffi::OsString;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Interpreters tried on `$PATH` when `$SHELL` is unset or empty.
const FALLBACK_SHELLS: [&str; 2] = ["bash", "sh"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("cannot find shell: $SHELL is empty, neither bash nor sh are in $PATH")]
    NotFound,
}

/// Resolve the user's shell from the process environment.
pub fn resolve_shell() -> Result<PathBuf, ShellError> {
    resolve_shell_from(env::var_os("SHELL"), env::var_os("PATH"))
}

/// Resolve a shell from explicit `$SHELL` and `$PATH` values.
///
/// `$SHELL` wins when non-empty; otherwise `bash`, then `sh`, are looked up
/// on `path`.
pub fn resolve_shell_from(
    shell: Option<OsString>,
    path: Option<OsString>,
) -> Result<PathBuf, ShellError> {
    tracing::debug!("checking $SHELL...");
    if let Some(shell) = shell.filter(|s| !s.is_empty()) {
        tracing::debug!(shell = ?shell, "found shell");
        return Ok(PathBuf::from(shell));
    }

    for candidate in FALLBACK_SHELLS {
        tracing::debug!(candidate, "checking $PATH...");
        if let Some(found) = path.as_deref().and_then(|p| find_in_path(candidate, p)) {
            tracing::debug!(shell = %found.display(), "found shell");
            return Ok(found);
        }
    }
    Err(ShellError::NotFound)
}

fn find_in_path(name: &str, path: &std::ffi::OsStr) -> Option<PathBuf> {
    env::split_paths(path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
