//! Persisting the final pipeline as an executable shell script.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

/// Highest `N` tried for `up<N>.sh`.
const MAX_NUMBERED: u32 = 999;
const SCRIPT_MODE: u32 = 0o755;

/// Where a script may be written, in order of preference.
#[derive(Debug, Clone)]
pub struct ScriptTarget {
    /// Explicit path from `--output-script`.
    pub path: Option<PathBuf>,
    /// Directory searched for a free `up<N>.sh`.
    pub numbered_dir: PathBuf,
    /// Directory for the `up-*.sh` fallback.
    pub temp_dir: PathBuf,
}

impl ScriptTarget {
    /// Explicit path (if any), then the working directory, then the system
    /// temp directory.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            numbered_dir: PathBuf::from("."),
            temp_dir: std::env::temp_dir(),
        }
    }
}

/// Outcome of [`save_script`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedScript {
    File(PathBuf),
    /// Every write failed; the command was printed instead.
    Printed,
}

/// Script body: shebang line followed by the command.
pub fn script_contents(shell: &Path, command: &str) -> String {
    format!("#!{}\n{}\n", shell.display(), command)
}

/// Write `command` as a script, falling back until something succeeds.
///
/// Progress is reported on `diag`; failures to write `diag` are ignored.
pub fn save_script<W: Write>(
    shell: &Path,
    command: &str,
    target: &ScriptTarget,
    diag: &mut W,
) -> SavedScript {
    let contents = script_contents(shell, command);

    let primary = match &target.path {
        Some(path) => {
            let _ = write!(diag, "up: writing {}", path.display());
            write_explicit(path, &contents)
        }
        None => {
            let _ = write!(diag, "up: writing: {}", target.numbered_dir.display());
            write_numbered(&target.numbered_dir, &contents).inspect(|path| {
                if let Some(name) = path.file_name() {
                    let _ = write!(diag, "/{}", Path::new(name).display());
                }
            })
        }
    };
    match primary {
        Ok(path) => {
            let _ = writeln!(diag, " - OK");
            tracing::info!(path = %path.display(), "script saved");
            return SavedScript::File(path);
        }
        Err(err) => {
            let _ = writeln!(diag, " - error: {err}");
            tracing::warn!(error = %err, "cannot write script; trying temp dir");
        }
    }

    match write_temp(&target.temp_dir, &contents) {
        Ok(path) => {
            let _ = writeln!(diag, "up: writing: {} - OK", path.display());
            tracing::info!(path = %path.display(), "script saved to temp dir");
            SavedScript::File(path)
        }
        Err(err) => {
            tracing::warn!(error = %err, "cannot write temp script; printing command");
            let _ = writeln!(diag, "up: | {command}");
            SavedScript::Printed
        }
    }
}

fn write_explicit(path: &Path, contents: &str) -> io::Result<PathBuf> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(SCRIPT_MODE)
        .open(path)?;
    finish(file, contents)?;
    Ok(path.to_path_buf())
}

fn write_numbered(dir: &Path, contents: &str) -> io::Result<PathBuf> {
    for n in 1..=MAX_NUMBERED {
        let path = dir.join(format!("up{n}.sh"));
        let opened = OpenOptions::new()
            .write(true)
            .create_new(true)
            .mode(SCRIPT_MODE)
            .open(&path);
        match opened {
            Ok(file) => {
                finish(file, contents)?;
                return Ok(path);
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(err),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("up1.sh-up{MAX_NUMBERED}.sh already exist"),
    ))
}

fn write_temp(dir: &Path, contents: &str) -> io::Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("up-")
        .suffix(".sh")
        .tempfile_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;
    let (_, path) = file.keep().map_err(|err| err.error)?;
    fs::set_permissions(&path, fs::Permissions::from_mode(SCRIPT_MODE))?;
    Ok(path)
}

fn finish(mut file: File, contents: &str) -> io::Result<()> {
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contents_have_shebang_and_trailing_newline() {
        assert_eq!(
            script_contents(Path::new("/bin/bash"), "grep foo | wc -l"),
            "#!/bin/bash\ngrep foo | wc -l\n"
        );
    }
}
