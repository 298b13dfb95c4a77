//! I/O utility functions

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write content to a file atomically using write-then-rename pattern.
///
/// The content is first written to a sibling `.tmp` file, then renamed over
/// the target path, so readers only ever see the old or the new content.
///
/// ```ignore
/// atomic_write(Path::new("study.yaml"), &yaml_content)?;
/// ```
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = temp_path(path);
    fs::write(&temp_path, content)?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    sibling_path(path, ".tmp")
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    path.with_file_name(name)
}

/// Staging directory used to build the next contents of `dir`
pub fn staging_path(dir: &Path) -> PathBuf {
    sibling_path(dir, ".staging")
}

/// Replace `target` with the directory `staged`.
///
/// The old `target` is renamed to a `.previous` sibling and removed only after
/// `staged` is in place; if that rename fails the old directory is restored.
pub fn replace_dir(staged: &Path, target: &Path) -> io::Result<()> {
    let backup = sibling_path(target, ".previous");
    if backup.exists() {
        fs::remove_dir_all(&backup)?;
    }

    let had_previous = target.exists();
    if had_previous {
        fs::rename(target, &backup)?;
    }
    if let Err(e) = fs::rename(staged, target) {
        if had_previous {
            let _ = fs::rename(&backup, target);
        }
        return Err(e);
    }

    if had_previous && let Err(e) = fs::remove_dir_all(&backup) {
        tracing::warn!(path = %backup.display(), error = %e, "Failed to remove replaced directory");
    }
    Ok(())
}

/// Copy a file into `dest_dir`, creating the directory if needed.
pub fn copy_file_into(src: &Path, dest_dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dest_dir)?;
    let name = src.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "source path has no file name")
    })?;
    let dest = dest_dir.join(name);
    fs::copy(src, &dest)?;
    Ok(dest)
}
