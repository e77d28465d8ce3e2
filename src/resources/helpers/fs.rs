//! File-system helpers for writing the rewritten configuration.
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ReorderError;

/// Append `suffix` to the final component of `path` without treating it as an
/// extension.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use repo_priority::resources::helpers::fs::append_suffix;
///
/// assert_eq!(
///     append_suffix(Path::new("/etc/pacman.conf"), ".pacnew"),
///     PathBuf::from("/etc/pacman.conf.pacnew")
/// );
/// ```
#[must_use]
pub fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Move an existing file at `path` aside to `<path><suffix>`.
///
/// Earlier backups are kept: when `<path><suffix>` is taken the file goes to
/// the first free `<path><suffix>.<n>` instead. Returns the backup path when a
/// file was moved, `None` when there was nothing to move.
///
/// # Errors
///
/// Returns [`ReorderError::Rotate`] if the rename fails.
pub fn rotate_existing(path: &Path, suffix: &str) -> Result<Option<PathBuf>, ReorderError> {
    if path.symlink_metadata().is_err() {
        return Ok(None);
    }
    let backup = free_backup_path(path, suffix);
    fs::rename(path, &backup).map_err(|source| ReorderError::Rotate {
        from: path.to_path_buf(),
        to: backup.clone(),
        source,
    })?;
    Ok(Some(backup))
}

/// First of `<path><suffix>`, `<path><suffix>.1`, `<path><suffix>.2`, ... that
/// does not exist yet.
fn free_backup_path(path: &Path, suffix: &str) -> PathBuf {
    let first = append_suffix(path, suffix);
    if first.symlink_metadata().is_err() {
        return first;
    }
    (1_u32..)
        .map(|n| append_suffix(path, &format!("{suffix}.{n}")))
        .find(|candidate| candidate.symlink_metadata().is_err())
        .unwrap_or(first)
}

/// Write `content` to `path`, creating or truncating the file.
///
/// # Errors
///
/// Returns [`ReorderError::Write`] if the file cannot be written.
pub fn write_text(path: &Path, content: &str) -> Result<(), ReorderError> {
    fs::write(path, content).map_err(|source| ReorderError::Write {
        path: path.to_path_buf(),
        source,
    })
}
