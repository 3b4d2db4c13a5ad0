//! Moving the live log file to its rotated name.
//!
//! A plain rename is used whenever source and target share a volume. Moves
//! across volumes fall back to copying the bytes and deleting the source once
//! the copy has been synced and its length checked.

use crate::error::{Result, RotationError};
use serde::Serialize;
use std::fs::{self, File};
use std::io;
use std::path::Path;

/// How the source ended up at the target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveMethod {
    Renamed,
    CopiedAcrossVolumes,
}

impl MoveMethod {
    pub fn label(&self) -> &'static str {
        match self {
            MoveMethod::Renamed => "rename",
            MoveMethod::CopiedAcrossVolumes => "copy + delete",
        }
    }
}

/// Outcome of a successful move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub method: MoveMethod,
    pub bytes: u64,
}

/// True when a rename failed only because the paths are on different volumes.
pub fn is_cross_device(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices
}

/// Move `source` to `target`, replacing any existing file at `target`.
pub fn move_file(source: &Path, target: &Path) -> Result<MoveOutcome> {
    move_file_with(source, target, |from, to| fs::rename(from, to))
}

/// Same as [`move_file`] with the rename primitive supplied by the caller.
pub fn move_file_with<F>(source: &Path, target: &Path, rename: F) -> Result<MoveOutcome>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
{
    let metadata = fs::metadata(source).map_err(|e| RotationError::SourceNotFound {
        path: source.to_path_buf(),
        source: Some(e),
    })?;
    if !metadata.is_file() {
        return Err(RotationError::SourceNotFound {
            path: source.to_path_buf(),
            source: None,
        });
    }

    if same_file(source, target) {
        return Err(RotationError::SamePath {
            path: source.to_path_buf(),
        });
    }

    create_missing_parent(target).map_err(|e| rename_failed(source, target, e))?;

    if on_different_volumes(source, target) {
        let bytes = copy_then_delete(source, target)?;
        return Ok(MoveOutcome {
            method: MoveMethod::CopiedAcrossVolumes,
            bytes,
        });
    }

    match rename(source, target) {
        Ok(()) => Ok(MoveOutcome {
            method: MoveMethod::Renamed,
            bytes: metadata.len(),
        }),
        Err(e) if is_cross_device(&e) => {
            let bytes = copy_then_delete(source, target)?;
            Ok(MoveOutcome {
                method: MoveMethod::CopiedAcrossVolumes,
                bytes,
            })
        }
        Err(e) => Err(rename_failed(source, target, e)),
    }
}

/// Copy `source` into `target`, then delete `source`.
///
/// The source is only removed after the target has been synced and holds
/// exactly as many bytes as the source did. If anything fails the partial
/// target is removed and the source is left untouched.
pub fn copy_then_delete(source: &Path, target: &Path) -> Result<u64> {
    copy_then_delete_with(source, target, copy_and_sync)
}

/// Same as [`copy_then_delete`] with the copy step supplied by the caller.
///
/// `copy` must leave the data durable at `target` and return its length.
pub fn copy_then_delete_with<C>(source: &Path, target: &Path, copy: C) -> Result<u64>
where
    C: FnOnce(&Path, &Path) -> io::Result<u64>,
{
    let expected = fs::metadata(source)
        .map_err(|e| RotationError::SourceNotFound {
            path: source.to_path_buf(),
            source: Some(e),
        })?
        .len();

    let copied = match copy(source, target) {
        Ok(copied) => copied,
        Err(e) => {
            let _ = fs::remove_file(target);
            return Err(rename_failed(source, target, e));
        }
    };

    if copied != expected {
        let _ = fs::remove_file(target);
        return Err(rename_failed(
            source,
            target,
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("copied {} of {} bytes", copied, expected),
            ),
        ));
    }

    if let Err(e) = fs::remove_file(source) {
        // Keep a single copy of the data.
        let _ = fs::remove_file(target);
        return Err(rename_failed(source, target, e));
    }

    Ok(copied)
}

fn copy_and_sync(source: &Path, target: &Path) -> io::Result<u64> {
    fs::copy(source, target)?;
    let file = File::options().write(true).open(target)?;
    file.sync_all()?;
    Ok(file.metadata()?.len())
}

fn create_missing_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

/// Both paths resolve to one inode, hard links included.
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(unix)]
fn on_different_volumes(source: &Path, target: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    let target_dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (fs::metadata(source), fs::metadata(target_dir)) {
        (Ok(src), Ok(dir)) => src.dev() != dir.dev(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn on_different_volumes(_source: &Path, _target: &Path) -> bool {
    // Detected from the rename error instead.
    false
}

fn rename_failed(source: &Path, target: &Path, source_err: io::Error) -> RotationError {
    RotationError::RenameFailed {
        from: source.to_path_buf(),
        to: target.to_path_buf(),
        source: source_err,
    }
}
