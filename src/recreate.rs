//! Recreating the log file at its original path.
//!
//! The file is opened in append mode. Opening tolerates the parent directory
//! having been removed in the meantime and retries transient failures under a
//! bounded [`RecreatePolicy`].

use crate::config::RecreatePolicy;
use crate::error::{Result, RotationError};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::thread;

const WRITE_BUFFER_SIZE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecreateOutcome {
    /// Number of open calls made, successful one included.
    pub attempts: u32,
    pub bytes_written: u64,
}

/// Open `path` for appending and write `marker` into it.
pub fn recreate_with_marker(
    path: &Path,
    marker: &str,
    policy: &RecreatePolicy,
) -> Result<RecreateOutcome> {
    let (file, attempts) = open_with_retry(path, policy, open_append)?;
    let bytes_written = write_marker(file, path, marker)?;
    Ok(RecreateOutcome {
        attempts,
        bytes_written,
    })
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Errors worth another attempt.
pub fn is_transient(err: &io::Error) -> bool {
    match err.kind() {
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => true,
        // Sharing violations surface as PermissionDenied on Windows.
        io::ErrorKind::PermissionDenied => cfg!(windows),
        _ => false,
    }
}

/// Open `path` using `open`, returning the handle and the number of calls made.
///
/// A `NotFound` failure recreates the parent directory once. Transient
/// failures are retried until `policy.max_attempts` of them have occurred.
pub fn open_with_retry<F>(path: &Path, policy: &RecreatePolicy, mut open: F) -> Result<(File, u32)>
where
    F: FnMut(&Path) -> io::Result<File>,
{
    let mut attempts = 0u32;
    let mut transient_failures = 0u32;
    let mut parent_recreated = false;

    loop {
        attempts += 1;
        let err = match open(path) {
            Ok(file) => return Ok((file, attempts)),
            Err(e) => e,
        };

        if err.kind() == io::ErrorKind::NotFound && !parent_recreated {
            parent_recreated = true;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| RotationError::RecreateFailed {
                    path: path.to_path_buf(),
                    attempts,
                    source: e,
                })?;
            }
            continue;
        }

        if is_transient(&err) {
            transient_failures += 1;
            if transient_failures < policy.max_attempts {
                thread::sleep(policy.delay_after(transient_failures));
                continue;
            }
        }

        return Err(RotationError::RecreateFailed {
            path: path.to_path_buf(),
            attempts,
            source: err,
        });
    }
}

/// Write `marker` through a buffered writer, then flush and sync.
///
/// The handle is released when this returns, on success or failure.
pub fn write_marker(file: File, path: &Path, marker: &str) -> Result<u64> {
    let write_failed = |e: io::Error| RotationError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);
    writer.write_all(marker.as_bytes()).map_err(write_failed)?;
    let file = writer
        .into_inner()
        .map_err(|e| write_failed(e.into_error()))?;
    file.sync_all().map_err(write_failed)?;

    Ok(marker.len() as u64)
}
