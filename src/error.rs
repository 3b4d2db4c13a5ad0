//! Errors raised while rotating a log file.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RotationError>;

#[derive(Debug, Error)]
pub enum RotationError {
    #[error("source file not found or not accessible: {}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: Option<io::Error>,
    },

    #[error("source and target are the same file: {}", path.display())]
    SamePath { path: PathBuf },

    #[error("failed to move {} to {}", from.display(), to.display())]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to recreate {} after {attempts} attempt(s)", path.display())]
    RecreateFailed {
        path: PathBuf,
        attempts: u32,
        #[source]
        source: io::Error,
    },

    #[error("failed to write marker to {}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RotationError {
    /// Process exit status reported for this error. 2 is left to clap usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            RotationError::SourceNotFound { .. } => 3,
            RotationError::SamePath { .. } => 4,
            RotationError::RenameFailed { .. } => 5,
            RotationError::RecreateFailed { .. } => 6,
            RotationError::WriteFailed { .. } => 7,
        }
    }
}
