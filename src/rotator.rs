//! The rotation itself: move the live file aside, then recreate it with a marker.

use crate::config::RotateConfig;
use crate::error::Result;
use crate::mover::{self, MoveMethod};
use crate::output::{self, Notice, OutputMode};
use crate::recreate;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Summary of a completed rotation
#[derive(Debug, Clone, Serialize)]
pub struct RotationReport {
    pub source: PathBuf,
    pub target: PathBuf,
    pub move_method: MoveMethod,
    pub bytes_moved: u64,
    pub marker_bytes: u64,
    pub open_attempts: u32,
    pub rotated_at: DateTime<Local>,
}

pub struct Rotator {
    config: RotateConfig,
    output_mode: OutputMode,
}

impl Rotator {
    pub fn new(config: RotateConfig, output_mode: OutputMode) -> Self {
        Self {
            config,
            output_mode,
        }
    }

    /// Move `source` to `target` and recreate `source` holding the marker.
    ///
    /// Nothing is written at `source` unless the move succeeded.
    pub fn rotate(&self, source: &Path, target: &Path) -> Result<RotationReport> {
        output::print_notice(&Notice::Renaming { source, target }, self.output_mode);
        let moved = mover::move_file(source, target)?;

        output::print_notice(&Notice::Creating { source }, self.output_mode);
        let recreated =
            recreate::recreate_with_marker(source, &self.config.marker, &self.config.recreate)?;

        output::print_notice(&Notice::Done, self.output_mode);

        Ok(RotationReport {
            source: source.to_path_buf(),
            target: target.to_path_buf(),
            move_method: moved.method,
            bytes_moved: moved.bytes,
            marker_bytes: recreated.bytes_written,
            open_attempts: recreated.attempts,
            rotated_at: Local::now(),
        })
    }
}

/// Rotate with the default marker and retry policy, printing notices.
pub fn rotate(source: &Path, target: &Path) -> Result<RotationReport> {
    Rotator::new(RotateConfig::default(), OutputMode::Normal).rotate(source, target)
}
