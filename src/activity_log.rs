//! Record of past rotations, one JSON object per line.
//!
//! Writing here is best effort: callers ignore the result so a broken log
//! location never fails a rotation.

use crate::error::RotationError;
use crate::mover::MoveMethod;
use crate::rotator::RotationReport;
use chrono::{DateTime, Local};
use directories::ProjectDirs;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const LOG_FILE: &str = "rotation.jsonl";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Rotated,
    Failed,
}

#[derive(Debug, Serialize)]
pub struct ActivityEntry<'a> {
    pub at: DateTime<Local>,
    pub source: &'a Path,
    pub target: &'a Path,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<MoveMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_moved: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> ActivityEntry<'a> {
    pub fn rotated(report: &'a RotationReport) -> Self {
        Self {
            at: report.rotated_at,
            source: &report.source,
            target: &report.target,
            outcome: Outcome::Rotated,
            method: Some(report.move_method),
            bytes_moved: Some(report.bytes_moved),
            open_attempts: Some(report.open_attempts),
            exit_code: None,
            error: None,
        }
    }

    pub fn failed(source: &'a Path, target: &'a Path, err: &RotationError) -> Self {
        Self {
            at: Local::now(),
            source,
            target,
            outcome: Outcome::Failed,
            method: None,
            bytes_moved: None,
            open_attempts: None,
            exit_code: Some(err.exit_code()),
            error: Some(err.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<local data dir>/logroll/logs/rotation.jsonl`, if a home directory is known.
    pub fn default_location() -> Option<Self> {
        let dirs = ProjectDirs::from("", "", "logroll")?;
        Some(Self::at(dirs.data_local_dir().join("logs").join(LOG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self, entry: &ActivityEntry<'_>) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let line = serde_json::to_string(entry)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_records_success_fields() {
        let dir = TempDir::new().unwrap();
        let log = ActivityLog::at(dir.path().join("nested").join("rotation.jsonl"));
        let report = RotationReport {
            source: "/var/log/app.log".into(),
            target: "/var/log/app.log.1".into(),
            move_method: MoveMethod::Renamed,
            bytes_moved: 6,
            marker_bytes: 20,
            open_attempts: 1,
            rotated_at: Local::now(),
        };

        log.record(&ActivityEntry::rotated(&report)).unwrap();

        let lines = read_lines(log.path());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["outcome"], "rotated");
        assert_eq!(lines[0]["source"], "/var/log/app.log");
        assert_eq!(lines[0]["target"], "/var/log/app.log.1");
        assert_eq!(lines[0]["method"], "renamed");
        assert_eq!(lines[0]["bytes_moved"], 6);
        assert!(lines[0].get("error").is_none());
    }

    #[test]
    fn test_appends_failures() {
        let dir = TempDir::new().unwrap();
        let log = ActivityLog::at(dir.path().join("rotation.jsonl"));
        let source = Path::new("/var/log/missing.log");
        let target = Path::new("/var/log/missing.log.1");
        let err = RotationError::SourceNotFound {
            path: source.to_path_buf(),
            source: None,
        };

        log.record(&ActivityEntry::failed(source, target, &err)).unwrap();
        log.record(&ActivityEntry::failed(source, target, &err)).unwrap();

        let lines = read_lines(log.path());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["outcome"], "failed");
        assert_eq!(lines[1]["exit_code"], 3);
        assert!(lines[1]["error"]
            .as_str()
            .unwrap()
            .contains("/var/log/missing.log"));
        assert!(lines[1].get("method").is_none());
    }

    #[test]
    fn test_default_location_ends_with_log_file() {
        if let Some(log) = ActivityLog::default_location() {
            assert!(log.path().ends_with(Path::new("logs").join(LOG_FILE)));
        }
    }
}
