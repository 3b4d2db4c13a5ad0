//! Human and JSON rendering of rotation progress and results.

use crate::rotator::RotationReport;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl OutputMode {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            OutputMode::Quiet
        } else if verbose {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }
}

/// Step notices printed while a rotation runs.
#[derive(Debug, Clone, Copy)]
pub enum Notice<'a> {
    Renaming { source: &'a Path, target: &'a Path },
    Creating { source: &'a Path },
    Done,
}

impl Notice<'_> {
    pub fn message(&self) -> String {
        match self {
            Notice::Renaming { source, target } => {
                format!("rename {} to {}", source.display(), target.display())
            }
            Notice::Creating { source } => format!("create new file {}", source.display()),
            Notice::Done => "over".to_string(),
        }
    }
}

pub fn print_notice(notice: &Notice<'_>, mode: OutputMode) {
    if mode == OutputMode::Quiet {
        return;
    }
    match notice {
        Notice::Done => println!("{} {}", Theme::success("✓"), notice.message()),
        _ => println!("{} {}", Theme::primary("→"), notice.message()),
    }
}

/// Extra detail shown after a run in verbose mode
pub fn print_human(report: &RotationReport, mode: OutputMode) {
    if mode != OutputMode::Verbose {
        return;
    }
    println!(
        "  {} {} via {}",
        Theme::muted("moved"),
        Theme::secondary(&bytesize::to_string(report.bytes_moved, true)),
        report.move_method.label()
    );
    println!(
        "  {} {} bytes in {} open attempt(s)",
        Theme::muted("marker"),
        report.marker_bytes,
        report.open_attempts
    );
}

pub fn print_json(report: &RotationReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_mode_from_flags() {
        assert_eq!(OutputMode::from_flags(true, true), OutputMode::Quiet);
        assert_eq!(OutputMode::from_flags(false, true), OutputMode::Verbose);
        assert_eq!(OutputMode::from_flags(false, false), OutputMode::Normal);
    }

    #[test]
    fn test_notice_messages() {
        let source = Path::new("/var/log/app.log");
        let target = Path::new("/var/log/app.log.1");
        assert_eq!(
            Notice::Renaming { source, target }.message(),
            "rename /var/log/app.log to /var/log/app.log.1"
        );
        assert_eq!(
            Notice::Creating { source }.message(),
            "create new file /var/log/app.log"
        );
        assert_eq!(Notice::Done.message(), "over");
    }
}
