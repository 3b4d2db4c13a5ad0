//! Rotate command feature.
//!
//! Builds the runtime config from flags, runs the rotation, records it in the
//! activity log and reports it.

use crate::activity_log::{ActivityEntry, ActivityLog};
use crate::cli::Cli;
use crate::config::RotateConfig;
use crate::output::{self, OutputMode};
use crate::rotator::Rotator;
use anyhow::Context;

pub(crate) fn handle_rotate(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        source,
        target,
        marker,
        retries,
        retry_delay_ms,
        log_file,
        json,
        quiet,
        verbose,
    } = cli;

    // JSON goes to stdout on its own
    let output_mode = if json {
        OutputMode::Quiet
    } else {
        OutputMode::from_flags(quiet, verbose)
    };

    let mut config = RotateConfig::default();
    config.apply_cli_overrides(marker, retries, retry_delay_ms);
    config.validate()?;

    let activity_log = log_file
        .map(ActivityLog::at)
        .or_else(ActivityLog::default_location);

    let rotator = Rotator::new(config, output_mode);
    let report = match rotator.rotate(&source, &target) {
        Ok(report) => report,
        Err(e) => {
            if let Some(log) = &activity_log {
                let _ = log.record(&ActivityEntry::failed(&source, &target, &e));
            }
            return Err(e).with_context(|| format!("Rotation of {} failed", source.display()));
        }
    };

    if let Some(log) = &activity_log {
        let _ = log.record(&ActivityEntry::rotated(&report));
    }

    if json {
        output::print_json(&report)?;
    } else {
        output::print_human(&report, output_mode);
    }

    Ok(())
}
