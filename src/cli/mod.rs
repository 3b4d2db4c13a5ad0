//! Command-line interface.

pub mod commands;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "logroll",
    version,
    about = "Move a log file aside and recreate it with a rollover marker"
)]
pub struct Cli {
    /// Log file to rotate
    pub source: PathBuf,

    /// Destination for the rotated file (replaced if it exists)
    pub target: PathBuf,

    /// Text written into the recreated file
    #[arg(long, value_name = "TEXT")]
    pub marker: Option<String>,

    /// Attempts to reopen the source path before giving up
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,

    /// Initial delay between reopen attempts, doubled after each failure
    #[arg(long, value_name = "MS")]
    pub retry_delay_ms: Option<u64>,

    /// Activity log to append to (defaults to the local data directory)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the rotation report as JSON
    #[arg(long)]
    pub json: bool,

    /// Suppress progress output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show move method and byte counts
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        commands::rotate_command::handle_rotate(self)
    }
}
