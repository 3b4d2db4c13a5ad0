//! Runtime settings for a rotation.
//!
//! There is no config file: values come from command-line flags, falling back
//! to the defaults below.

use anyhow::{bail, Result};
use std::time::Duration;

pub const DEFAULT_MARKER: &str = "logback rolling over";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 20;
const MAX_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Retry policy for reopening the source path after the move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecreatePolicy {
    /// Total open attempts, including the first one.
    pub max_attempts: u32,
    pub initial_delay: Duration,
}

impl Default for RecreatePolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

impl RecreatePolicy {
    /// Delay to wait after the given failed attempt (1-based). Doubles each time.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(16);
        self.initial_delay
            .saturating_mul(1u32 << shift)
            .min(MAX_RETRY_DELAY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotateConfig {
    pub marker: String,
    pub recreate: RecreatePolicy,
}

impl Default for RotateConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            recreate: RecreatePolicy::default(),
        }
    }
}

impl RotateConfig {
    /// Apply CLI overrides on top of the defaults
    pub fn apply_cli_overrides(
        &mut self,
        marker: Option<String>,
        retries: Option<u32>,
        retry_delay_ms: Option<u64>,
    ) {
        if let Some(marker) = marker {
            self.marker = marker;
        }
        if let Some(retries) = retries {
            self.recreate.max_attempts = retries;
        }
        if let Some(ms) = retry_delay_ms {
            self.recreate.initial_delay = Duration::from_millis(ms);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.marker.is_empty() {
            bail!("Marker text must not be empty");
        }
        if self.recreate.max_attempts == 0 {
            bail!("--retries must be at least 1");
        }
        Ok(())
    }
}
