//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default interval between sweeper runs, in milliseconds.
const DEFAULT_CLEANUP_INTERVAL_MS: u64 = 60_000;

/// Cache construction parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interval between background purges of expired entries.
    /// `Duration::ZERO` disables the sweeper; TTLs are then only enforced on read.
    pub cleanup_interval: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CLEANUP_INTERVAL_MS` - Sweeper interval in milliseconds, `0` disables it (default: 60000)
    pub fn from_env() -> Self {
        let millis = env::var("CLEANUP_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CLEANUP_INTERVAL_MS);

        Self {
            cleanup_interval: Duration::from_millis(millis),
        }
    }

    /// Sets the cleanup interval.
    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cleanup_interval: Duration::from_millis(DEFAULT_CLEANUP_INTERVAL_MS),
        }
    }
}
