//! Poller and logging configuration

use std::time::Duration;

use application::SCAN_INTERVAL;
use serde::{Deserialize, Serialize};

/// How often the sensor polls the transit API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerConfig {
    /// Seconds between updates
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,
}

const fn default_scan_interval_secs() -> u64 {
    SCAN_INTERVAL.as_secs()
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            scan_interval_secs: default_scan_interval_secs(),
        }
    }
}

impl PollerConfig {
    /// Interval between updates
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}
