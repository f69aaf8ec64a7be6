//! Transport NSW client configuration

use serde::{Deserialize, Serialize};

/// Configuration for the TfNSW Open Data client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportNswConfig {
    /// Base URL of the Open Data API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Look up live vehicle positions for departures (GTFS-realtime)
    #[serde(default = "default_vehicle_positions")]
    pub vehicle_positions: bool,
}

fn default_base_url() -> String {
    "https://api.transport.nsw.gov.au".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_vehicle_positions() -> bool {
    true
}

impl Default for TransportNswConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            vehicle_positions: default_vehicle_positions(),
        }
    }
}

impl TransportNswConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!("base_url must be an http(s) URL: {}", self.base_url));
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
