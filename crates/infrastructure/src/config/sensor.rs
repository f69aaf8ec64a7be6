//! Sensor configuration: which stop to watch and how to authenticate

use application::DEFAULT_NAME;
use domain::StopId;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for one next-departure sensor
#[derive(Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Stop to monitor
    #[serde(default)]
    pub stop_id: String,

    /// TfNSW Open Data API key (sensitive - uses `SecretString`)
    #[serde(default = "default_api_key", skip_serializing)]
    pub api_key: SecretString,

    /// Display name
    #[serde(default = "default_name")]
    pub name: String,

    /// Only report departures of this route number (empty for any)
    #[serde(default)]
    pub route: String,

    /// Only report departures to this destination (empty for any)
    #[serde(default)]
    pub destination: String,
}

impl std::fmt::Debug for SensorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorConfig")
            .field("stop_id", &self.stop_id)
            .field("api_key", &"[REDACTED]")
            .field("name", &self.name)
            .field("route", &self.route)
            .field("destination", &self.destination)
            .finish()
    }
}

fn default_api_key() -> SecretString {
    SecretString::from(String::new())
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            stop_id: String::new(),
            api_key: default_api_key(),
            name: default_name(),
            route: String::new(),
            destination: String::new(),
        }
    }
}

impl SensorConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the stop id or API key is missing.
    pub fn validate(&self) -> Result<(), String> {
        if self.stop_id.trim().is_empty() {
            return Err("sensor.stop_id must not be empty".to_string());
        }

        StopId::new(&self.stop_id).map_err(|e| format!("sensor.stop_id: {e}"))?;

        if self.api_key.expose_secret().trim().is_empty() {
            return Err("sensor.api_key must not be empty".to_string());
        }

        Ok(())
    }
}
