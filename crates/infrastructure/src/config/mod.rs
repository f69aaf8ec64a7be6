//! Application configuration
//!
//! Sources, later ones winning: built-in defaults, an optional TOML file
//! (`config.toml` in the working directory unless a path is given), then
//! environment variables such as `TNSW__SENSOR__API_KEY`.

mod runtime;
mod sensor;

use std::path::Path;

use integration_transport_nsw::TransportNswConfig;
use serde::{Deserialize, Serialize};

pub use runtime::{LoggingConfig, PollerConfig};
pub use sensor::SensorConfig;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "TNSW";

/// Separator between prefix, section and key in environment variables
pub const ENV_SEPARATOR: &str = "__";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Sensor configuration
    #[serde(default)]
    pub sensor: SensorConfig,

    /// Transport NSW client configuration
    #[serde(default)]
    pub transport_nsw: TransportNswConfig,

    /// Polling configuration
    #[serde(default)]
    pub poller: PollerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (required when given) and
    /// environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, or a source cannot be read
    /// or deserialized.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::build(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
    }

    fn build(
        path: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?;
        config.try_deserialize()
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        self.sensor.validate()?;
        self.transport_nsw
            .validate()
            .map_err(|e| format!("transport_nsw: {e}"))?;

        if self.poller.scan_interval_secs == 0 {
            return Err("poller.scan_interval_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use secrecy::{ExposeSecret, SecretString};

    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            sensor: SensorConfig {
                stop_id: "209516".to_string(),
                api_key: SecretString::from("KEY"),
                ..SensorConfig::default()
            },
            ..AppConfig::default()
        }
    }

    fn no_env() -> config::Environment {
        AppConfig::environment().source(Some(config::Map::new()))
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.sensor.name, "Next Bus");
        assert!(config.sensor.route.is_empty());
        assert_eq!(
            config.transport_nsw.base_url,
            "https://api.transport.nsw.gov.au"
        );
        assert_eq!(config.transport_nsw.timeout_secs, 10);
        assert!(config.transport_nsw.vehicle_positions);
        assert_eq!(config.poller.scan_interval_secs, 60);
        assert_eq!(config.logging.filter, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_missing_stop_id_rejected() {
        let mut config = valid_config();
        config.sensor.stop_id = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("stop_id"));
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let mut config = valid_config();
        config.sensor.api_key = SecretString::from("");
        let err = config.validate().unwrap_err();
        assert!(err.contains("api_key"));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = valid_config();
        config.poller.scan_interval_secs = 0;
        assert!(config.validate().unwrap_err().contains("scan_interval_secs"));
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let mut config = valid_config();
        config.transport_nsw.base_url = String::new();
        assert!(config.validate().unwrap_err().starts_with("transport_nsw"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = valid_config();
        config.sensor.api_key = SecretString::from("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_serialize_skips_api_key() {
        let json = serde_json::to_string(&valid_config()).unwrap();
        assert!(!json.contains("api_key"));
        assert!(json.contains("209516"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"sensor": {"stop_id": "2000338", "route": "333"}}"#).unwrap();
        assert_eq!(config.sensor.stop_id, "2000338");
        assert_eq!(config.sensor.route, "333");
        assert_eq!(config.sensor.name, "Next Bus");
        assert_eq!(config.poller.scan_interval_secs, 60);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sensor.toml");
        fs::write(
            &path,
            r#"
[sensor]
stop_id = "209516"
api_key = "FILE_KEY"
name = "Manly bus"
destination = "Manly"

[transport_nsw]
vehicle_positions = false

[poller]
scan_interval_secs = 30
"#,
        )
        .unwrap();

        let config = AppConfig::build(Some(&path), no_env()).unwrap();
        assert_eq!(config.sensor.stop_id, "209516");
        assert_eq!(config.sensor.api_key.expose_secret(), "FILE_KEY");
        assert_eq!(config.sensor.name, "Manly bus");
        assert_eq!(config.sensor.destination, "Manly");
        assert!(!config.transport_nsw.vehicle_positions);
        assert_eq!(config.poller.scan_interval_secs, 30);
        assert_eq!(config.logging.filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(AppConfig::build(Some(&path), no_env()).is_err());
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sensor.toml");
        fs::write(&path, "[sensor]\nstop_id = \"209516\"\napi_key = \"FILE_KEY\"\n").unwrap();

        let mut vars = config::Map::new();
        vars.insert("TNSW__SENSOR__API_KEY".to_string(), "ENV_KEY".to_string());
        vars.insert("TNSW__POLLER__SCAN_INTERVAL_SECS".to_string(), "15".to_string());
        let env = AppConfig::environment().source(Some(vars));

        let config = AppConfig::build(Some(&path), env).unwrap();
        assert_eq!(config.sensor.api_key.expose_secret(), "ENV_KEY");
        assert_eq!(config.sensor.stop_id, "209516");
        assert_eq!(config.poller.scan_interval_secs, 15);
    }
}
