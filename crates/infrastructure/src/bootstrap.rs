//! Wiring: turn an [`AppConfig`] into a ready-to-poll sensor

use std::sync::Arc;

use application::{ApplicationError, DepartureFetcher, DeparturePort, DepartureSensor};
use domain::StopId;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::{adapters::TransportNswAdapter, config::AppConfig};

/// Build the Transport NSW backed departure port
///
/// # Errors
///
/// Returns an error if the client configuration is invalid.
pub fn build_adapter(config: &AppConfig) -> Result<Arc<dyn DeparturePort>, ApplicationError> {
    let adapter = TransportNswAdapter::from_config(&config.transport_nsw)?;
    Ok(Arc::new(adapter))
}

/// Build a sensor for the configured stop on top of `port`
///
/// # Errors
///
/// Returns an error if the configuration does not validate.
pub fn build_sensor(
    config: &AppConfig,
    port: Arc<dyn DeparturePort>,
) -> Result<DepartureSensor, ApplicationError> {
    config.validate().map_err(ApplicationError::Configuration)?;

    let sensor = &config.sensor;
    let stop_id = StopId::new(&sensor.stop_id)?;
    let api_key = SecretString::from(sensor.api_key.expose_secret().to_string());

    let fetcher = DepartureFetcher::new(
        port,
        stop_id.clone(),
        sensor.route.clone(),
        sensor.destination.clone(),
        api_key,
    );

    info!(
        stop_id = %stop_id,
        route = %sensor.route,
        destination = %sensor.destination,
        "Sensor configured"
    );
    Ok(DepartureSensor::new(fetcher, stop_id, sensor.name.clone()))
}

#[cfg(test)]
mod tests {
    use application::{
        Departure, DepartureQuery, SensorState, UNIT_OF_MEASUREMENT, VehiclePosition,
    };
    use async_trait::async_trait;

    use super::*;
    use crate::config::SensorConfig;

    struct UnreachablePort;

    #[async_trait]
    impl DeparturePort for UnreachablePort {
        async fn get_departures(
            &self,
            _query: &DepartureQuery,
            _api_key: &SecretString,
        ) -> Result<Option<Departure>, ApplicationError> {
            Err(ApplicationError::ExternalService("offline".to_string()))
        }

        async fn get_vehicle_position(
            &self,
            _departure: &Departure,
            _api_key: &SecretString,
        ) -> Result<VehiclePosition, ApplicationError> {
            Ok(VehiclePosition::default())
        }
    }

    fn config() -> AppConfig {
        AppConfig {
            sensor: SensorConfig {
                stop_id: " 209516 ".to_string(),
                api_key: SecretString::from("KEY"),
                name: "Manly bus".to_string(),
                route: "199".to_string(),
                ..SensorConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn builds_sensor_from_config() {
        let sensor = build_sensor(&config(), Arc::new(UnreachablePort)).unwrap();
        assert_eq!(sensor.name(), "Manly bus");
        assert_eq!(sensor.stop_id().as_str(), "209516");
        assert_eq!(sensor.state(), SensorState::Unknown);
        assert_eq!(sensor.unit_of_measurement(), UNIT_OF_MEASUREMENT);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = config();
        config.sensor.api_key = SecretString::from("");
        let err = build_sensor(&config, Arc::new(UnreachablePort)).unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn builds_http_adapter() {
        assert!(build_adapter(&config()).is_ok());
    }

    #[tokio::test]
    async fn failed_update_keeps_unknown_state() {
        let mut sensor = build_sensor(&config(), Arc::new(UnreachablePort)).unwrap();
        assert!(sensor.update().await.is_err());
        assert_eq!(sensor.state(), SensorState::Unknown);
        assert!(sensor.attributes().is_none());
    }
}
