//! Departure sensor
//!
//! Bridges the fetcher to a polled sensor: a display name, a numeric state
//! (minutes until the next departure), a unit, an icon chosen by vehicle
//! mode, and a fixed set of attributes.

use std::{fmt, time::Duration};

use domain::{DepartureInfo, StopId, UNKNOWN_ICON, VehicleMode, not_available};
use serde::{Serialize, Serializer};
use tracing::{info, instrument};

use crate::{error::ApplicationError, services::DepartureFetcher};

/// Unit of the sensor state
pub const UNIT_OF_MEASUREMENT: &str = "min";

/// Attribution attached to every attribute set
pub const ATTRIBUTION: &str = "Data provided by Transport NSW";

/// Name used when none is configured
pub const DEFAULT_NAME: &str = "Next Bus";

/// How often the sensor should be polled
pub const SCAN_INTERVAL: Duration = Duration::from_secs(60);

/// Sensor state: minutes until due, or unknown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SensorState {
    /// No due time known yet
    #[default]
    Unknown,
    /// Minutes until the next departure
    Minutes(i64),
}

impl SensorState {
    /// Minutes until due, if known
    pub const fn minutes(&self) -> Option<i64> {
        match self {
            Self::Unknown => None,
            Self::Minutes(m) => Some(*m),
        }
    }
}

impl From<Option<i64>> for SensorState {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::Unknown, Self::Minutes)
    }
}

impl fmt::Display for SensorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str(not_available::NOT_AVAILABLE),
            Self::Minutes(m) => write!(f, "{m}"),
        }
    }
}

impl Serialize for SensorState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        not_available::serialize(&self.minutes(), serializer)
    }
}

/// Extended attributes published alongside the state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorAttributes {
    /// Minutes until due
    #[serde(serialize_with = "not_available::serialize")]
    pub due: Option<i64>,
    /// Monitored stop
    pub stop_id: String,
    /// Route number
    #[serde(serialize_with = "not_available::serialize")]
    pub route: Option<String>,
    /// Minutes late
    #[serde(serialize_with = "not_available::serialize")]
    pub delay: Option<i64>,
    /// Live prediction flag
    #[serde(serialize_with = "not_available::serialize")]
    pub real_time: Option<bool>,
    /// Destination name
    #[serde(serialize_with = "not_available::serialize")]
    pub destination: Option<String>,
    /// Vehicle mode
    #[serde(serialize_with = "not_available::serialize")]
    pub mode: Option<VehicleMode>,
    /// Stop latitude
    #[serde(serialize_with = "not_available::serialize")]
    pub stop_latitude: Option<f64>,
    /// Stop longitude
    #[serde(serialize_with = "not_available::serialize")]
    pub stop_longitude: Option<f64>,
    /// Vehicle latitude
    #[serde(serialize_with = "not_available::serialize")]
    pub bus_latitude: Option<f64>,
    /// Vehicle longitude
    #[serde(serialize_with = "not_available::serialize")]
    pub bus_longitude: Option<f64>,
    /// Data attribution
    pub attribution: &'static str,
}

impl SensorAttributes {
    fn new(info: &DepartureInfo, stop_id: &StopId) -> Self {
        Self {
            due: info.due_in_minutes,
            stop_id: stop_id.to_string(),
            route: info.route.clone(),
            delay: info.delay_minutes,
            real_time: info.real_time,
            destination: info.destination.clone(),
            mode: info.mode,
            stop_latitude: info.stop_location.map(|l| l.latitude()),
            stop_longitude: info.stop_location.map(|l| l.longitude()),
            bus_latitude: info.vehicle_location.map(|l| l.latitude()),
            bus_longitude: info.vehicle_location.map(|l| l.longitude()),
            attribution: ATTRIBUTION,
        }
    }
}

/// Everything a host needs to render the sensor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSnapshot {
    /// Display name
    pub name: String,
    /// Current state
    pub state: SensorState,
    /// Unit of the state
    pub unit_of_measurement: &'static str,
    /// Icon id
    pub icon: &'static str,
    /// Attributes, absent until the first successful poll
    pub attributes: Option<SensorAttributes>,
}

/// Polled sensor reporting the next departure at a stop
#[derive(Debug)]
pub struct DepartureSensor {
    fetcher: DepartureFetcher,
    stop_id: StopId,
    name: String,
    state: SensorState,
    icon: &'static str,
    times: Option<DepartureInfo>,
}

impl DepartureSensor {
    /// Create a sensor around an exclusively owned fetcher
    pub fn new(fetcher: DepartureFetcher, stop_id: StopId, name: impl Into<String>) -> Self {
        Self {
            fetcher,
            stop_id,
            name: name.into(),
            state: SensorState::Unknown,
            icon: UNKNOWN_ICON,
            times: None,
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Monitored stop
    pub const fn stop_id(&self) -> &StopId {
        &self.stop_id
    }

    /// Last seen minutes until due
    pub const fn state(&self) -> SensorState {
        self.state
    }

    /// Unit of the state
    pub const fn unit_of_measurement(&self) -> &'static str {
        UNIT_OF_MEASUREMENT
    }

    /// Icon for the last seen vehicle mode
    pub const fn icon(&self) -> &'static str {
        self.icon
    }

    /// Attributes of the last successful poll
    pub fn attributes(&self) -> Option<SensorAttributes> {
        self.times
            .as_ref()
            .map(|times| SensorAttributes::new(times, &self.stop_id))
    }

    /// Current state, icon and attributes in one value
    pub fn snapshot(&self) -> SensorSnapshot {
        SensorSnapshot {
            name: self.name.clone(),
            state: self.state,
            unit_of_measurement: UNIT_OF_MEASUREMENT,
            icon: self.icon,
            attributes: self.attributes(),
        }
    }

    /// Refresh from the transit API
    ///
    /// On error the previous state, icon and attributes stay in place.
    #[instrument(skip(self), fields(sensor = %self.name))]
    pub async fn update(&mut self) -> Result<(), ApplicationError> {
        self.fetcher.update().await?;

        let times = self.fetcher.info().clone();
        self.state = times.due_in_minutes.into();
        self.icon = times.icon();
        info!(state = %self.state, icon = self.icon, "Sensor updated");
        self.times = Some(times);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use domain::GeoLocation;
    use secrecy::SecretString;

    use super::*;
    use crate::ports::{Departure, MockDeparturePort, VehiclePosition};

    fn departure(due: i64, mode: Option<VehicleMode>) -> Departure {
        Departure {
            route: "199".to_string(),
            due_in_minutes: due,
            delay_minutes: 0,
            real_time: true,
            destination: "Manly".to_string(),
            mode,
            stop_location: Some(GeoLocation::new_unchecked(-33.7487, 151.2869)),
            realtime_trip_id: None,
        }
    }

    fn sensor(port: MockDeparturePort) -> DepartureSensor {
        let stop_id = StopId::new("209516").unwrap();
        let fetcher = DepartureFetcher::new(
            Arc::new(port),
            stop_id.clone(),
            "",
            "",
            SecretString::from("KEY"),
        );
        DepartureSensor::new(fetcher, stop_id, DEFAULT_NAME)
    }

    fn port_returning(due: i64, mode: Option<VehicleMode>) -> MockDeparturePort {
        let mut port = MockDeparturePort::new();
        port.expect_get_departures()
            .returning(move |_, _| Ok(Some(departure(due, mode))));
        port.expect_get_vehicle_position()
            .returning(|_, _| Ok(VehiclePosition::default()));
        port
    }

    #[test]
    fn initial_state_is_unknown() {
        let sensor = sensor(MockDeparturePort::new());
        assert_eq!(sensor.name(), "Next Bus");
        assert_eq!(sensor.state(), SensorState::Unknown);
        assert_eq!(sensor.state().to_string(), "n/a");
        assert_eq!(sensor.unit_of_measurement(), "min");
        assert_eq!(sensor.icon(), "mdi:clock");
        assert!(sensor.attributes().is_none());
    }

    #[tokio::test]
    async fn update_sets_state_and_icon() {
        let mut sensor = sensor(port_returning(5, Some(VehicleMode::Bus)));
        sensor.update().await.unwrap();

        assert_eq!(sensor.state(), SensorState::Minutes(5));
        assert_eq!(sensor.icon(), "mdi:bus");
    }

    #[tokio::test]
    async fn unknown_mode_uses_fallback_icon() {
        let mut sensor = sensor(port_returning(3, None));
        sensor.update().await.unwrap();

        assert_eq!(sensor.state(), SensorState::Minutes(3));
        assert_eq!(sensor.icon(), "mdi:clock");
    }

    #[tokio::test]
    async fn attributes_after_update() {
        let mut sensor = sensor(port_returning(7, Some(VehicleMode::Ferry)));
        sensor.update().await.unwrap();

        let attrs = sensor.attributes().unwrap();
        assert_eq!(attrs.due, Some(7));
        assert_eq!(attrs.stop_id, "209516");
        assert_eq!(attrs.route.as_deref(), Some("199"));
        assert_eq!(attrs.delay, Some(0));
        assert_eq!(attrs.real_time, Some(true));
        assert_eq!(attrs.destination.as_deref(), Some("Manly"));
        assert_eq!(attrs.mode, Some(VehicleMode::Ferry));
        assert!(attrs.bus_latitude.is_none());
        assert_eq!(attrs.attribution, "Data provided by Transport NSW");

        let json = serde_json::to_value(&attrs).unwrap();
        assert_eq!(json["due"], 7);
        assert_eq!(json["mode"], "Ferry");
        assert_eq!(json["bus_latitude"], "n/a");
        assert_eq!(json["bus_longitude"], "n/a");
        assert!((json["stop_latitude"].as_f64().unwrap() + 33.7487).abs() < 1e-9);
    }

    #[tokio::test]
    async fn failed_update_keeps_unknown_state() {
        let mut port = MockDeparturePort::new();
        port.expect_get_departures()
            .returning(|_, _| Err(ApplicationError::ExternalService("down".into())));

        let mut sensor = sensor(port);
        assert!(sensor.update().await.is_err());
        assert_eq!(sensor.state(), SensorState::Unknown);
        assert!(sensor.attributes().is_none());
    }

    #[tokio::test]
    async fn failed_update_keeps_previous_value() {
        let mut port = MockDeparturePort::new();
        let mut calls = 0;
        port.expect_get_departures().returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Ok(Some(departure(4, Some(VehicleMode::Train))))
            } else {
                Err(ApplicationError::ExternalService("down".into()))
            }
        });
        port.expect_get_vehicle_position()
            .returning(|_, _| Ok(VehiclePosition::default()));

        let mut sensor = sensor(port);
        sensor.update().await.unwrap();
        let before = sensor.snapshot();

        assert!(sensor.update().await.is_err());
        assert_eq!(sensor.snapshot(), before);
        assert_eq!(sensor.state(), SensorState::Minutes(4));
        assert_eq!(sensor.icon(), "mdi:train");
    }

    #[tokio::test]
    async fn empty_board_resets_state_and_icon() {
        let mut port = MockDeparturePort::new();
        let mut calls = 0;
        port.expect_get_departures().returning(move |_, _| {
            calls += 1;
            Ok((calls == 1).then(|| departure(5, Some(VehicleMode::Bus))))
        });
        port.expect_get_vehicle_position()
            .returning(|_, _| Ok(VehiclePosition::default()));

        let mut sensor = sensor(port);
        sensor.update().await.unwrap();
        assert_eq!(sensor.state(), SensorState::Minutes(5));
        assert_eq!(sensor.icon(), "mdi:bus");

        sensor.update().await.unwrap();
        assert_eq!(sensor.state(), SensorState::Unknown);
        assert_eq!(sensor.icon(), "mdi:clock");

        let json = serde_json::to_value(sensor.attributes().unwrap()).unwrap();
        assert_eq!(json["due"], "n/a");
        assert_eq!(json["mode"], "n/a");
        assert_eq!(json["stop_id"], "209516");
    }

    #[tokio::test]
    async fn repeated_updates_are_idempotent() {
        let mut sensor = sensor(port_returning(9, Some(VehicleMode::Lightrail)));
        sensor.update().await.unwrap();
        let first = sensor.snapshot();
        sensor.update().await.unwrap();
        assert_eq!(sensor.snapshot(), first);
    }

    #[test]
    fn snapshot_serializes_unknown_state_as_sentinel() {
        let sensor = sensor(MockDeparturePort::new());
        let json = serde_json::to_value(sensor.snapshot()).unwrap();
        assert_eq!(json["name"], "Next Bus");
        assert_eq!(json["state"], "n/a");
        assert_eq!(json["unit_of_measurement"], "min");
        assert_eq!(json["icon"], "mdi:clock");
        assert!(json["attributes"].is_null());
    }

    #[test]
    fn state_conversions() {
        assert_eq!(SensorState::from(Some(2)), SensorState::Minutes(2));
        assert_eq!(SensorState::from(None), SensorState::Unknown);
        assert_eq!(SensorState::Minutes(2).to_string(), "2");
        assert_eq!(SensorState::Minutes(2).minutes(), Some(2));
    }
}
