//! Departure data port
//!
//! Interface to a public transit API that can report the next departure at
//! a stop and the live position of the vehicle serving it. Adapters in the
//! infrastructure layer implement this port.

use async_trait::async_trait;
use domain::{GeoLocation, StopId, VehicleMode};
#[cfg(test)]
use mockall::automock;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// What to ask the transit API for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureQuery {
    /// Stop to monitor
    pub stop_id: StopId,
    /// Route number filter, empty for any route
    pub route: String,
    /// Destination name filter, empty for any destination
    pub destination: String,
}

impl DepartureQuery {
    /// Query for any departure at `stop_id`
    #[must_use]
    pub fn new(stop_id: StopId) -> Self {
        Self {
            stop_id,
            route: String::new(),
            destination: String::new(),
        }
    }

    /// Restrict to a route number
    #[must_use]
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = route.into();
        self
    }

    /// Restrict to a destination name
    #[must_use]
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }
}

/// Next departure as reported by the transit API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Departure {
    /// Route number
    pub route: String,
    /// Minutes until departure
    pub due_in_minutes: i64,
    /// Minutes late (negative when early)
    pub delay_minutes: i64,
    /// Whether the due time is a live prediction
    pub real_time: bool,
    /// Destination name
    pub destination: String,
    /// Vehicle mode
    pub mode: Option<VehicleMode>,
    /// Location of the stop
    pub stop_location: Option<GeoLocation>,
    /// Realtime trip identifier, used for the vehicle position lookup
    pub realtime_trip_id: Option<String>,
}

/// Live position of the vehicle serving a departure
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VehiclePosition {
    /// Vehicle coordinates, `None` when the vehicle is not reporting
    pub location: Option<GeoLocation>,
}

/// Port for departure data
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeparturePort: Send + Sync {
    /// Get the next departure matching the query
    ///
    /// `Ok(None)` when no departure at the stop matches.
    async fn get_departures(
        &self,
        query: &DepartureQuery,
        api_key: &SecretString,
    ) -> Result<Option<Departure>, ApplicationError>;

    /// Get the position of the vehicle serving `departure`
    async fn get_vehicle_position(
        &self,
        departure: &Departure,
        api_key: &SecretString,
    ) -> Result<VehiclePosition, ApplicationError>;
}
