//! Transport NSW data models
//!
//! Typed results of the departure monitor and vehicle position lookups.

use chrono::{DateTime, TimeDelta, Utc};
use domain::{GeoLocation, VehicleMode};
use serde::{Deserialize, Serialize};

/// Route / destination filters applied to the departure board
///
/// Empty strings mean "no filter". When both are set the destination
/// filter wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartureFilter {
    /// Route number to match (`transportation.number`)
    pub route: String,
    /// Destination name to match (`transportation.destination.name`)
    pub destination: String,
}

impl DepartureFilter {
    /// Create a filter from the configured strings
    #[must_use]
    pub fn new(route: &str, destination: &str) -> Self {
        Self {
            route: route.to_string(),
            destination: destination.to_string(),
        }
    }

    /// Whether a departure with this route number and destination passes
    #[must_use]
    pub fn matches(&self, route: Option<&str>, destination: Option<&str>) -> bool {
        if !self.destination.is_empty() {
            return destination == Some(self.destination.as_str());
        }
        if !self.route.is_empty() {
            return route == Some(self.route.as_str());
        }
        true
    }
}

/// The next departure at a stop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextDeparture {
    /// Route number
    pub route: String,
    /// Minutes until departure (never negative)
    pub due_in_minutes: i64,
    /// Minutes between planned and effective departure (negative when early)
    pub delay_minutes: i64,
    /// Whether the effective time is a real-time estimate
    pub real_time: bool,
    /// Destination name
    pub destination: String,
    /// Vehicle mode, if the product class is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<VehicleMode>,
    /// Location of the stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_location: Option<GeoLocation>,
    /// Timetabled departure time
    pub planned_departure: DateTime<Utc>,
    /// Estimated departure time (equals planned when not real-time)
    pub estimated_departure: DateTime<Utc>,
    /// GTFS trip id used to find the vehicle in the realtime feeds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realtime_trip_id: Option<String>,
}

/// Identifies the trip whose vehicle should be located
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRef {
    /// GTFS realtime trip id
    pub realtime_trip_id: Option<String>,
    /// Mode, selects the vehicle position feed
    pub mode: Option<VehicleMode>,
}

/// Live position of the vehicle serving a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleLocation {
    /// Trip the vehicle is serving
    pub trip_id: String,
    /// Vehicle coordinates
    pub location: GeoLocation,
    /// Bearing in degrees clockwise from north
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearing: Option<f32>,
    /// Time of the position report (POSIX seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

/// Round a duration to whole minutes, halves away from zero
pub(crate) fn rounded_minutes(delta: TimeDelta) -> i64 {
    let secs = delta.num_seconds();
    let minutes = (secs.abs() + 30) / 60;
    if secs < 0 { -minutes } else { minutes }
}

/// Minutes from `now` until `departure`, clamped at zero
pub(crate) fn due_in_minutes(departure: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    if departure > now {
        rounded_minutes(departure - now)
    } else {
        0
    }
}
