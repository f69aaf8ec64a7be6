//! Next-departure record
//!
//! The single piece of mutable state of a sensor. It starts out as a
//! placeholder where every value is unknown and is replaced wholesale by
//! each successful poll.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::not_available;
use crate::value_objects::{GeoLocation, VehicleMode, icon_for};

/// Next departure at a stop, merged with the live position of its vehicle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartureInfo {
    /// Route number (e.g. "199", "T1")
    pub route: Option<String>,
    /// Minutes until the vehicle leaves
    pub due_in_minutes: Option<i64>,
    /// Minutes late (negative when early)
    pub delay_minutes: Option<i64>,
    /// Whether the due time is a live prediction
    pub real_time: Option<bool>,
    /// Destination shown on the vehicle
    pub destination: Option<String>,
    /// Vehicle mode
    pub mode: Option<VehicleMode>,
    /// Location of the stop
    pub stop_location: Option<GeoLocation>,
    /// Last reported location of the vehicle
    pub vehicle_location: Option<GeoLocation>,
}

impl DepartureInfo {
    /// Record shown before the first successful poll
    ///
    /// Everything is unknown except the route, which echoes the configured
    /// route filter when one is set.
    #[must_use]
    pub fn placeholder(route_filter: &str) -> Self {
        Self {
            route: (!route_filter.is_empty()).then(|| route_filter.to_string()),
            ..Self::default()
        }
    }

    /// Icon for the vehicle mode of this departure
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        icon_for(self.mode)
    }

    /// One-line summary for logs and terminal output
    #[must_use]
    pub fn format_summary(&self) -> String {
        let Some(due) = self.due_in_minutes else {
            return String::from("No departure data");
        };

        let mode = not_available::display(self.mode.as_ref());
        let route = not_available::display(self.route.as_ref());
        let destination = not_available::display(self.destination.as_ref());
        let delay = match self.delay_minutes {
            Some(d) if d > 0 => format!(" (+{d} min)"),
            Some(d) if d < 0 => format!(" ({d} min)"),
            _ => String::new(),
        };
        let live = if self.real_time == Some(true) {
            ""
        } else {
            " [scheduled]"
        };

        format!("{mode} {route} to {destination} in {due} min{delay}{live}")
    }
}

impl fmt::Display for DepartureInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_summary())
    }
}
