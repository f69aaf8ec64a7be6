//! Vehicle mode and the icon table

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Icon shown when the mode is unknown or no departure has been seen yet
pub const UNKNOWN_ICON: &str = "mdi:clock";

/// Category of vehicle serving a departure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleMode {
    /// Sydney Trains / NSW TrainLink
    Train,
    /// Light rail
    Lightrail,
    /// Bus
    Bus,
    /// Regional coach
    Coach,
    /// Ferry
    Ferry,
    /// School bus
    Schoolbus,
}

impl VehicleMode {
    /// Every known mode
    pub const ALL: [Self; 6] = [
        Self::Train,
        Self::Lightrail,
        Self::Bus,
        Self::Coach,
        Self::Ferry,
        Self::Schoolbus,
    ];

    /// Map a trip planner `product.class` to a mode
    #[must_use]
    pub const fn from_product_class(class: i64) -> Option<Self> {
        match class {
            1 => Some(Self::Train),
            4 => Some(Self::Lightrail),
            5 => Some(Self::Bus),
            7 => Some(Self::Coach),
            9 => Some(Self::Ferry),
            11 => Some(Self::Schoolbus),
            _ => None,
        }
    }

    /// Trip planner `product.class` of this mode
    #[must_use]
    pub const fn product_class(&self) -> i64 {
        match self {
            Self::Train => 1,
            Self::Lightrail => 4,
            Self::Bus => 5,
            Self::Coach => 7,
            Self::Ferry => 9,
            Self::Schoolbus => 11,
        }
    }

    /// Label as reported in sensor attributes
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Train => "Train",
            Self::Lightrail => "Lightrail",
            Self::Bus => "Bus",
            Self::Coach => "Coach",
            Self::Ferry => "Ferry",
            Self::Schoolbus => "Schoolbus",
        }
    }

    /// Material Design icon for this mode
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Train => "mdi:train",
            Self::Lightrail => "mdi:tram",
            Self::Bus | Self::Coach | Self::Schoolbus => "mdi:bus",
            Self::Ferry => "mdi:ferry",
        }
    }

    /// GTFS-realtime vehicle position feed carrying vehicles of this mode
    #[must_use]
    pub const fn vehicle_position_feed(&self) -> &'static str {
        match self {
            Self::Train => "sydneytrains",
            Self::Lightrail => "lightrail/innerwest",
            Self::Bus | Self::Coach | Self::Schoolbus => "buses",
            Self::Ferry => "ferries/sydneyferries",
        }
    }
}

/// Icon for an optional mode, falling back to [`UNKNOWN_ICON`]
#[must_use]
pub const fn icon_for(mode: Option<VehicleMode>) -> &'static str {
    match mode {
        Some(mode) => mode.icon(),
        None => UNKNOWN_ICON,
    }
}

/// Icon for a free-form mode label (`"Bus"`, `"n/a"`, anything else)
#[must_use]
pub fn icon_for_label(label: &str) -> &'static str {
    icon_for(label.parse().ok())
}

impl FromStr for VehicleMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidVehicleMode(s.to_string()))
    }
}

impl fmt::Display for VehicleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
