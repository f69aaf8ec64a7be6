//! Application services - Use case implementations

mod departure_fetcher;
mod departure_sensor;

pub use departure_fetcher::DepartureFetcher;
pub use departure_sensor::{
    ATTRIBUTION, DEFAULT_NAME, DepartureSensor, SCAN_INTERVAL, SensorAttributes, SensorSnapshot,
    SensorState, UNIT_OF_MEASUREMENT,
};
