//! Infrastructure layer - Adapters for external systems
//!
//! Implements the departure port on top of the Transport NSW client and
//! provides configuration loading, logging setup and the polling loop.

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod poller;
pub mod telemetry;

pub use adapters::*;
pub use bootstrap::{build_adapter, build_sensor};
pub use config::{AppConfig, LoggingConfig, PollerConfig, SensorConfig};
pub use poller::{PollStats, SensorPoller};
pub use telemetry::{TelemetryError, init_logging};
