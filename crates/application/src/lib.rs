//! Application layer - Use cases and orchestration
//!
//! Defines the departure port and the two use cases built on it: the
//! fetcher that merges departure and vehicle data, and the sensor that
//! republishes the merged record as state plus attributes.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
