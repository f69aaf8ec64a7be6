//! Transport for NSW integration
//!
//! Client for the [TfNSW Open Data](https://opendata.transport.nsw.gov.au) APIs:
//! the trip planner departure monitor (`/v1/tp/departure_mon`, rapidJSON) for
//! the next departure at a stop, and the GTFS-realtime vehicle position feeds
//! (`/v1/gtfs/vehiclepos/...`) for the live location of the vehicle serving it.
//!
//! # Architecture
//!
//! [`TransportNswClient`] defines the interface, implemented by
//! [`HttpTransportNswClient`]. Both calls take the API key explicitly so a
//! single client can serve several sensors with different keys.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_transport_nsw::{
//!     HttpTransportNswClient, TransportNswClient, TransportNswConfig, TripRef,
//! };
//!
//! let client = HttpTransportNswClient::new(&TransportNswConfig::default())?;
//! if let Some(departure) = client.get_departures("209516", "", "", "API_KEY").await? {
//!     let trip = TripRef {
//!         realtime_trip_id: departure.realtime_trip_id,
//!         mode: departure.mode,
//!     };
//!     let vehicle = client.get_vehicle_location(&trip, "API_KEY").await?;
//! }
//! ```

mod client;
mod config;
mod error;
pub mod gtfs_realtime;
mod models;
mod vehicle_positions;

pub use client::{HttpTransportNswClient, TransportNswClient};
pub use config::TransportNswConfig;
pub use error::TransportNswError;
pub use models::{DepartureFilter, NextDeparture, TripRef, VehicleLocation};
