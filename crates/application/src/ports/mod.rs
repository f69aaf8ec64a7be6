//! Port definitions (interfaces for external systems)

mod departure_port;

pub use departure_port::{Departure, DeparturePort, DepartureQuery, VehiclePosition};

#[cfg(test)]
pub use departure_port::MockDeparturePort;
