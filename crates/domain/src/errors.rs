//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Stop identifier is blank
    #[error("Invalid stop id: {0}")]
    InvalidStopId(String),

    /// Vehicle mode label is not one of the known modes
    #[error("Invalid vehicle mode: {0}")]
    InvalidVehicleMode(String),

    /// Coordinates outside the valid range
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}
