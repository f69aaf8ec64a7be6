//! Domain layer for the Transport NSW departure sensor
//!
//! Contains the departure record, vehicle modes with their icon table,
//! stop identifiers and coordinates. No I/O happens here.

pub mod entities;
pub mod errors;
pub mod not_available;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use not_available::NOT_AVAILABLE;
pub use value_objects::*;
