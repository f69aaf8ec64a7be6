//! Entities - Domain records with a lifecycle

mod departure_info;

pub use departure_info::DepartureInfo;
