//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod stop_id;
mod vehicle_mode;

pub use geo_location::GeoLocation;
pub use stop_id::StopId;
pub use vehicle_mode::{UNKNOWN_ICON, VehicleMode, icon_for, icon_for_label};
