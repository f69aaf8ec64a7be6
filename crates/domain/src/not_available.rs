//! Rendering of missing values as the `"n/a"` sentinel
//!
//! Departure fields are `Option`s internally. Wherever they leave the
//! process (sensor attributes, CLI output) a missing value is shown as
//! `"n/a"`, the way the sensor has always reported unknown values.
//!
//! ```rust,ignore
//! #[derive(Serialize)]
//! struct Attributes {
//!     #[serde(serialize_with = "domain::not_available::serialize")]
//!     due: Option<i64>,
//! }
//! ```

use serde::{Serialize, Serializer};

/// Sentinel shown for values that are not (yet) known
pub const NOT_AVAILABLE: &str = "n/a";

/// Serialize `Some(v)` as `v` and `None` as `"n/a"`
pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(v) => v.serialize(serializer),
        None => serializer.serialize_str(NOT_AVAILABLE),
    }
}

/// Display helper: `Some(v)` as `v.to_string()`, `None` as `"n/a"`
pub fn display<T: ToString>(value: Option<&T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string)
}
