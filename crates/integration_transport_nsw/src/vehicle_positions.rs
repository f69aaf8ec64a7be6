//! GTFS-realtime vehicle position lookup

use domain::GeoLocation;
use prost::Message;
use tracing::debug;

use crate::error::TransportNswError;
use crate::gtfs_realtime::FeedMessage;
use crate::models::VehicleLocation;

/// Decode a vehicle position feed and find the vehicle serving `trip_id`
pub(crate) fn find_vehicle(
    body: &[u8],
    trip_id: &str,
) -> Result<Option<VehicleLocation>, TransportNswError> {
    let feed = FeedMessage::decode(body).map_err(|e| {
        TransportNswError::ParseError(format!("Failed to decode vehicle positions feed: {e}"))
    })?;

    debug!(
        entities = feed.entity.len(),
        feed_timestamp = ?feed.header.timestamp,
        "Decoded vehicle positions feed"
    );

    Ok(feed
        .entity
        .into_iter()
        .filter(|entity| !entity.is_deleted.unwrap_or(false))
        .filter_map(|entity| entity.vehicle)
        .find(|vehicle| {
            vehicle
                .trip
                .as_ref()
                .and_then(|t| t.trip_id.as_deref())
                == Some(trip_id)
        })
        .and_then(|vehicle| {
            let position = vehicle.position?;
            let location =
                GeoLocation::new(f64::from(position.latitude), f64::from(position.longitude))
                    .ok()?;
            Some(VehicleLocation {
                trip_id: trip_id.to_string(),
                location,
                bearing: position.bearing,
                timestamp: vehicle.timestamp,
            })
        }))
}
