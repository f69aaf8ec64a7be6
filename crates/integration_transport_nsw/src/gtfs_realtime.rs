//! GTFS-realtime vehicle position messages
//!
//! The subset of `gtfs-realtime.proto` needed to locate a vehicle by trip.
//! Field tags match the upstream schema, so full TfNSW feeds decode with the
//! remaining fields skipped.

/// Root message of a feed
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FeedMessage {
    /// Feed metadata
    #[prost(message, required, tag = "1")]
    pub header: FeedHeader,
    /// Feed contents
    #[prost(message, repeated, tag = "2")]
    pub entity: Vec<FeedEntity>,
}

/// Feed metadata
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FeedHeader {
    /// Version of the feed specification, e.g. `"2.0"`
    #[prost(string, required, tag = "1")]
    pub gtfs_realtime_version: String,
    /// Creation time (POSIX seconds)
    #[prost(uint64, optional, tag = "3")]
    pub timestamp: Option<u64>,
}

/// One entity of a feed
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FeedEntity {
    /// Entity id, unique within the feed
    #[prost(string, required, tag = "1")]
    pub id: String,
    /// Whether the entity is to be deleted (incremental feeds)
    #[prost(bool, optional, tag = "2")]
    pub is_deleted: Option<bool>,
    /// Vehicle position, when this entity carries one
    #[prost(message, optional, tag = "4")]
    pub vehicle: Option<VehiclePosition>,
}

/// Realtime position of a vehicle
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VehiclePosition {
    /// Trip the vehicle is serving
    #[prost(message, optional, tag = "1")]
    pub trip: Option<TripDescriptor>,
    /// Current position
    #[prost(message, optional, tag = "2")]
    pub position: Option<Position>,
    /// Time of the position report (POSIX seconds)
    #[prost(uint64, optional, tag = "5")]
    pub timestamp: Option<u64>,
}

/// Identifies a trip instance
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TripDescriptor {
    /// GTFS trip id
    #[prost(string, optional, tag = "1")]
    pub trip_id: Option<String>,
}

/// WGS-84 position
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Position {
    /// Degrees north
    #[prost(float, required, tag = "1")]
    pub latitude: f32,
    /// Degrees east
    #[prost(float, required, tag = "2")]
    pub longitude: f32,
    /// Degrees clockwise from true north
    #[prost(float, optional, tag = "3")]
    pub bearing: Option<f32>,
}
