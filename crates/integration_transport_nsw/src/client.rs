//! TfNSW Open Data client
//!
//! Departure monitor lookups via the trip planner API and vehicle position
//! lookups via the GTFS-realtime feeds.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{GeoLocation, VehicleMode};
use reqwest::{Client, Response, header};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::TransportNswConfig;
use crate::error::TransportNswError;
use crate::models::{
    DepartureFilter, NextDeparture, TripRef, VehicleLocation, due_in_minutes, rounded_minutes,
};
use crate::vehicle_positions;

/// Trip planner API version the rapidJSON shape is pinned to
const TRIP_PLANNER_VERSION: &str = "10.2.1.42";

/// Trait for Transport NSW clients
#[async_trait]
pub trait TransportNswClient: Send + Sync {
    /// Get the next departure at `stop_id` matching the route / destination
    /// filters (empty string = no filter)
    ///
    /// `Ok(None)` when the board has no matching departure.
    async fn get_departures(
        &self,
        stop_id: &str,
        route: &str,
        destination: &str,
        api_key: &str,
    ) -> Result<Option<NextDeparture>, TransportNswError>;

    /// Get the live location of the vehicle serving a departure's trip
    ///
    /// `Ok(None)` when there is no realtime trip id or mode, or the vehicle
    /// is not reporting.
    async fn get_vehicle_location(
        &self,
        trip: &TripRef,
        api_key: &str,
    ) -> Result<Option<VehicleLocation>, TransportNswError>;
}

/// HTTP client for the TfNSW Open Data API
#[derive(Debug)]
pub struct HttpTransportNswClient {
    client: Client,
    config: TransportNswConfig,
}

impl HttpTransportNswClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &TransportNswConfig) -> Result<Self, TransportNswError> {
        config
            .validate()
            .map_err(TransportNswError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("tnsw-sensor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportNswError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn departure_monitor_url(&self) -> String {
        format!("{}/v1/tp/departure_mon", self.config.base_url.trim_end_matches('/'))
    }

    fn vehicle_positions_url(&self, mode: VehicleMode) -> String {
        format!(
            "{}/v1/gtfs/vehiclepos/{}",
            self.config.base_url.trim_end_matches('/'),
            mode.vehicle_position_feed()
        )
    }

    /// Query parameters for a departure monitor request
    fn departure_params(stop_id: &str) -> [(&'static str, &str); 8] {
        [
            ("outputFormat", "rapidJSON"),
            ("coordOutputFormat", "EPSG:4326"),
            ("mode", "direct"),
            ("type_dm", "stop"),
            ("name_dm", stop_id),
            ("departureMonitorMacro", "true"),
            ("TfNSWDM", "true"),
            ("version", TRIP_PLANNER_VERSION),
        ]
    }

    fn map_send_error(&self, e: &reqwest::Error) -> TransportNswError {
        if e.is_timeout() {
            TransportNswError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            TransportNswError::ConnectionFailed(e.to_string())
        }
    }

    /// Turn non-success statuses into errors
    fn check_status(response: Response) -> Result<Response, TransportNswError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(TransportNswError::Unauthorized(format!("HTTP {status}")));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransportNswError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get(header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if status.is_server_error() {
            return Err(TransportNswError::ServiceUnavailable(format!("HTTP {status}")));
        }

        Err(TransportNswError::RequestFailed(format!("HTTP {status}")))
    }

    /// Parse a departure monitor body and pick the next matching departure
    fn parse_departures_response(
        body: &str,
        filter: &DepartureFilter,
        now: DateTime<Utc>,
    ) -> Result<Option<NextDeparture>, TransportNswError> {
        let raw: RawDepartureMonitorResponse =
            serde_json::from_str(body).map_err(|e| TransportNswError::ParseError(e.to_string()))?;

        let events = raw.stop_events.ok_or_else(|| {
            TransportNswError::ParseError("stopEvents missing from response".to_string())
        })?;

        Ok(events
            .into_iter()
            .filter(|event| {
                let transportation = event.transportation.as_ref();
                filter.matches(
                    transportation.and_then(|t| t.number.as_deref()),
                    transportation
                        .and_then(|t| t.destination.as_ref())
                        .and_then(|d| d.name.as_deref()),
                )
            })
            .find_map(|event| Self::convert_event(event, now)))
    }

    /// Convert a raw stop event; events without a planned time are skipped
    fn convert_event(raw: RawStopEvent, now: DateTime<Utc>) -> Option<NextDeparture> {
        let planned = raw.departure_time_planned?;
        let real_time = raw.is_realtime_controlled.unwrap_or(false);
        let estimated = if real_time {
            raw.departure_time_estimated.unwrap_or(planned)
        } else {
            planned
        };

        let transportation = raw.transportation.unwrap_or_default();
        let mode = transportation
            .product
            .and_then(|p| p.class)
            .and_then(VehicleMode::from_product_class);

        let stop_location = raw
            .location
            .and_then(|l| l.coord)
            .and_then(|coord| match coord.as_slice() {
                [lat, lon, ..] => GeoLocation::new(*lat, *lon).ok(),
                _ => None,
            });

        Some(NextDeparture {
            route: transportation.number.unwrap_or_default(),
            due_in_minutes: due_in_minutes(estimated, now),
            delay_minutes: rounded_minutes(estimated - planned),
            real_time,
            destination: transportation
                .destination
                .and_then(|d| d.name)
                .unwrap_or_default(),
            mode,
            stop_location,
            planned_departure: planned,
            estimated_departure: estimated,
            realtime_trip_id: raw
                .properties
                .and_then(|p| p.realtime_trip_id)
                .filter(|id| !id.is_empty()),
        })
    }
}

#[async_trait]
impl TransportNswClient for HttpTransportNswClient {
    #[instrument(skip(self, api_key))]
    async fn get_departures(
        &self,
        stop_id: &str,
        route: &str,
        destination: &str,
        api_key: &str,
    ) -> Result<Option<NextDeparture>, TransportNswError> {
        let url = self.departure_monitor_url();
        debug!(?url, "Fetching departure monitor");

        let response = self
            .client
            .get(&url)
            .query(&Self::departure_params(stop_id))
            .header(header::ACCEPT, "application/json")
            .header(header::AUTHORIZATION, format!("apikey {api_key}"))
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let body = Self::check_status(response)?
            .text()
            .await
            .map_err(|e| TransportNswError::ParseError(e.to_string()))?;

        let filter = DepartureFilter::new(route, destination);
        let departure = Self::parse_departures_response(&body, &filter, Utc::now())?;

        match &departure {
            Some(departure) => debug!(
                route = %departure.route,
                due = departure.due_in_minutes,
                real_time = departure.real_time,
                planned = %departure.planned_departure,
                estimated = %departure.estimated_departure,
                "Next departure found"
            ),
            None => debug!("No matching departures"),
        }
        Ok(departure)
    }

    #[instrument(skip(self, trip, api_key), fields(trip = ?trip.realtime_trip_id))]
    async fn get_vehicle_location(
        &self,
        trip: &TripRef,
        api_key: &str,
    ) -> Result<Option<VehicleLocation>, TransportNswError> {
        if !self.config.vehicle_positions {
            return Ok(None);
        }

        let (Some(trip_id), Some(mode)) = (trip.realtime_trip_id.as_deref(), trip.mode)
        else {
            debug!("Departure has no realtime trip, skipping vehicle lookup");
            return Ok(None);
        };

        let url = self.vehicle_positions_url(mode);
        debug!(?url, "Fetching vehicle positions");

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/x-google-protobuf")
            .header(header::AUTHORIZATION, format!("apikey {api_key}"))
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let body = Self::check_status(response)?
            .bytes()
            .await
            .map_err(|e| TransportNswError::ParseError(e.to_string()))?;

        let location = vehicle_positions::find_vehicle(&body, trip_id)?;
        if location.is_none() {
            debug!("Vehicle is not reporting a position");
        }
        Ok(location)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDepartureMonitorResponse {
    stop_events: Option<Vec<RawStopEvent>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStopEvent {
    location: Option<RawLocation>,
    departure_time_planned: Option<DateTime<Utc>>,
    departure_time_estimated: Option<DateTime<Utc>>,
    is_realtime_controlled: Option<bool>,
    transportation: Option<RawTransportation>,
    properties: Option<RawEventProperties>,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    coord: Option<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTransportation {
    number: Option<String>,
    destination: Option<RawDestination>,
    product: Option<RawProduct>,
}

#[derive(Debug, Deserialize)]
struct RawDestination {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawProduct {
    class: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawEventProperties {
    #[serde(rename = "RealtimeTripId")]
    realtime_trip_id: Option<String>,
}
