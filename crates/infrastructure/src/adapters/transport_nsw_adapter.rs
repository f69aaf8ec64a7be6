//! Transport NSW adapter - Implements DeparturePort using integration_transport_nsw

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{Departure, DeparturePort, DepartureQuery, VehiclePosition};
use async_trait::async_trait;
use integration_transport_nsw::{
    HttpTransportNswClient, NextDeparture, TransportNswClient, TransportNswConfig,
    TransportNswError, TripRef,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

/// Adapter for the TfNSW Open Data departure monitor and vehicle positions
pub struct TransportNswAdapter {
    client: Arc<dyn TransportNswClient>,
}

impl std::fmt::Debug for TransportNswAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportNswAdapter")
            .field("client", &"TransportNswClient")
            .finish()
    }
}

impl TransportNswAdapter {
    /// Wrap an existing client
    pub fn new(client: Arc<dyn TransportNswClient>) -> Self {
        Self { client }
    }

    /// Build an adapter backed by the HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn from_config(config: &TransportNswConfig) -> Result<Self, ApplicationError> {
        let client = HttpTransportNswClient::new(config).map_err(map_error)?;
        Ok(Self::new(Arc::new(client)))
    }

    fn convert_departure(departure: NextDeparture) -> Departure {
        Departure {
            route: departure.route,
            due_in_minutes: departure.due_in_minutes,
            delay_minutes: departure.delay_minutes,
            real_time: departure.real_time,
            destination: departure.destination,
            mode: departure.mode,
            stop_location: departure.stop_location,
            realtime_trip_id: departure.realtime_trip_id,
        }
    }
}

fn map_error(err: TransportNswError) -> ApplicationError {
    match err {
        TransportNswError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        TransportNswError::Unauthorized(msg) => {
            ApplicationError::Configuration(format!("API key rejected: {msg}"))
        },
        other => ApplicationError::ExternalService(format!("Transport NSW request failed: {other}")),
    }
}

#[async_trait]
impl DeparturePort for TransportNswAdapter {
    #[instrument(skip(self, api_key), fields(stop_id = %query.stop_id))]
    async fn get_departures(
        &self,
        query: &DepartureQuery,
        api_key: &SecretString,
    ) -> Result<Option<Departure>, ApplicationError> {
        let departure = self
            .client
            .get_departures(
                query.stop_id.as_str(),
                &query.route,
                &query.destination,
                api_key.expose_secret(),
            )
            .await
            .map_err(|e| {
                warn!(error = %e, "Departure lookup failed");
                map_error(e)
            })?;

        match &departure {
            Some(d) => debug!(route = %d.route, due = d.due_in_minutes, "Got departure"),
            None => debug!("No departure matches the filters"),
        }
        Ok(departure.map(Self::convert_departure))
    }

    #[instrument(skip(self, departure, api_key), fields(trip = ?departure.realtime_trip_id))]
    async fn get_vehicle_position(
        &self,
        departure: &Departure,
        api_key: &SecretString,
    ) -> Result<VehiclePosition, ApplicationError> {
        let trip = TripRef {
            realtime_trip_id: departure.realtime_trip_id.clone(),
            mode: departure.mode,
        };

        let vehicle = self
            .client
            .get_vehicle_location(&trip, api_key.expose_secret())
            .await
            .map_err(|e| {
                warn!(error = %e, "Vehicle lookup failed");
                map_error(e)
            })?;

        Ok(VehiclePosition {
            location: vehicle.map(|v| v.location),
        })
    }
}
