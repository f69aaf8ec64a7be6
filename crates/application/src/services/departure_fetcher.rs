//! Departure fetcher
//!
//! Owns the departure port and the latest [`DepartureInfo`]. Each update
//! asks the port for the next departure, then for the position of the
//! vehicle serving it, and replaces the stored record with the merge of
//! both.

use std::{fmt, sync::Arc};

use domain::{DepartureInfo, StopId};
use secrecy::SecretString;
use tracing::{debug, instrument};

use crate::{
    error::ApplicationError,
    ports::{Departure, DeparturePort, DepartureQuery, VehiclePosition},
};

/// Fetches and merges departure data for one stop
pub struct DepartureFetcher {
    port: Arc<dyn DeparturePort>,
    query: DepartureQuery,
    api_key: SecretString,
    info: DepartureInfo,
}

impl fmt::Debug for DepartureFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepartureFetcher")
            .field("query", &self.query)
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

impl DepartureFetcher {
    /// Create a fetcher; filters are passed to the port unchanged, empty
    /// meaning "any"
    pub fn new(
        port: Arc<dyn DeparturePort>,
        stop_id: StopId,
        route: impl Into<String>,
        destination: impl Into<String>,
        api_key: SecretString,
    ) -> Self {
        let query = DepartureQuery::new(stop_id)
            .with_route(route)
            .with_destination(destination);
        let info = DepartureInfo::placeholder(&query.route);

        Self {
            port,
            query,
            api_key,
            info,
        }
    }

    /// The latest merged record (placeholder until the first success)
    pub const fn info(&self) -> &DepartureInfo {
        &self.info
    }

    /// Fetch the next departure and its vehicle position
    ///
    /// When nothing matches the record is reset to all-unknown. On error the
    /// stored record is left untouched.
    #[instrument(skip(self), fields(stop_id = %self.query.stop_id))]
    pub async fn update(&mut self) -> Result<(), ApplicationError> {
        let Some(departure) = self
            .port
            .get_departures(&self.query, &self.api_key)
            .await?
        else {
            debug!("No matching departure");
            self.info = DepartureInfo::placeholder(&self.query.route);
            return Ok(());
        };

        let position = self
            .port
            .get_vehicle_position(&departure, &self.api_key)
            .await?;

        self.info = merge(departure, position);
        debug!(summary = %self.info, "Departure info refreshed");
        Ok(())
    }
}

/// Build a fresh record from a departure and its vehicle position
fn merge(departure: Departure, position: VehiclePosition) -> DepartureInfo {
    DepartureInfo {
        route: non_empty(departure.route),
        due_in_minutes: Some(departure.due_in_minutes),
        delay_minutes: Some(departure.delay_minutes),
        real_time: Some(departure.real_time),
        destination: non_empty(departure.destination),
        mode: departure.mode,
        stop_location: departure.stop_location,
        vehicle_location: position.location,
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
