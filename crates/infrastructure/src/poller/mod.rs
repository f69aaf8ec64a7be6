//! Fixed-interval polling of a departure sensor
//!
//! Drives a [`DepartureSensor`] the way a home automation host would: one
//! update straight away, then one per scan interval. Every successful update
//! publishes a fresh [`SensorSnapshot`] on a watch channel; failures are
//! logged and counted while the last snapshot stays current.

use std::{
    future::Future,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use application::{ApplicationError, DepartureSensor, SensorSnapshot};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::{
    sync::{Mutex as AsyncMutex, watch},
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, instrument, warn};

/// Poll statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollStats {
    /// Number of successful updates
    pub success_count: u64,
    /// Number of failed updates
    pub failure_count: u64,
    /// Last successful update
    pub last_success: Option<DateTime<Utc>>,
    /// Last failed update
    pub last_failure: Option<DateTime<Utc>>,
    /// Error of the last failed update
    pub last_error: Option<String>,
}

/// Counters shared between the poll loop and readers
#[derive(Default)]
struct PollMetadata {
    success_count: AtomicU64,
    failure_count: AtomicU64,
    last_success: RwLock<Option<DateTime<Utc>>>,
    last_failure: RwLock<Option<DateTime<Utc>>>,
    last_error: RwLock<Option<String>>,
}

impl PollMetadata {
    fn to_stats(&self) -> PollStats {
        PollStats {
            success_count: self.success_count.load(Ordering::Relaxed),
            failure_count: self.failure_count.load(Ordering::Relaxed),
            last_success: *self.last_success.read(),
            last_failure: *self.last_failure.read(),
            last_error: self.last_error.read().clone(),
        }
    }

    fn record_success(&self) {
        self.success_count.fetch_add(1, Ordering::Relaxed);
        *self.last_success.write() = Some(Utc::now());
    }

    fn record_failure(&self, error: String) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
        *self.last_failure.write() = Some(Utc::now());
        *self.last_error.write() = Some(error);
    }
}

/// Polls one sensor and publishes its snapshots
pub struct SensorPoller {
    sensor: AsyncMutex<DepartureSensor>,
    interval: Duration,
    metadata: PollMetadata,
    snapshots: watch::Sender<SensorSnapshot>,
}

impl std::fmt::Debug for SensorPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorPoller")
            .field("interval", &self.interval)
            .field("stats", &self.metadata.to_stats())
            .finish_non_exhaustive()
    }
}

impl SensorPoller {
    /// Create a poller; the initial snapshot is the sensor's current one
    pub fn new(sensor: DepartureSensor, interval: Duration) -> Self {
        let (snapshots, _) = watch::channel(sensor.snapshot());
        Self {
            sensor: AsyncMutex::new(sensor),
            interval,
            metadata: PollMetadata::default(),
            snapshots,
        }
    }

    /// Time between updates
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<SensorSnapshot> {
        self.snapshots.subscribe()
    }

    /// Most recently published snapshot
    pub fn latest(&self) -> SensorSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Current statistics
    pub fn stats(&self) -> PollStats {
        self.metadata.to_stats()
    }

    /// Run a single update and publish the result
    ///
    /// # Errors
    ///
    /// Returns the sensor's update error; the published snapshot is left
    /// unchanged.
    #[instrument(skip(self))]
    pub async fn poll_once(&self) -> Result<SensorSnapshot, ApplicationError> {
        let mut sensor = self.sensor.lock().await;

        match sensor.update().await {
            Ok(()) => {
                self.metadata.record_success();
                let snapshot = sensor.snapshot();
                self.snapshots.send_replace(snapshot.clone());
                debug!(state = %snapshot.state, "Published snapshot");
                Ok(snapshot)
            },
            Err(e) => {
                self.metadata.record_failure(e.to_string());
                Err(e)
            },
        }
    }

    /// Poll until `shutdown` resolves
    ///
    /// The first update runs immediately. Ticks missed while an update is
    /// in flight are delayed rather than bunched.
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!(interval_secs = self.interval.as_secs(), "Poller started");

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = ticker.tick() => {
                    if let Err(e) = self.poll_once().await {
                        warn!(error = %e, retryable = e.is_retryable(), "Sensor update failed");
                    }
                }
            }
        }

        let stats = self.stats();
        info!(
            successes = stats.success_count,
            failures = stats.failure_count,
            "Poller stopped"
        );
    }
}
