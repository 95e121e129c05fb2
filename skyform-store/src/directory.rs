use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use skyform_core::{normalize_airports, Airport, AirportSource, DestinationFilter};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::clock::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Errored,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("Failed to fetch airports: {0}")]
    FetchFailed(String),
}

struct DirectoryState {
    airports: Arc<Vec<Airport>>,
    last_fetched: Option<DateTime<Utc>>,
    error: Option<String>,
    destinations: DestinationFilter,
    // Fetch sequencing: `issued` is the last number handed out, `applied`
    // the highest number whose outcome was written.
    issued: u64,
    applied: u64,
}

impl DirectoryState {
    fn status(&self, in_flight: usize) -> LoadStatus {
        if in_flight > 0 {
            LoadStatus::Loading
        } else if self.error.is_some() {
            LoadStatus::Errored
        } else if self.applied > 0 {
            LoadStatus::Ready
        } else {
            LoadStatus::Idle
        }
    }
}

/// Process-wide airport directory with a time-boxed fetch cache.
///
/// A refresh swaps in a whole new snapshot; readers holding an older
/// `Arc<Vec<Airport>>` keep a consistent view.
pub struct AirportDirectory {
    source: Arc<dyn AirportSource>,
    clock: Arc<dyn Clock>,
    ttl: chrono::Duration,
    state: RwLock<DirectoryState>,
    in_flight: AtomicUsize,
}

/// Counts one outstanding fetch; released on drop so a cancelled caller
/// cannot leave the directory stuck in `Loading`.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl AirportDirectory {
    pub fn new(source: Arc<dyn AirportSource>, clock: Arc<dyn Clock>, ttl: chrono::Duration) -> Self {
        Self {
            source,
            clock,
            ttl,
            state: RwLock::new(DirectoryState {
                airports: Arc::new(Vec::new()),
                last_fetched: None,
                error: None,
                destinations: DestinationFilter::new(),
                issued: 0,
                applied: 0,
            }),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Return the directory, fetching it from the source when the cached
    /// snapshot is missing, empty, older than the TTL, or `force_refresh`
    /// is set. A failed fetch leaves the previous snapshot in place.
    pub async fn ensure_loaded(&self, force_refresh: bool) -> Result<Arc<Vec<Airport>>, DirectoryError> {
        let (seq, _in_flight) = {
            let mut state = self.state.write().await;
            if !force_refresh && self.is_fresh(&state) {
                debug!("Airport directory served from cache");
                return Ok(Arc::clone(&state.airports));
            }
            state.issued += 1;
            state.error = None;
            (state.issued, InFlight::enter(&self.in_flight))
        };

        info!(seq, force_refresh, "Fetching airport directory");
        let outcome = self.source.fetch_airports().await;

        let mut state = self.state.write().await;

        if seq <= state.applied {
            // A later fetch already landed; never let an older one overwrite it.
            warn!(seq, applied = state.applied, "Discarding stale airport fetch");
            return match outcome {
                Ok(_) => Ok(Arc::clone(&state.airports)),
                Err(e) => Err(DirectoryError::FetchFailed(e.to_string())),
            };
        }
        state.applied = seq;

        match outcome {
            Ok(records) => {
                let airports = Arc::new(normalize_airports(records));
                info!(seq, airports = airports.len(), "Airport directory replaced");
                state.airports = Arc::clone(&airports);
                state.last_fetched = Some(self.clock.now());
                state.error = None;
                state.destinations.invalidate();
                Ok(airports)
            }
            Err(e) => {
                let message = e.to_string();
                warn!(seq, "Airport fetch failed: {}", message);
                state.error = Some(message.clone());
                Err(DirectoryError::FetchFailed(message))
            }
        }
    }

    fn is_fresh(&self, state: &DirectoryState) -> bool {
        match state.last_fetched {
            Some(fetched) => {
                !state.airports.is_empty() && self.clock.now() - fetched < self.ttl
            }
            None => false,
        }
    }

    /// Airports reachable from `origin` in the current snapshot.
    pub async fn destinations_for(&self, origin: &str) -> Arc<Vec<Airport>> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        state.destinations.filter(origin, &state.airports)
    }

    pub async fn find(&self, code: &str) -> Option<Airport> {
        let state = self.state.read().await;
        state.airports.iter().find(|a| a.code == code).cloned()
    }

    pub async fn airports(&self) -> Arc<Vec<Airport>> {
        Arc::clone(&self.state.read().await.airports)
    }

    pub async fn last_fetched(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_fetched
    }

    pub async fn status(&self) -> LoadStatus {
        let state = self.state.read().await;
        state.status(self.in_flight.load(Ordering::SeqCst))
    }

    pub async fn is_loading(&self) -> bool {
        self.status().await == LoadStatus::Loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    pub async fn destination_scans(&self) -> u64 {
        self.state.read().await.destinations.scan_count()
    }
}
