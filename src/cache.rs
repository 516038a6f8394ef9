//! Time-boxed memoization of fetch cycles.
//!
//! [`ReadingCache`] holds at most one cycle and judges freshness purely by
//! wall-clock age. [`Pipeline`] owns the cache together with the client and
//! the location table, and is the only thing that drives fetch cycles.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{FetchCycle, Location, WeatherClient};

// ---

/// Single-slot cache with a fixed time-to-live.
#[derive(Debug)]
pub struct ReadingCache {
    // ---
    ttl: Duration,
    slot: Option<(Instant, Arc<FetchCycle>)>,
}

impl ReadingCache {
    // ---
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, slot: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached cycle, if it was stored less than `ttl` before `now`.
    pub fn get(&self, now: Instant) -> Option<Arc<FetchCycle>> {
        // ---
        self.slot
            .as_ref()
            .filter(|(stored_at, _)| now.saturating_duration_since(*stored_at) < self.ttl)
            .map(|(_, cycle)| Arc::clone(cycle))
    }

    /// Replace whatever is cached.
    pub fn store(&mut self, now: Instant, cycle: Arc<FetchCycle>) {
        self.slot = Some((now, cycle));
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}

/// Drives fetch cycles and owns their memoized result.
#[derive(Debug)]
pub struct Pipeline {
    // ---
    client: WeatherClient,
    locations: Vec<Location>,
    cache: Mutex<ReadingCache>,
}

impl Pipeline {
    // ---
    pub fn new(client: WeatherClient, locations: Vec<Location>, ttl: Duration) -> Self {
        Self {
            client,
            locations,
            cache: Mutex::new(ReadingCache::new(ttl)),
        }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// The memoized cycle if still fresh, otherwise a new one.
    ///
    /// The cache lock is held across the fetch, so concurrent callers on a
    /// cold cache wait for a single cycle instead of each starting one.
    pub async fn current(&self) -> Arc<FetchCycle> {
        // ---
        let mut cache = self.cache.lock().await;

        if let Some(cycle) = cache.get(Instant::now()) {
            debug!("Cache hit, cycle fetched at {}", cycle.fetched_at);
            return cycle;
        }

        debug!("Cache miss or expired (ttl {:?})", cache.ttl());
        let cycle = Arc::new(self.client.fetch_all(&self.locations).await);
        cache.store(Instant::now(), Arc::clone(&cycle));
        cycle
    }

    /// Drop the memoized cycle and fetch every location again.
    pub async fn refresh(&self) -> Arc<FetchCycle> {
        // ---
        let mut cache = self.cache.lock().await;
        cache.invalidate();
        info!("Cache invalidated by refresh");

        let cycle = Arc::new(self.client.fetch_all(&self.locations).await);
        cache.store(Instant::now(), Arc::clone(&cycle));
        cycle
    }
}
