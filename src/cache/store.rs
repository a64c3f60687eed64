//! TTL result cache with single-flight fetching
//!
//! Values are kept as `serde_json::Value` so one cache can hold responses of
//! every record type. An entry is live while `now - fetched_at < ttl` and is
//! replaced whole when refetched. Failed fetches are never stored.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use log::{debug, warn};
use serde::{Serialize, de::DeserializeOwned};

/// Time source for entry ages.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Monotonic wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry {
    value: serde_json::Value,
    fetched_at: Instant,
}

/// Entry counts, relative to a given TTL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub live_entries: usize,
    pub expired_entries: usize,
}

/// In-memory response cache.
///
/// Construct once and share by reference. Concurrent callers asking for the
/// same key are serialized on a per-key lock, so only one of them runs the
/// fetcher and the rest read its result.
pub struct ResultCache<C: Clock = SystemClock> {
    clock: C,
    entries: Mutex<HashMap<String, CacheEntry>>,
    in_flight: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl ResultCache<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for ResultCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ResultCache<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Return the live value for `key`, or run `fetcher` and store its success.
    pub async fn get_or_fetch<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        fetcher: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let slot = self.key_lock(key);
        let result = {
            let _guard = slot.lock().await;
            self.fetch_locked(key, ttl, fetcher).await
        };
        self.release(key, slot);
        result
    }

    async fn fetch_locked<T, E, F, Fut>(&self, key: &str, ttl: Duration, fetcher: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.lookup(key, ttl) {
            debug!("Cache hit: {}", &key[..key.len().min(12)]);
            return Ok(value);
        }

        debug!("Cache miss: {}", &key[..key.len().min(12)]);
        let value = fetcher().await?;
        self.store(key, &value);
        Ok(value)
    }

    /// Count entries as live or expired under `ttl`.
    pub fn stats(&self, ttl: Duration) -> CacheStats {
        let now = self.clock.now();
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        let live_entries = entries
            .values()
            .filter(|e| now.saturating_duration_since(e.fetched_at) < ttl)
            .count();

        CacheStats {
            total_entries: entries.len(),
            live_entries,
            expired_entries: entries.len() - live_entries,
        }
    }

    /// Drop every entry, returning how many were removed.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let removed = entries.len();
        entries.clear();
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        removed
    }

    fn key_lock(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.entry(key.to_string()).or_default().clone()
    }

    // Drop the key's slot once no other caller holds it.
    fn release(&self, key: &str, slot: Arc<tokio::sync::Mutex<()>>) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let idle = in_flight
            .get(key)
            .is_some_and(|held| Arc::ptr_eq(held, &slot) && Arc::strong_count(held) == 2);
        if idle {
            in_flight.remove(key);
        }
    }

    fn lookup<T: DeserializeOwned>(&self, key: &str, ttl: Duration) -> Option<T> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(key)?;

        if self.clock.now().saturating_duration_since(entry.fetched_at) >= ttl {
            return None;
        }

        serde_json::from_value(entry.value.clone()).ok()
    }

    fn store<T: Serialize>(&self, key: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                warn!("Not caching response: {}", e);
                return;
            }
        };

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                fetched_at: self.clock.now(),
            },
        );
    }
}

/// Clock that only moves when told to.
#[cfg(test)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}
