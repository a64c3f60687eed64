//! Cached wrapper for the statistics API client
//!
//! Routes every call through a [`ResultCache`] keyed on endpoint and query
//! string. The cache can be disabled (for `--no-cache`), in which case calls
//! go straight to the inner client.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::cache::{CacheStats, CacheTtl, Clock, ResultCache, SystemClock, cache_key};
use crate::client::query::encode_params;
use crate::client::{
    Circuit, CircuitLapSummary, DatabaseMetrics, Driver, DriverStanding, LapTime, Page, QuerySpec,
    Race, StatsApi, endpoints,
};
use crate::error::Result;

/// Cached wrapper for any [`StatsApi`] implementation.
pub struct CachedStatsApi<A: StatsApi, C: Clock = SystemClock> {
    inner: A,
    cache: Option<ResultCache<C>>,
    ttl: Duration,
}

impl<A: StatsApi> CachedStatsApi<A> {
    /// Wrap `inner`, caching for [`CacheTtl::DEFAULT`] when `enabled`.
    pub fn new(inner: A, enabled: bool) -> Self {
        let cache = enabled.then(ResultCache::new);
        Self {
            inner,
            cache,
            ttl: CacheTtl::DEFAULT,
        }
    }
}

impl<A: StatsApi, C: Clock> CachedStatsApi<A, C> {
    /// Wrap `inner` with an explicit cache and TTL.
    #[cfg(test)]
    pub fn with_cache(inner: A, cache: ResultCache<C>, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Some(cache),
            ttl,
        }
    }

    /// Get the inner client
    #[cfg(test)]
    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Entry counts, or `None` when caching is disabled
    pub fn stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|c| c.stats(self.ttl))
    }

    /// Drop all cached responses, returning how many were removed
    pub fn clear(&self) -> usize {
        self.cache.as_ref().map(|c| c.clear()).unwrap_or(0)
    }

    async fn cached<T, F, Fut>(&self, endpoint: &str, query_string: &str, fetcher: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match self.cache {
            Some(ref cache) => {
                let key = cache_key(endpoint, query_string);
                cache.get_or_fetch(&key, self.ttl, fetcher).await
            }
            None => fetcher().await,
        }
    }
}

#[async_trait]
impl<A: StatsApi, C: Clock> StatsApi for CachedStatsApi<A, C> {
    async fn list_circuits(&self, query: &QuerySpec) -> Result<Page<Circuit>> {
        self.cached(endpoints::CIRCUITS, &query.to_query_string(), || {
            self.inner.list_circuits(query)
        })
        .await
    }

    async fn list_drivers(&self, query: &QuerySpec) -> Result<Page<Driver>> {
        self.cached(endpoints::DRIVERS, &query.to_query_string(), || {
            self.inner.list_drivers(query)
        })
        .await
    }

    async fn list_standings(&self, query: &QuerySpec) -> Result<Page<DriverStanding>> {
        self.cached(endpoints::DRIVER_STANDINGS, &query.to_query_string(), || {
            self.inner.list_standings(query)
        })
        .await
    }

    async fn list_races(&self, query: &QuerySpec) -> Result<Page<Race>> {
        self.cached(endpoints::RACES, &query.to_query_string(), || {
            self.inner.list_races(query)
        })
        .await
    }

    async fn list_lap_times(&self, query: &QuerySpec) -> Result<Page<LapTime>> {
        self.cached(endpoints::LAP_TIMES, &query.to_query_string(), || {
            self.inner.list_lap_times(query)
        })
        .await
    }

    async fn driver_lap_summary(
        &self,
        driver_id: u32,
        year: Option<u16>,
    ) -> Result<Vec<CircuitLapSummary>> {
        let year_value = year.map(|y| y.to_string()).unwrap_or_default();
        let query_string = encode_params(&[("year", year_value)]);
        self.cached(&endpoints::driver_lap_times(driver_id), &query_string, || {
            self.inner.driver_lap_summary(driver_id, year)
        })
        .await
    }

    async fn database_metrics(&self) -> Result<DatabaseMetrics> {
        self.cached(endpoints::DATABASE_METRICS, "", || self.inner.database_metrics())
            .await
    }
}
