//! In-memory cache for API responses
//!
//! Memoizes successful responses per (endpoint, query string) for a fixed
//! window so an interactive session does not refetch the same page.

pub mod client;
pub mod key;
pub mod store;

use std::time::Duration;

/// Cache TTL configuration
pub struct CacheTtl;

impl CacheTtl {
    /// Uniform lifetime of every cached response
    pub const DEFAULT: Duration = Duration::from_secs(5 * 60); // 5 min
}

pub use client::CachedStatsApi;
pub use key::cache_key;
pub use store::{CacheStats, Clock, ResultCache, SystemClock};
