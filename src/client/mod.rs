//! Statistics API client

use async_trait::async_trait;

use crate::error::Result;

#[cfg(test)]
pub mod mock;
pub mod models;
pub mod query;
pub mod vps;

#[cfg(test)]
pub use mock::MockStatsApi;
pub use models::{
    Circuit, CircuitLapSummary, DatabaseMetrics, Driver, DriverStanding, LapTime, Page, Race,
};
pub use query::{QuerySpec, SortOrder};
pub use vps::VpsClient;

/// Upstream endpoint paths, relative to the configured base URL.
pub mod endpoints {
    pub const CIRCUITS: &str = "circuits";
    pub const DRIVERS: &str = "drivers";
    pub const DRIVER_STANDINGS: &str = "drivers/standings";
    pub const RACES: &str = "races";
    pub const LAP_TIMES: &str = "races/lapTimes";
    pub const DATABASE_METRICS: &str = "database/metrics";

    /// Per-circuit lap summary for a single driver
    pub fn driver_lap_times(driver_id: u32) -> String {
        format!("{}/{}", LAP_TIMES, driver_id)
    }
}

/// Statistics API client trait
///
/// Every method is a single GET. Failures surface immediately; nothing here
/// retries.
#[async_trait]
pub trait StatsApi: Send + Sync {
    /// List circuits
    async fn list_circuits(&self, query: &QuerySpec) -> Result<Page<Circuit>>;

    /// List drivers
    async fn list_drivers(&self, query: &QuerySpec) -> Result<Page<Driver>>;

    /// List driver championship standings (with embedded driver and race)
    async fn list_standings(&self, query: &QuerySpec) -> Result<Page<DriverStanding>>;

    /// List races (with embedded circuit)
    async fn list_races(&self, query: &QuerySpec) -> Result<Page<Race>>;

    /// List lap times (with embedded race and circuit)
    async fn list_lap_times(&self, query: &QuerySpec) -> Result<Page<LapTime>>;

    /// Mean and fastest lap per circuit for one driver, optionally for one year
    async fn driver_lap_summary(
        &self,
        driver_id: u32,
        year: Option<u16>,
    ) -> Result<Vec<CircuitLapSummary>>;

    /// Row counts per database table
    async fn database_metrics(&self) -> Result<DatabaseMetrics>;
}
