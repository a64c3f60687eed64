//! Mock statistics API client for testing
//!
//! Provides a mock implementation of [`StatsApi`] for unit testing without
//! making real API calls.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::models::PageMetadata;
use super::{
    Circuit, CircuitLapSummary, DatabaseMetrics, Driver, DriverStanding, LapTime, Page, QuerySpec,
    Race, StatsApi,
};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockStatsApi::new().with_circuits(vec![circuit("Monza", "Italy", 162.0)]);
/// let page = mock.list_circuits(&QuerySpec::new()).await?;
/// assert_eq!(page.records.len(), 1);
/// ```
#[derive(Default)]
pub struct MockStatsApi {
    circuits: Vec<Circuit>,
    drivers: Vec<Driver>,
    standings: Vec<DriverStanding>,
    races: Vec<Race>,
    lap_times: Vec<LapTime>,
    lap_summaries: Vec<(u32, Vec<CircuitLapSummary>)>,
    metrics: DatabaseMetrics,
    /// Error to return on the next call - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    call_count: Arc<Mutex<CallCounts>>,
    captured_queries: Arc<Mutex<Vec<CapturedQuery>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_circuits: usize,
    pub list_drivers: usize,
    pub list_standings: usize,
    pub list_races: usize,
    pub list_lap_times: usize,
    pub driver_lap_summary: usize,
    pub database_metrics: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.list_circuits
            + self.list_drivers
            + self.list_standings
            + self.list_races
            + self.list_lap_times
            + self.driver_lap_summary
            + self.database_metrics
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedQuery {
    pub method: &'static str,
    pub query_string: String,
}

impl MockStatsApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_circuits(mut self, circuits: Vec<Circuit>) -> Self {
        self.circuits = circuits;
        self
    }

    pub fn with_drivers(mut self, drivers: Vec<Driver>) -> Self {
        self.drivers = drivers;
        self
    }

    pub fn with_standings(mut self, standings: Vec<DriverStanding>) -> Self {
        self.standings = standings;
        self
    }

    pub fn with_races(mut self, races: Vec<Race>) -> Self {
        self.races = races;
        self
    }

    pub fn with_lap_times(mut self, lap_times: Vec<LapTime>) -> Self {
        self.lap_times = lap_times;
        self
    }

    pub fn with_lap_summary(mut self, driver_id: u32, summary: Vec<CircuitLapSummary>) -> Self {
        self.lap_summaries.push((driver_id, summary));
        self
    }

    pub fn with_metrics(mut self, metrics: DatabaseMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Fail the next call with `error`.
    pub async fn fail_next(&self, error: ApiError) {
        *self.error.lock().await = Some(error);
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    pub async fn captured_queries(&self) -> Vec<CapturedQuery> {
        self.captured_queries.lock().await.clone()
    }

    async fn record(&self, method: &'static str, query_string: String) -> Result<()> {
        {
            let mut counts = self.call_count.lock().await;
            match method {
                "list_circuits" => counts.list_circuits += 1,
                "list_drivers" => counts.list_drivers += 1,
                "list_standings" => counts.list_standings += 1,
                "list_races" => counts.list_races += 1,
                "list_lap_times" => counts.list_lap_times += 1,
                "driver_lap_summary" => counts.driver_lap_summary += 1,
                _ => counts.database_metrics += 1,
            }
        }
        self.captured_queries.lock().await.push(CapturedQuery {
            method,
            query_string,
        });

        match self.error.lock().await.take() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

/// Page holding `records`, truncated to the requested page size.
fn page_of<T: Clone>(records: &[T], query: &QuerySpec) -> Page<T> {
    let size = query.page_size.map(|s| s as usize).unwrap_or(records.len());
    Page {
        records: records.iter().take(size).cloned().collect(),
        metadata: PageMetadata {
            total_count: Some(records.len() as u64),
            page: Some(query.page),
            page_size: query.page_size,
            extra: Default::default(),
        },
    }
}

#[async_trait]
impl StatsApi for MockStatsApi {
    async fn list_circuits(&self, query: &QuerySpec) -> Result<Page<Circuit>> {
        self.record("list_circuits", query.to_query_string()).await?;
        Ok(page_of(&self.circuits, query))
    }

    async fn list_drivers(&self, query: &QuerySpec) -> Result<Page<Driver>> {
        self.record("list_drivers", query.to_query_string()).await?;
        Ok(page_of(&self.drivers, query))
    }

    async fn list_standings(&self, query: &QuerySpec) -> Result<Page<DriverStanding>> {
        self.record("list_standings", query.to_query_string()).await?;
        Ok(page_of(&self.standings, query))
    }

    async fn list_races(&self, query: &QuerySpec) -> Result<Page<Race>> {
        self.record("list_races", query.to_query_string()).await?;
        Ok(page_of(&self.races, query))
    }

    async fn list_lap_times(&self, query: &QuerySpec) -> Result<Page<LapTime>> {
        self.record("list_lap_times", query.to_query_string()).await?;
        Ok(page_of(&self.lap_times, query))
    }

    async fn driver_lap_summary(
        &self,
        driver_id: u32,
        year: Option<u16>,
    ) -> Result<Vec<CircuitLapSummary>> {
        let query = match year {
            Some(y) => format!("driver={}&year={}", driver_id, y),
            None => format!("driver={}", driver_id),
        };
        self.record("driver_lap_summary", query).await?;
        Ok(self
            .lap_summaries
            .iter()
            .find(|(id, _)| *id == driver_id)
            .map(|(_, summary)| summary.clone())
            .unwrap_or_default())
    }

    async fn database_metrics(&self) -> Result<DatabaseMetrics> {
        self.record("database_metrics", String::new()).await?;
        Ok(self.metrics.clone())
    }
}

/// Test fixtures with sensible defaults.
pub mod fixtures {
    use super::super::{Circuit, CircuitLapSummary, Driver, DriverStanding, LapTime, Race};

    pub fn circuit(id: u32, name: &str, country: &str, alt: f64) -> Circuit {
        Circuit {
            circuit_id: id,
            circuit_ref: None,
            name: name.to_string(),
            location: Some(format!("{} town", name)),
            country: Some(country.to_string()),
            lat: Some(45.0),
            lng: Some(9.0),
            alt: Some(alt),
            url: None,
        }
    }

    pub fn driver(id: u32, forename: &str, surname: &str) -> Driver {
        Driver {
            driver_id: id,
            driver_ref: Some(surname.to_lowercase()),
            code: None,
            forename: forename.to_string(),
            surname: surname.to_string(),
            dob: None,
            nationality: None,
            url: None,
        }
    }

    pub fn race(id: u32, year: u16, name: &str, circuit: Option<Circuit>) -> Race {
        Race {
            race_id: id,
            year,
            round: 1,
            circuit_id: circuit.as_ref().map(|c| c.circuit_id),
            name: name.to_string(),
            date: format!("{}-07-09T00:00:00", year),
            time: Some("14:00:00".to_string()),
            circuit,
        }
    }

    pub fn lap(lap: u32, milliseconds: u64, race: Option<Race>) -> LapTime {
        let minutes = milliseconds / 60_000;
        let seconds = (milliseconds % 60_000) / 1000;
        let millis = milliseconds % 1000;
        LapTime {
            race_id: race.as_ref().map(|r| r.race_id).unwrap_or(1),
            driver_id: 1,
            lap,
            position: Some(1),
            time: format!("{}:{:02}.{:03}", minutes, seconds, millis),
            milliseconds,
            race,
        }
    }

    pub fn standing(driver: Driver, race: Race, points: f64, wins: u32) -> DriverStanding {
        DriverStanding {
            driver_standings_id: None,
            race_id: race.race_id,
            driver_id: driver.driver_id,
            points,
            position: Some(1),
            wins,
            driver: Some(driver),
            race: Some(race),
        }
    }

    pub fn summary(circuit: Circuit, mean: &str, fastest: &str) -> CircuitLapSummary {
        CircuitLapSummary {
            circuit,
            mean_time: mean.to_string(),
            fastest_time: fastest.to_string(),
        }
    }
}
