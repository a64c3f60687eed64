//! HTTP implementation of the statistics API

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use super::query::encode_params;
use super::{
    Circuit, CircuitLapSummary, DatabaseMetrics, Driver, DriverStanding, LapTime, Page, QuerySpec,
    Race, StatsApi, endpoints,
};
use crate::error::{ApiError, Error, Result};

/// Request timeout applied to every call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Statistics API client
pub struct VpsClient {
    http: HttpClient,
    base_url: String,
}

impl VpsClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("vpsview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base_url/endpoint?query`, omitting `?` when there is no query.
    pub fn url_for(&self, endpoint: &str, query_string: &str) -> String {
        let endpoint = endpoint.trim_start_matches('/');
        if query_string.is_empty() {
            format!("{}/{}", self.base_url, endpoint)
        } else {
            format!("{}/{}?{}", self.base_url, endpoint, query_string)
        }
    }

    /// Fetch one page of records from a list endpoint.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &QuerySpec,
    ) -> Result<Page<T>> {
        self.get_json(endpoint, &query.to_query_string()).await
    }

    /// Single GET; 200 bodies are parsed as `T`, anything else is an `Http` error.
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, query_string: &str) -> Result<T> {
        let url = self.url_for(endpoint, query_string);
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await.map_err(ApiError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;

        if status != StatusCode::OK {
            debug!("GET {} failed with {}", url, status);
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|e| {
            Error::from(ApiError::Parse(format!(
                "Failed to parse response from {}: {}",
                endpoint, e
            )))
        })
    }
}

#[async_trait]
impl StatsApi for VpsClient {
    async fn list_circuits(&self, query: &QuerySpec) -> Result<Page<Circuit>> {
        self.fetch(endpoints::CIRCUITS, query).await
    }

    async fn list_drivers(&self, query: &QuerySpec) -> Result<Page<Driver>> {
        self.fetch(endpoints::DRIVERS, query).await
    }

    async fn list_standings(&self, query: &QuerySpec) -> Result<Page<DriverStanding>> {
        self.fetch(endpoints::DRIVER_STANDINGS, query).await
    }

    async fn list_races(&self, query: &QuerySpec) -> Result<Page<Race>> {
        self.fetch(endpoints::RACES, query).await
    }

    async fn list_lap_times(&self, query: &QuerySpec) -> Result<Page<LapTime>> {
        self.fetch(endpoints::LAP_TIMES, query).await
    }

    async fn driver_lap_summary(
        &self,
        driver_id: u32,
        year: Option<u16>,
    ) -> Result<Vec<CircuitLapSummary>> {
        let params = vec![("year", year.map(|y| y.to_string()).unwrap_or_default())];
        self.get_json(&endpoints::driver_lap_times(driver_id), &encode_params(&params))
            .await
    }

    async fn database_metrics(&self) -> Result<DatabaseMetrics> {
        self.get_json(endpoints::DATABASE_METRICS, "").await
    }
}
