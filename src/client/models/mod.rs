//! Statistics API data models
//!
//! One typed record per resource so nested-field access is checked at compile
//! time. Records serialize back to the same camelCase shape they were parsed
//! from, which is what the response cache stores.

mod circuit;
mod driver;
mod lap_time;
mod race;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use circuit::Circuit;
pub use driver::{Driver, DriverStanding};
pub use lap_time::{CircuitLapSummary, LapTime};
pub use race::Race;

/// One page of records from a list endpoint.
///
/// The `records` field is required; a body without it fails to parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub records: Vec<T>,

    #[serde(rename = "_metadata", default)]
    pub metadata: PageMetadata,
}

/// Paging metadata returned alongside `records`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// Anything else the API reports (page count, links, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Row counts per database table, keyed by snake_case table name.
pub type DatabaseMetrics = BTreeMap<String, u64>;
