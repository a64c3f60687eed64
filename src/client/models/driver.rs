//! Driver and standings models

use serde::{Deserialize, Serialize};

use super::Race;

/// Driver resource
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub driver_id: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_ref: Option<String>,

    /// Three-letter driver code (e.g. `HAM`), absent for early drivers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    pub forename: String,

    pub surname: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Driver {
    /// `Forename Surname`, the label drivers are selected by.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.forename, self.surname)
    }
}

/// Championship standing of a driver after one race
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverStanding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_standings_id: Option<u32>,

    pub race_id: u32,

    pub driver_id: u32,

    #[serde(default)]
    pub points: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,

    #[serde(default)]
    pub wins: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<Driver>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<Race>,
}
