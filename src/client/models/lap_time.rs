//! Lap time models

use serde::{Deserialize, Serialize};

use super::{Circuit, Race};

/// One timed lap of one driver in one race
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LapTime {
    pub race_id: u32,

    pub driver_id: u32,

    pub lap: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,

    /// Lap time as reported, e.g. `1:27.097`
    pub time: String,

    pub milliseconds: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<Race>,
}

/// Per-circuit lap summary for one driver (`races/lapTimes/{driverId}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitLapSummary {
    pub circuit: Circuit,

    pub mean_time: String,

    pub fastest_time: String,
}
