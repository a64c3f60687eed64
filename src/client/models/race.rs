//! Race models

use serde::{Deserialize, Serialize};

use super::Circuit;

/// Race event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    pub race_id: u32,

    pub year: u16,

    pub round: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_id: Option<u32>,

    pub name: String,

    /// ISO date, sometimes with a `T00:00:00` suffix
    pub date: String,

    /// Start time, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit: Option<Circuit>,
}

impl Race {
    /// Date without any time-of-day suffix.
    pub fn date_only(&self) -> &str {
        self.date.split('T').next().unwrap_or(&self.date)
    }

    /// `2023 British Grand Prix`
    pub fn label(&self) -> String {
        format!("{} {}", self.year, self.name)
    }
}
