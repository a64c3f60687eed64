//! Circuit models

use serde::{Deserialize, Serialize};

/// Circuit resource
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    pub circuit_id: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_ref: Option<String>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,

    /// Altitude in metres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
