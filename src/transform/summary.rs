//! Headline aggregates shown above the circuit and lap tables

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::duration::mean_lap_time;
use crate::client::{Circuit, LapTime};
use crate::error::TransformError;

/// Circuit with its altitude, for the highest/lowest metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AltitudeMark {
    pub name: String,
    pub country: Option<String>,
    pub alt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitSummary {
    pub circuits: usize,
    pub countries: usize,
    /// Country with the most circuits and how many it has
    pub most_circuits: Option<(String, usize)>,
    pub highest: Option<AltitudeMark>,
    pub lowest: Option<AltitudeMark>,
    /// Rounded to whole metres
    pub mean_altitude: Option<i64>,
}

impl CircuitSummary {
    pub fn from_circuits(circuits: &[Circuit]) -> Self {
        let mut per_country: BTreeMap<&str, usize> = BTreeMap::new();
        for country in circuits.iter().filter_map(|c| c.country.as_deref()) {
            *per_country.entry(country).or_default() += 1;
        }

        // Ties go to the alphabetically first country.
        let mut most_circuits: Option<(&str, usize)> = None;
        for (country, count) in &per_country {
            if most_circuits.is_none_or(|(_, best)| *count > best) {
                most_circuits = Some((country, *count));
            }
        }

        let with_alt: Vec<(&Circuit, f64)> = circuits
            .iter()
            .filter_map(|c| c.alt.map(|alt| (c, alt)))
            .collect();

        let mut highest: Option<(&Circuit, f64)> = None;
        let mut lowest: Option<(&Circuit, f64)> = None;
        for &(circuit, alt) in &with_alt {
            if highest.is_none_or(|(_, best)| alt > best) {
                highest = Some((circuit, alt));
            }
            if lowest.is_none_or(|(_, best)| alt < best) {
                lowest = Some((circuit, alt));
            }
        }

        let mean_altitude = (!with_alt.is_empty()).then(|| {
            let total: f64 = with_alt.iter().map(|(_, alt)| alt).sum();
            (total / with_alt.len() as f64).round() as i64
        });

        Self {
            circuits: circuits.len(),
            countries: per_country.len(),
            most_circuits: most_circuits.map(|(country, count)| (country.to_string(), count)),
            highest: highest.map(mark),
            lowest: lowest.map(mark),
            mean_altitude,
        }
    }
}

fn mark((circuit, alt): (&Circuit, f64)) -> AltitudeMark {
    AltitudeMark {
        name: circuit.name.clone(),
        country: circuit.country.clone(),
        alt,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FastestLap {
    pub time: String,
    pub milliseconds: u64,
    pub lap: u32,
    pub year: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LapSummary {
    /// Distinct lap numbers tracked
    pub laps: usize,
    pub fastest: Option<FastestLap>,
    pub mean_time: Option<String>,
}

impl LapSummary {
    pub fn from_laps(laps: &[LapTime]) -> Result<Self, TransformError> {
        let distinct: HashSet<u32> = laps.iter().map(|l| l.lap).collect();

        let fastest = laps
            .iter()
            .reduce(|best, lap| if lap.milliseconds < best.milliseconds { lap } else { best })
            .map(|lap| FastestLap {
                time: lap.time.clone(),
                milliseconds: lap.milliseconds,
                lap: lap.lap,
                year: lap.race.as_ref().map(|r| r.year),
            });

        let times: Vec<&str> = laps.iter().map(|l| l.time.as_str()).collect();

        Ok(Self {
            laps: distinct.len(),
            fastest,
            mean_time: mean_lap_time(&times)?,
        })
    }
}
