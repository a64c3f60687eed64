//! Side-by-side lap comparison of two drivers

use colored::Colorize;
use serde::Serialize;

use crate::cli::resolve::{self, DriverPick};
use crate::cli::{CompareArgs, OutputFormat, Session};
use crate::client::{CircuitLapSummary, StatsApi};
use crate::error::{Error, Result};
use crate::output::{json, table};
use crate::transform::{ColumnSpec, Row, flatten};

const COMPARE_COLUMNS: &[&str] = &["track", "meanTime", "fastestTime"];

/// One driver's half of the comparison. A side that failed carries the
/// error text instead of rows, so the other side is still shown.
#[derive(Debug, Serialize)]
pub struct CompareSide {
    pub driver: String,
    pub driver_id: Option<u32>,
    pub rows: Vec<Row>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompareSide {
    fn failed(driver: String, driver_id: Option<u32>, error: String) -> Self {
        Self {
            driver,
            driver_id,
            rows: Vec::new(),
            error: Some(error),
        }
    }

    /// Warning to show in place of the table, if any
    pub fn warning(&self) -> Option<String> {
        match self.error {
            Some(ref error) => Some(error.clone()),
            None if self.rows.is_empty() => Some(format!("No lap times found for {}", self.driver)),
            None => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Comparison {
    pub year: Option<u16>,
    pub drivers: Vec<CompareSide>,
}

fn side_from(pick: DriverPick, fetched: Result<Vec<CircuitLapSummary>>) -> CompareSide {
    let spec = ColumnSpec::only(COMPARE_COLUMNS);
    let rows = fetched.and_then(|summary| flatten(&summary, &spec).map_err(Error::from));

    match rows {
        Ok(rows) => CompareSide {
            driver: pick.name,
            driver_id: Some(pick.id),
            rows,
            error: None,
        },
        Err(e) => {
            let message = format!("Failed to fetch lap times for {}: {}", pick.name, e);
            CompareSide::failed(pick.name, Some(pick.id), message)
        }
    }
}

/// Resolve both drivers and fetch their per-circuit summaries concurrently.
///
/// Only missing arguments fail the whole comparison. Resolution or fetch
/// errors are confined to their own side.
pub async fn fetch_comparison<A: StatsApi>(
    session: &Session<A>,
    args: &CompareArgs,
) -> Result<Comparison> {
    let first = args
        .first
        .as_deref()
        .ok_or_else(|| {
            Error::Other("Please select the first driver to fetch lap times for.".to_string())
        })?;
    let second = args
        .second
        .as_deref()
        .ok_or_else(|| {
            Error::Other("Please select the second driver to fetch lap times for.".to_string())
        })?;

    let first_pick = resolve::driver(session, first).await;
    let second_pick = resolve::driver(session, second).await;

    let (first_side, second_side) = match (first_pick, second_pick) {
        (Ok(a), Ok(b)) => {
            let (fa, fb) = session
                .fetching("Fetching lap times...", async {
                    Ok(futures::join!(
                        session.client.driver_lap_summary(a.id, args.year),
                        session.client.driver_lap_summary(b.id, args.year)
                    ))
                })
                .await?;
            (side_from(a, fa), side_from(b, fb))
        }
        (Ok(a), Err(e)) => {
            let fa = session.client.driver_lap_summary(a.id, args.year).await;
            (side_from(a, fa), CompareSide::failed(second.to_string(), None, e.to_string()))
        }
        (Err(e), Ok(b)) => {
            let fb = session.client.driver_lap_summary(b.id, args.year).await;
            (CompareSide::failed(first.to_string(), None, e.to_string()), side_from(b, fb))
        }
        (Err(ea), Err(eb)) => (
            CompareSide::failed(first.to_string(), None, ea.to_string()),
            CompareSide::failed(second.to_string(), None, eb.to_string()),
        ),
    };

    Ok(Comparison {
        year: args.year,
        drivers: vec![first_side, second_side],
    })
}

/// Run the compare command
pub async fn run<A: StatsApi>(session: &Session<A>, args: &CompareArgs) -> Result<()> {
    let comparison = fetch_comparison(session, args).await?;

    if session.format == OutputFormat::Json {
        println!("{}", json::format_json(&comparison)?);
        return Ok(());
    }

    for (index, side) in comparison.drivers.iter().enumerate() {
        if index > 0 {
            println!();
        }
        let heading = match comparison.year {
            Some(year) => format!("{} ({})", side.driver, year),
            None => side.driver.clone(),
        };
        println!("{}", heading.bold());

        match side.warning() {
            Some(warning) => println!("{} {}", "⚠".yellow(), warning.yellow()),
            None => println!("{}", table::format_rows(&side.rows)),
        }
    }

    Ok(())
}
