//! Driver lap performance command

use colored::Colorize;
use serde::Serialize;

use crate::cli::{LapsArgs, OutputFormat, Session, resolve};
use crate::client::{LapTime, QuerySpec, StatsApi};
use crate::error::{ApiError, Error, Result};
use crate::output::{json, table};
use crate::transform::{ColumnSpec, LapSummary, Row, Tabular, flatten};

const LAP_COLUMNS: &[&str] = &["lap", "position", "time", "milliseconds"];
const LAP_COLUMNS_ACROSS_SEASONS: &[&str] =
    &["lap", "position", "time", "milliseconds", "formatted_time", "race_year"];

/// Lap times for one driver at one circuit, optionally one season
pub fn lap_query(driver_id: u32, circuit: &str, year: Option<u16>) -> QuerySpec {
    let mut query = QuerySpec::new()
        .page_size(1000)
        .filter(format!("driverId={}", driver_id))
        .scoped_filter(format!("race.circuit.name={}", circuit));

    if let Some(year) = year {
        query = query.scoped_filter(format!("race.year={}", year));
    }

    query
}

/// Default columns; without a year the season column distinguishes the series.
pub fn default_columns(year: Option<u16>) -> ColumnSpec {
    match year {
        Some(_) => ColumnSpec::only(LAP_COLUMNS),
        None => ColumnSpec::only(LAP_COLUMNS_ACROSS_SEASONS),
    }
}

#[derive(Debug, Serialize)]
pub struct LapReport {
    pub driver: String,
    pub circuit: String,
    pub year: Option<u16>,
    pub summary: LapSummary,
    pub laps: Vec<Row>,
}

/// Resolve the selection, fetch the laps and build the report.
pub async fn fetch_report<A: StatsApi>(
    session: &Session<A>,
    args: &LapsArgs,
) -> Result<LapReport> {
    let driver_arg = args
        .driver
        .as_deref()
        .ok_or_else(|| Error::Other("Please select a driver to fetch lap times for.".to_string()))?;
    let circuit_arg = args
        .circuit
        .as_deref()
        .ok_or_else(|| {
            Error::Other("Please select a circuit to fetch lap times for.".to_string())
        })?;

    let spec = ColumnSpec::or(args.columns.as_deref(), default_columns(args.year));
    spec.resolve(LapTime::COLUMNS)?;

    let driver = resolve::driver(session, driver_arg).await?;
    let circuit = resolve::circuit(session, circuit_arg).await?;

    let query = lap_query(driver.id, &circuit, args.year);
    let laps = session
        .fetching("Fetching lap times...", session.client.list_lap_times(&query))
        .await?
        .records;

    if laps.is_empty() {
        let message = "No data available for the selected filters.".to_string();
        return Err(ApiError::EmptyResult(message).into());
    }

    Ok(LapReport {
        driver: driver.name,
        circuit,
        year: args.year,
        summary: LapSummary::from_laps(&laps)?,
        laps: flatten(&laps, &spec)?,
    })
}

/// Run the laps command
pub async fn run<A: StatsApi>(session: &Session<A>, args: &LapsArgs) -> Result<()> {
    let report = fetch_report(session, args).await?;

    match session.format {
        OutputFormat::Json => println!("{}", json::format_json(&report)?),
        OutputFormat::Table => println!("{}", table::format_rows(&report.laps)),
        OutputFormat::Pretty => {
            let scope = match report.year {
                Some(year) => format!("{} at {} ({})", report.driver, report.circuit, year),
                None => format!("{} at {}", report.driver, report.circuit),
            };
            println!("{}\n", scope.bold());

            let summary = &report.summary;
            println!("  {:<18}{}", "Laps tracked", summary.laps.to_string().cyan());
            if let Some(ref fastest) = summary.fastest {
                let year = fastest.year.map(|y| format!("(Year: {})", y)).unwrap_or_default();
                println!("  {:<18}{} {}", "Fastest lap", fastest.time.cyan(), year.dimmed());
            }
            if let Some(ref mean) = summary.mean_time {
                println!("  {:<18}{}", "Average lap time", mean.cyan());
            }
            println!();
            println!("{}", table::format_rows(&report.laps));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockStatsApi;
    use crate::client::mock::fixtures::{circuit, driver, lap, race};
    use crate::config::Config;

    fn args(driver: Option<&str>, circuit: Option<&str>, year: Option<u16>) -> LapsArgs {
        LapsArgs {
            driver: driver.map(String::from),
            circuit: circuit.map(String::from),
            year,
            columns: None,
        }
    }

    fn session(laps: Vec<LapTime>) -> Session<MockStatsApi> {
        let mock = MockStatsApi::new()
            .with_drivers(vec![driver(1, "Lewis", "Hamilton")])
            .with_circuits(vec![circuit(9, "Silverstone Circuit", "UK", 153.0)])
            .with_lap_times(laps);
        Session::with_client(Config::default(), mock, OutputFormat::Json, true)
    }

    fn british_laps() -> Vec<LapTime> {
        let silverstone = circuit(9, "Silverstone Circuit", "UK", 153.0);
        let r2019 = race(1018, 2019, "British Grand Prix", Some(silverstone.clone()));
        let r2020 = race(1036, 2020, "British Grand Prix", Some(silverstone));
        vec![
            lap(1, 91_000, Some(r2019.clone())),
            lap(2, 89_000, Some(r2019)),
            lap(1, 88_500, Some(r2020)),
        ]
    }

    #[test]
    fn test_lap_query() {
        assert_eq!(
            lap_query(1, "Silverstone Circuit", Some(2020)).to_query_string(),
            "page=1&pageSize=1000&filter=driverId=1,race.circuit.name=Silverstone%20Circuit,race.year=2020"
        );
        assert_eq!(
            lap_query(1, "Silverstone Circuit", None).filter.as_deref(),
            Some("driverId=1,race.circuit.name=Silverstone Circuit")
        );
    }

    #[tokio::test]
    async fn test_missing_driver_message() {
        let err = fetch_report(&session(vec![]), &args(None, Some("Silverstone Circuit"), None))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please select a driver to fetch lap times for.");
    }

    #[tokio::test]
    async fn test_missing_circuit_message() {
        let err = fetch_report(&session(vec![]), &args(Some("Lewis Hamilton"), None, None))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please select a circuit to fetch lap times for.");
    }

    #[tokio::test]
    async fn test_empty_result() {
        let err = fetch_report(
            &session(vec![]),
            &args(Some("Lewis Hamilton"), Some("Silverstone Circuit"), Some(2023)),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::EmptyResult(_))));
        assert_eq!(err.to_string(), "No data available for the selected filters.");
    }

    #[tokio::test]
    async fn test_report_across_seasons() {
        let session = session(british_laps());
        let selection = args(Some("lewis hamilton"), Some("Silverstone Circuit"), None);
        let report = fetch_report(&session, &selection).await.unwrap();

        assert_eq!(report.driver, "Lewis Hamilton");
        assert_eq!(report.summary.laps, 2);
        assert_eq!(report.summary.fastest.as_ref().and_then(|f| f.year), Some(2020));
        assert_eq!(report.summary.mean_time.as_deref(), Some("1:29.500"));
        assert_eq!(
            report.laps[0].columns().collect::<Vec<_>>(),
            LAP_COLUMNS_ACROSS_SEASONS.to_vec()
        );

        let queries = session.client.inner().captured_queries().await;
        let laps_query = queries.iter().find(|q| q.method == "list_lap_times").unwrap();
        assert!(
            laps_query
                .query_string
                .contains("filter=driverId=1,race.circuit.name=Silverstone%20Circuit")
        );
    }

    #[tokio::test]
    async fn test_report_for_one_year_uses_plain_columns() {
        let report = fetch_report(
            &session(british_laps()),
            &args(Some("1"), Some("Silverstone Circuit"), Some(2019)),
        )
        .await
        .unwrap();

        assert_eq!(report.laps[0].columns().collect::<Vec<_>>(), LAP_COLUMNS.to_vec());
    }
}
