//! Circuits command

use colored::Colorize;
use serde::Serialize;

use crate::cli::resolve::circuit_list_query;
use crate::cli::{CircuitsArgs, OutputFormat, Session};
use crate::client::{Circuit, StatsApi};
use crate::error::Result;
use crate::output::formatters::{format_altitude, format_count};
use crate::output::{Formattable, json, table};
use crate::transform::{CircuitSummary, ColumnSpec, Row, flatten};

const LOCATION_COLUMNS: &[&str] = &["name", "lat", "lng"];

#[derive(Serialize)]
struct CircuitsOutput<'a> {
    summary: &'a CircuitSummary,
    circuits: &'a [Row],
}

/// Flatten circuits into the location table or the (projected) full table
pub fn circuit_rows(circuits: &[Circuit], args: &CircuitsArgs) -> Result<Vec<Row>> {
    let spec = if args.locations {
        ColumnSpec::only(LOCATION_COLUMNS)
    } else {
        ColumnSpec::or(args.columns.as_deref(), ColumnSpec::all())
    };
    Ok(flatten(circuits, &spec)?)
}

/// Headline metrics as `(label, value, detail)`
pub fn summary_lines(summary: &CircuitSummary) -> Vec<(&'static str, String, Option<String>)> {
    let mut lines = vec![
        ("Circuits", format_count(summary.circuits as u64), None),
        ("Countries", format_count(summary.countries as u64), None),
    ];

    if let Some((ref country, count)) = summary.most_circuits {
        lines.push(("Most circuits", country.clone(), Some(format!("{} circuits", count))));
    }
    if let Some(ref high) = summary.highest {
        lines.push(("Highest altitude", format_altitude(high.alt), high.country.clone()));
    }
    if let Some(ref low) = summary.lowest {
        lines.push(("Lowest altitude", format_altitude(low.alt), low.country.clone()));
    }
    if let Some(mean) = summary.mean_altitude {
        lines.push(("Mean altitude", format!("{} m", mean), None));
    }

    lines
}

/// Run the circuits command
pub async fn run<A: StatsApi>(session: &Session<A>, args: &CircuitsArgs) -> Result<()> {
    let circuits = session
        .fetching("Fetching circuits...", session.client.list_circuits(&circuit_list_query()))
        .await?
        .records;

    let rows = circuit_rows(&circuits, args)?;
    let summary = CircuitSummary::from_circuits(&circuits);

    match session.format {
        OutputFormat::Json => {
            let output = CircuitsOutput {
                summary: &summary,
                circuits: &rows,
            };
            println!("{}", json::format_json(&output)?);
        }
        OutputFormat::Table => rows.print(session.format)?,
        OutputFormat::Pretty => {
            println!("{}\n", "Circuits".bold());
            for (label, value, detail) in summary_lines(&summary) {
                match detail {
                    Some(detail) => {
                        let detail = format!("({})", detail);
                        println!("  {:<18}{} {}", label, value.cyan(), detail.dimmed())
                    }
                    None => println!("  {:<18}{}", label, value.cyan()),
                }
            }
            println!();
            let heading = if args.locations { "Circuit Locations" } else { "Circuit Data" };
            println!("{}", heading.bold());
            println!("{}", table::format_rows(&rows));
        }
    }

    Ok(())
}
