//! Race command implementations

use chrono::{Local, NaiveDate};
use colored::Colorize;

use crate::cli::handlers::run_query_command;
use crate::cli::{OutputFormat, QueryArgs, Session};
use crate::client::{QuerySpec, Race, SortOrder, StatsApi};
use crate::error::{ApiError, Result};
use crate::output::Formattable;
use crate::transform::{ColumnSpec, flatten};

const NEXT_RACE_COLUMNS: &[&str] = &["name", "round", "date", "time", "location", "circuit"];

/// First race dated after `today`
pub fn next_race_query(today: NaiveDate) -> QuerySpec {
    QuerySpec::new()
        .page_size(1)
        .filter(format!("date>{}", today.format("%Y-%m-%d")))
        .sort_by("date")
        .order(SortOrder::Asc)
}

/// Run the races next command
pub async fn next<A: StatsApi>(session: &Session<A>) -> Result<()> {
    let query = next_race_query(Local::now().date_naive());
    let race = session
        .fetching("Fetching next race...", session.client.list_races(&query))
        .await?
        .records
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::EmptyResult("No upcoming race found.".to_string()))?;

    match session.format {
        OutputFormat::Pretty => print_next_race(&race),
        format => {
            let spec = ColumnSpec::only(NEXT_RACE_COLUMNS);
            flatten(std::slice::from_ref(&race), &spec)?.print(format)?
        }
    }

    Ok(())
}

fn print_next_race(race: &Race) {
    let circuit = race.circuit.as_ref();
    let field = |value: Option<&str>| value.unwrap_or("-").to_string();

    println!("{} {}\n", "Next Race:".bold(), race.name.bold().green());
    println!("  {:<10}{}", "Round", race.round.to_string().cyan());
    println!("  {:<10}{}", "Date", race.date_only().cyan());
    println!("  {:<10}{}", "Time", field(race.time.as_deref()).cyan());
    println!(
        "  {:<10}{}",
        "Location",
        field(circuit.and_then(|c| c.location.as_deref())).cyan()
    );
    println!(
        "  {:<10}{}",
        "Circuit",
        field(circuit.map(|c| c.name.as_str())).cyan()
    );
}

/// Run the races query command
pub async fn query<A: StatsApi>(session: &Session<A>, args: &QueryArgs) -> Result<()> {
    run_query_command::<Race, _, _, _>(session, args, "races", |query| async move {
        session.client.list_races(&query).await
    })
    .await
}
