//! Driver command implementations

use colored::Colorize;
use serde::Serialize;

use crate::cli::handlers::run_query_command;
use crate::cli::{OutputFormat, QueryArgs, Session};
use crate::client::{DriverStanding, QuerySpec, SortOrder, StatsApi};
use crate::error::{ApiError, Result};
use crate::output::formatters::format_points;
use crate::output::{json, table};

/// Single best standing by `column`, descending
pub fn leader_query(column: &str) -> QuerySpec {
    QuerySpec::new()
        .page_size(1)
        .sort_by(column)
        .order(SortOrder::Desc)
}

/// One season record holder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leader {
    pub category: &'static str,
    pub driver: String,
    pub value: String,
    pub year: Option<u16>,
}

impl Leader {
    fn from_standing(category: &'static str, standing: &DriverStanding, value: String) -> Self {
        Self {
            category,
            driver: standing
                .driver
                .as_ref()
                .map(|d| d.full_name())
                .unwrap_or_else(|| format!("Driver {}", standing.driver_id)),
            value,
            year: standing.race.as_ref().map(|r| r.year),
        }
    }
}

async fn top_standing<A: StatsApi>(session: &Session<A>, column: &str) -> Result<DriverStanding> {
    session
        .client
        .list_standings(&leader_query(column))
        .await?
        .records
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::EmptyResult("No driver standings found.".to_string()).into())
}

/// Most points and most wins in a single season
pub async fn fetch_leaders<A: StatsApi>(session: &Session<A>) -> Result<Vec<Leader>> {
    let (points, wins) = session
        .fetching("Fetching driver standings...", async {
            futures::try_join!(top_standing(session, "points"), top_standing(session, "wins"))
        })
        .await?;

    Ok(vec![
        Leader::from_standing("Most points in a season", &points, format_points(points.points)),
        Leader::from_standing("Most wins in a season", &wins, wins.wins.to_string()),
    ])
}

/// Run the drivers leaders command
pub async fn leaders<A: StatsApi>(session: &Session<A>) -> Result<()> {
    let leaders = fetch_leaders(session).await?;

    match session.format {
        OutputFormat::Json => println!("{}", json::format_json(&leaders)?),
        OutputFormat::Table => {
            let pairs: Vec<(String, String)> = leaders
                .iter()
                .map(|l| (l.category.to_string(), describe(l)))
                .collect();
            println!("{}", table::format_pairs(("Record", "Holder"), &pairs));
        }
        OutputFormat::Pretty => {
            println!("{}\n", "Season Records".bold());
            for leader in &leaders {
                println!("  {}", leader.category.bold());
                println!("    {} {}", leader.driver.green(), leader.value.cyan());
                if let Some(year) = leader.year {
                    println!("    {}", format!("Achieved in {}", year).dimmed());
                }
            }
        }
    }

    Ok(())
}

fn describe(leader: &Leader) -> String {
    match leader.year {
        Some(year) => format!("{} ({}, {})", leader.driver, leader.value, year),
        None => format!("{} ({})", leader.driver, leader.value),
    }
}

/// Run the drivers query command
pub async fn query<A: StatsApi>(session: &Session<A>, args: &QueryArgs) -> Result<()> {
    run_query_command::<DriverStanding, _, _, _>(
        session,
        args,
        "driver standings",
        |query| async move { session.client.list_standings(&query).await },
    )
    .await
}
