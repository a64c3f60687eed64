//! Database metrics command

use colored::Colorize;

use crate::cli::{OutputFormat, Session};
use crate::client::{DatabaseMetrics, StatsApi};
use crate::error::Result;
use crate::output::formatters::{format_count, title_label};
use crate::output::{json, table};

/// `(label, formatted count)` in table name order
pub fn metric_pairs(metrics: &DatabaseMetrics) -> Vec<(String, String)> {
    metrics
        .iter()
        .map(|(table, count)| (title_label(table), format_count(*count)))
        .collect()
}

/// Run the metrics command
pub async fn run<A: StatsApi>(session: &Session<A>) -> Result<()> {
    let metrics = session
        .fetching("Fetching database metrics...", session.client.database_metrics())
        .await?;

    match session.format {
        OutputFormat::Json => println!("{}", json::format_json(&metrics)?),
        OutputFormat::Table => {
            let pairs = metric_pairs(&metrics);
            println!("{}", table::format_pairs(("Table", "Rows"), &pairs));
        }
        OutputFormat::Pretty => {
            println!("{}\n", "Database Table Counts".bold());
            let pairs = metric_pairs(&metrics);
            let width = pairs.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
            for (label, count) in pairs {
                println!("  {:<width$}  {}", label, count.cyan(), width = width);
            }
        }
    }

    Ok(())
}
