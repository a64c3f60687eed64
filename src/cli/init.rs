//! Init command implementation

use colored::Colorize;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::client::{StatsApi, VpsClient};
use crate::config::Config;
use crate::error::Result;
use crate::output::formatters::format_count;

/// Run the init command
///
/// Prompts for the API base URL (prefilled from `--api-url` or the existing
/// config), checks it answers the database metrics endpoint, and writes the config file.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to vpsview!".bold().green());
    println!("Let's point vpsview at your statistics API.\n");

    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();
    let initial = opts
        .api_url_ref()
        .map(String::from)
        .or_else(|| config.api_url.clone());

    let theme = ColorfulTheme::default();
    let mut prompt = Input::<String>::with_theme(&theme).with_prompt("API base URL");
    if let Some(url) = initial {
        prompt = prompt.with_initial_text(url);
    }
    let api_url = prompt.interact_text()?.trim().trim_end_matches('/').to_string();

    println!("\n{}", "Checking connection...".cyan());
    match probe(&api_url).await {
        Ok(rows) => println!(
            "{} Connected ({} rows across all tables)",
            "✓".green(),
            format_count(rows)
        ),
        Err(e) => {
            println!("{} {}", "⚠".yellow(), e.to_string().yellow());
            let keep = Confirm::with_theme(&theme)
                .with_prompt("Save this URL anyway?")
                .default(false)
                .interact()?;
            if !keep {
                println!("Configuration not saved.");
                return Ok(());
            }
        }
    }

    config.api_url = Some(api_url);
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show table row counts", "vpsview metrics".cyan());
    println!("  {} - Start an interactive session", "vpsview shell".cyan());

    Ok(())
}

async fn probe(api_url: &str) -> Result<u64> {
    let client = VpsClient::new(api_url)?;
    let metrics = client.database_metrics().await?;
    Ok(metrics.values().sum())
}
