//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "vpsview Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;

    match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            println!();
            print_api_url(opts.api_url_ref(), &config);
            println!(
                "{} Default page size: {}",
                "○".dimmed(),
                config.preferences.page_size
            );
            if let Some(ref format) = config.preferences.format {
                println!("{} Default format: {}", "○".dimmed(), format);
            }
            println!();
        }
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            if let Some(url) = opts.api_url_ref() {
                println!("{} API URL from --api-url: {}", "✓".green(), url.cyan());
            }
            println!();
            println!("Run {} to create a configuration file.", "vpsview init".cyan());
            println!();
        }
    }

    Ok(())
}

fn print_api_url(override_url: Option<&str>, config: &Config) {
    match (override_url, config.require_api_url()) {
        (Some(url), _) => println!(
            "{} API URL: {} {}",
            "✓".green(),
            url.cyan(),
            "(override)".dimmed()
        ),
        (None, Ok(url)) => println!("{} API URL: {}", "✓".green(), url.cyan()),
        (None, Err(_)) => {
            println!("{} API URL not configured", "✗".red());
            println!("  → Run 'vpsview init' to configure");
        }
    }
}
