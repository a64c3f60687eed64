//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};
pub use clap_complete::Shell;

use crate::client::StatsApi;
use crate::error::Result;

pub mod args;
pub mod cache;
pub mod circuit;
pub mod compare;
pub mod completions;
pub mod driver;
pub mod handlers;
pub mod init;
pub mod laps;
pub mod metrics;
pub mod race;
pub mod resolve;
pub mod session;
pub mod shell;
pub mod status;

pub use args::{GlobalOptions, OutputFormat, QueryArgs};
pub use session::Session;

/// vpsview - terminal data viewer for the VPS motorsport statistics API
#[derive(Parser, Debug)]
#[command(name = "vpsview")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json) [default: config preference, else pretty]
    #[arg(
        long,
        global = true,
        env = "VPSVIEW_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// API base URL (overrides the config file)
    #[arg(long, global = true, env = "VPSVIEW_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Override config file location
    #[arg(long, global = true, env = "VPSVIEW_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "VPSVIEW_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass cache, fetch fresh data from API
    #[arg(long, global = true, env = "VPSVIEW_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize vpsview configuration
    Init,

    /// Show configuration status
    Status,

    #[command(flatten)]
    Page(PageCommand),

    /// Start an interactive session that shares one response cache
    Shell,

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   vpsview completion bash > /etc/bash_completion.d/vpsview
  zsh:    vpsview completion zsh > \"${fpath[1]}/_vpsview\"
  fish:   vpsview completion fish > ~/.config/fish/completions/vpsview.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Commands that fetch and display data. Available both one-shot and in `shell`.
#[derive(Subcommand, Debug, Clone)]
pub enum PageCommand {
    /// Row counts per database table
    Metrics,

    /// All circuits with altitude and country metrics
    Circuits(CircuitsArgs),

    /// Race events
    #[command(subcommand)]
    Races(RacesCommands),

    /// Drivers and season standings
    #[command(subcommand)]
    Drivers(DriversCommands),

    /// Lap times of one driver at one circuit
    #[command(after_help = "EXAMPLES:\n  \
        vpsview laps --driver \"Lewis Hamilton\" --circuit \"Silverstone Circuit\"\n  \
        vpsview laps --driver 1 --circuit \"Silverstone Circuit\" --year 2020")]
    Laps(LapsArgs),

    /// Mean and fastest lap per circuit for two drivers, side by side
    #[command(after_help = "EXAMPLES:\n  \
        vpsview compare \"Lewis Hamilton\" \"Max Verstappen\"\n  \
        vpsview compare 1 830 --year 2021")]
    Compare(CompareArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CircuitsArgs {
    /// Show only name and coordinates
    #[arg(long, short = 'l')]
    pub locations: bool,

    /// Columns to keep, comma-separated (e.g. `name,country,alt`)
    #[arg(long, short = 'c', conflicts_with = "locations")]
    pub columns: Option<String>,
}

/// Race subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum RacesCommands {
    /// The next race after today
    Next,

    /// Custom query against the races collection
    #[command(after_help = "EXAMPLES:\n  \
        vpsview races query --filter year=2023 --sort round\n  \
        vpsview races query --where circuit.location=Silverstone --columns raceId,year,round")]
    Query(QueryArgs),
}

/// Driver subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum DriversCommands {
    /// Most points and most wins in a single season
    Leaders,

    /// Custom query against the driver standings collection
    #[command(after_help = "EXAMPLES:\n  \
        vpsview drivers query --filter race.year=2023,driver.code=ALB\n  \
        vpsview drivers query --sort points --order desc --columns race,driver,points,wins")]
    Query(QueryArgs),
}

#[derive(Args, Debug, Clone)]
pub struct LapsArgs {
    /// Driver name ("Forename Surname") or driver id
    #[arg(long, short = 'd')]
    pub driver: Option<String>,

    /// Circuit name
    #[arg(long, short = 'c')]
    pub circuit: Option<String>,

    /// Only laps from this season (1950-9999)
    #[arg(long, short = 'y', value_parser = args::parse_year)]
    pub year: Option<u16>,

    /// Columns to keep, comma-separated (e.g. `lap,time`)
    #[arg(long)]
    pub columns: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// First driver name or id
    pub first: Option<String>,

    /// Second driver name or id
    pub second: Option<String>,

    /// Only laps from this season (1950-9999)
    #[arg(long, short = 'y', value_parser = args::parse_year)]
    pub year: Option<u16>,
}

/// Run one page command against a session.
pub async fn run_page<A: StatsApi>(session: &Session<A>, command: &PageCommand) -> Result<()> {
    match command {
        PageCommand::Metrics => metrics::run(session).await,
        PageCommand::Circuits(args) => circuit::run(session, args).await,
        PageCommand::Races(RacesCommands::Next) => race::next(session).await,
        PageCommand::Races(RacesCommands::Query(query)) => race::query(session, query).await,
        PageCommand::Drivers(DriversCommands::Leaders) => driver::leaders(session).await,
        PageCommand::Drivers(DriversCommands::Query(query)) => driver::query(session, query).await,
        PageCommand::Laps(args) => laps::run(session, args).await,
        PageCommand::Compare(args) => compare::run(session, args).await,
    }
}
