//! vpsview - terminal data viewer for the VPS motorsport statistics API

use clap::Parser;
use log::{LevelFilter, debug};

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod output;
mod transform;

use cli::{Cli, Commands, GlobalOptions, Session};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if debug {
        builder.filter_module("vpsview", LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);
    debug!("Global options: {:?}", opts);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Page(ref page) => {
            let session = Session::new(&opts)?;
            cli::run_page(&session, page).await
        }
        Commands::Shell => cli::shell::run(&opts).await,
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
    }
}
