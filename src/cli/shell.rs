//! Interactive shell
//!
//! Reads one command per line and runs it against a single long-lived
//! [`Session`], so repeated lookups within the TTL are served from the cache.

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use colored::Colorize;
use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::cli::args::GlobalOptions;
use crate::cli::{PageCommand, Session, cache, run_page};
use crate::client::StatsApi;
use crate::error::{Error, Result};

/// One line typed at the `vpsview>` prompt
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    #[command(flatten)]
    Page(PageCommand),

    /// Inspect or clear this session's response cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Entry counts and TTL
    Status,
    /// Drop every cached response
    Clear,
}

/// What the loop should do after a line
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Split a line into words. Single or double quotes group words containing spaces.
pub fn split_line(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(Error::Other("Unterminated quote".to_string()));
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}

/// Parse and run one line.
///
/// Parse errors and help output are printed here and never end the session.
pub async fn execute_line<A: StatsApi>(session: &Session<A>, line: &str) -> Result<Flow> {
    let words = split_line(line)?;
    if words.is_empty() {
        return Ok(Flow::Continue);
    }

    let parsed = match ShellLine::try_parse_from(&words) {
        Ok(parsed) => parsed,
        Err(e) => {
            e.print()?;
            return Ok(Flow::Continue);
        }
    };
    debug!("Shell command: {:?}", parsed.command);

    match parsed.command {
        ShellCommand::Page(page) => run_page(session, &page).await?,
        ShellCommand::Cache(CacheCommands::Status) => cache::status(session)?,
        ShellCommand::Cache(CacheCommands::Clear) => cache::clear(session)?,
        ShellCommand::Exit => return Ok(Flow::Exit),
    }

    Ok(Flow::Continue)
}

/// Read lines from `input` until `exit` or end of input.
pub async fn run_loop<A, R>(session: &Session<A>, input: R) -> Result<()>
where
    A: StatsApi,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    loop {
        print!("{} ", "vpsview>".bold());
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match execute_line(session, &line).await {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => eprintln!("{} {}", "Error:".red(), e),
        }
    }

    Ok(())
}

/// Run the shell command
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let session = Session::new(opts)?;

    println!("{}", "vpsview interactive shell".bold());
    println!(
        "Type a command such as {} or {}.",
        "metrics".cyan(),
        "drivers leaders".cyan()
    );
    println!("{} lists commands, {} leaves.\n", "help".cyan(), "exit".cyan());

    run_loop(&session, BufReader::new(tokio::io::stdin())).await
}
