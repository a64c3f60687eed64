//! Shell completion script generation

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::Cli;

/// Write the completion script for `shell` to `out`
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, out);
}

/// Run the completion command
pub fn run(shell: Shell) {
    write_completions(shell, &mut io::stdout());
}
