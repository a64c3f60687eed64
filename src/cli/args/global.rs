//! Global CLI options shared across all commands

use clap::ValueEnum;

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// Precedence is CLI flag > environment variable > config file > default.
/// This struct captures the CLI/env layer; the config file is folded in when
/// a [`Session`](crate::cli::Session) is built.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format from `--format`/`VPSVIEW_FORMAT`, if given
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.vpsview/config.yaml)
    pub config: Option<String>,

    /// API base URL override (bypasses config file)
    pub api_url: Option<String>,

    /// Bypass the response cache
    pub no_cache: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_url: cli.api_url.clone(),
            no_cache: cli.no_cache,
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn api_url_ref(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    /// The requested format, falling back to the config preference, then pretty.
    ///
    /// An unrecognized preference is ignored.
    pub fn resolve_format(&self, preference: Option<&str>) -> OutputFormat {
        self.format
            .or_else(|| preference.and_then(|p| OutputFormat::from_str(p.trim(), true).ok()))
            .unwrap_or_default()
    }
}
