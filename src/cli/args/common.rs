//! Common CLI types shared across commands

use crate::client::SortOrder;

/// Sort direction for query commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortDir {
    /// Ascending order
    #[default]
    Asc,
    /// Descending order
    Desc,
}

impl From<SortDir> for SortOrder {
    fn from(dir: SortDir) -> Self {
        match dir {
            SortDir::Asc => SortOrder::Asc,
            SortDir::Desc => SortOrder::Desc,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - headline metrics, headings and tables
    #[default]
    Pretty,
    /// Table format - tables only, no decoration
    Table,
    /// JSON format - structured for scripts
    Json,
}
