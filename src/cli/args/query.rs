//! Custom query arguments for the `races query` and `drivers query` commands

use clap::Args;

use super::SortDir;
use crate::client::QuerySpec;
use crate::client::query::MAX_PAGE_SIZE;

/// Page, sort, filter and column options of a custom query.
///
/// Flatten this into any command that runs a free-form list query:
/// ```ignore
/// Query {
///     #[command(flatten)]
///     query: QueryArgs,
/// }
/// ```
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Page number to fetch
    #[arg(
        long,
        short = 'p',
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub page: u32,

    /// Records per page (1-1000) [default: config page_size, else 10]
    #[arg(
        long,
        short = 'n',
        value_parser = clap::value_parser!(u32).range(1..=MAX_PAGE_SIZE as i64)
    )]
    pub page_size: Option<u32>,

    /// Column to sort by
    #[arg(long, short = 's')]
    pub sort: Option<String>,

    /// Sort order
    #[arg(long, short = 'o', value_enum, default_value_t = SortDir::Asc)]
    pub order: SortDir,

    /// Filter expression, comma-separated (e.g. `year=2023,circuit.location=Silverstone`)
    #[arg(long, short = 'f')]
    pub filter: Option<String>,

    /// Extra `field=value` filter appended to --filter (repeatable)
    #[arg(long = "where", short = 'w', value_name = "FIELD=VALUE")]
    pub scoped: Vec<String>,

    /// Columns to keep, comma-separated (e.g. `raceId,year,round`)
    #[arg(long, short = 'c')]
    pub columns: Option<String>,

    /// Show the response metadata above the table
    #[arg(long, short = 'm')]
    pub metadata: bool,
}

impl QueryArgs {
    /// Build the query, falling back to `default_page_size` when `--page-size` is absent.
    pub fn to_query(&self, default_page_size: u32) -> QuerySpec {
        QuerySpec::build(
            self.page,
            self.page_size.unwrap_or(default_page_size),
            self.sort.as_deref(),
            Some(self.order.into()),
            self.filter.as_deref(),
            &self.scoped,
        )
    }
}

/// Parse a season year in 1950..=9999.
pub fn parse_year(text: &str) -> Result<u16, String> {
    let year: u16 = text
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a year", text))?;

    if (1950..=9999).contains(&year) {
        Ok(year)
    } else {
        Err(format!("year must be between 1950 and 9999, got {}", year))
    }
}
