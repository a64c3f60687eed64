//! Resolve driver and circuit arguments given by display name

use log::debug;

use crate::cli::Session;
use crate::client::{QuerySpec, StatsApi};
use crate::error::{Error, Result};

/// Every driver, sorted by surname
pub fn driver_list_query() -> QuerySpec {
    QuerySpec::new().page_size(900).sort_by("surname")
}

/// Every circuit
pub fn circuit_list_query() -> QuerySpec {
    QuerySpec::new().page_size(77)
}

/// A driver picked on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverPick {
    pub id: u32,
    pub name: String,
}

/// Resolve `arg` to a driver: a number is taken as the id, anything else is
/// matched case-insensitively against "Forename Surname".
pub async fn driver<A: StatsApi>(session: &Session<A>, arg: &str) -> Result<DriverPick> {
    let arg = arg.trim();
    if let Ok(id) = arg.parse::<u32>() {
        return Ok(DriverPick {
            id,
            name: format!("Driver {}", id),
        });
    }

    let drivers = session
        .fetching("Fetching drivers...", session.client.list_drivers(&driver_list_query()))
        .await?
        .records;
    debug!("Resolving driver '{}' among {} drivers", arg, drivers.len());

    drivers
        .iter()
        .find(|d| d.full_name().eq_ignore_ascii_case(arg))
        .map(|d| DriverPick {
            id: d.driver_id,
            name: d.full_name(),
        })
        .ok_or_else(|| {
            Error::Other(format!(
                "Unknown driver '{}'. Use \"Forename Surname\" or a driver id.",
                arg
            ))
        })
}

/// Resolve `arg` to the exact circuit name used in lap time filters.
pub async fn circuit<A: StatsApi>(session: &Session<A>, arg: &str) -> Result<String> {
    let arg = arg.trim();
    let circuits = session
        .fetching("Fetching circuits...", session.client.list_circuits(&circuit_list_query()))
        .await?
        .records;

    circuits
        .into_iter()
        .find(|c| c.name.eq_ignore_ascii_case(arg))
        .map(|c| c.name)
        .ok_or_else(|| {
            Error::Other(format!(
                "Unknown circuit '{}'. Run `vpsview circuits --locations` to list circuit names.",
                arg
            ))
        })
}
