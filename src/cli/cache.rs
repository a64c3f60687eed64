//! Cache management commands for the interactive shell

use colored::Colorize;
use serde::Serialize;

use crate::cli::{OutputFormat, Session};
use crate::client::StatsApi;
use crate::error::Result;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CacheStatus {
    pub enabled: bool,
    pub ttl_seconds: u64,
    pub total_entries: usize,
    pub live_entries: usize,
    pub expired_entries: usize,
}

pub fn cache_status<A: StatsApi>(session: &Session<A>) -> CacheStatus {
    let stats = session.client.stats().unwrap_or_default();
    CacheStatus {
        enabled: session.client.is_enabled(),
        ttl_seconds: session.client.ttl().as_secs(),
        total_entries: stats.total_entries,
        live_entries: stats.live_entries,
        expired_entries: stats.expired_entries,
    }
}

/// Show cache status/statistics
pub fn status<A: StatsApi>(session: &Session<A>) -> Result<()> {
    let status = cache_status(session);

    match session.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        _ => {
            println!("Cache Status");
            println!("────────────────────────────────────────");
            if !status.enabled {
                println!("{} Caching disabled (--no-cache)", "○".dimmed());
                return Ok(());
            }
            println!("TTL:            {}s", status.ttl_seconds);
            println!("Live entries:   {}", status.live_entries);
            println!("Expired:        {}", status.expired_entries);
            println!("Total entries:  {}", status.total_entries);
        }
    }

    Ok(())
}

/// Clear all cache entries
pub fn clear<A: StatsApi>(session: &Session<A>) -> Result<()> {
    let removed = session.client.clear();

    match session.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entries_removed": removed,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => println!("{} Cleared {} cached responses", "✓".green(), removed),
    }

    Ok(())
}
