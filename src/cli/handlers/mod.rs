//! Shared command handler flows

pub mod query;

pub use query::run_query_command;
