//! Reshape nested API records into flat, ordered rows
//!
//! Each record type declares its columns once ([`Tabular::COLUMNS`]) and
//! knows how to produce a cell for each, including derived ones such as
//! `formatted_time` or `race_year`. [`flatten`] applies an optional column
//! allow-list on top.

mod columns;
pub mod duration;
pub mod summary;

use serde::Serialize;
use serde::ser::SerializeMap;
use serde_json::Value;

use crate::error::TransformError;

pub use summary::{CircuitSummary, LapSummary};

/// A record type that can be flattened into a [`Row`].
pub trait Tabular {
    /// Every column this type can produce, in default display order.
    const COLUMNS: &'static [&'static str];

    /// Value for `column`. Only called with names from [`Tabular::COLUMNS`].
    fn cell(&self, column: &str) -> Value;
}

/// One flattened record: cells in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, Value)>,
}

impl Row {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell
    #[cfg(test)]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.cells.push((column.into(), value.into()));
        self
    }

    #[cfg(test)]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells.iter().find(|(c, _)| c == column).map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }

    pub fn cells(&self) -> &[(String, Value)] {
        &self.cells
    }

}

impl Serialize for Row {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in &self.cells {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Which columns to keep, and in what order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSpec {
    allow: Option<Vec<String>>,
}

impl ColumnSpec {
    /// Keep every column of the record type.
    pub fn all() -> Self {
        Self { allow: None }
    }

    /// Keep exactly `columns`, in this order.
    pub fn only<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            allow: Some(columns.iter().map(|c| c.as_ref().to_string()).collect()),
        }
    }

    /// Parse comma-separated `--columns` text. Blank text keeps everything.
    pub fn parse(text: &str) -> Self {
        let columns: Vec<String> = text
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();

        if columns.is_empty() {
            Self::all()
        } else {
            Self { allow: Some(columns) }
        }
    }

    /// `--columns` when given, otherwise `fallback`.
    pub fn or(text: Option<&str>, fallback: Self) -> Self {
        match text.map(Self::parse) {
            Some(spec) if spec.allow.is_some() => spec,
            _ => fallback,
        }
    }

    /// Resolve against the columns a record type offers.
    pub fn resolve(
        &self,
        available: &[&'static str],
    ) -> Result<Vec<&'static str>, TransformError> {
        let Some(ref allow) = self.allow else {
            return Ok(available.to_vec());
        };

        allow
            .iter()
            .map(|wanted| {
                available
                    .iter()
                    .copied()
                    .find(|column| column == wanted)
                    .ok_or_else(|| TransformError::UnknownColumn {
                        column: wanted.clone(),
                        available: available.iter().map(|c| c.to_string()).collect(),
                    })
            })
            .collect()
    }
}

/// Flatten `records` into rows, preserving input order.
///
/// The allow-list is checked even when `records` is empty, so a typo in
/// `--columns` is reported on an empty page too.
pub fn flatten<T: Tabular>(
    records: &[T],
    spec: &ColumnSpec,
) -> Result<Vec<Row>, TransformError> {
    let columns = spec.resolve(T::COLUMNS)?;

    Ok(records
        .iter()
        .map(|record| Row {
            cells: columns
                .iter()
                .map(|column| (column.to_string(), record.cell(column)))
                .collect(),
        })
        .collect())
}
