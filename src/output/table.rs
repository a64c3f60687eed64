//! Table output formatting

use serde_json::Value;
use tabled::{
    Table,
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::transform::Row;

/// Format flattened rows as a table, header taken from the first row
pub fn format_rows(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return "No results found.".to_string();
    };

    let mut builder = Builder::default();
    builder.push_record(first.columns().map(String::from));
    for row in rows {
        builder.push_record(row.cells().iter().map(|(_, value)| cell_text(value)));
    }

    styled(builder.build())
}

/// Two-column `label | value` table for headline metrics
pub fn format_pairs<K: AsRef<str>, V: AsRef<str>>(
    header: (&str, &str),
    pairs: &[(K, V)],
) -> String {
    if pairs.is_empty() {
        return "No results found.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record([header.0.to_string(), header.1.to_string()]);
    for (key, value) in pairs {
        builder.push_record([key.as_ref().to_string(), value.as_ref().to_string()]);
    }

    styled(builder.build())
}

/// Render one cell. Null is blank; strings are shown without quotes.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}
