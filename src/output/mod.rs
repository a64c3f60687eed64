//! Output formatting for CLI results

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::transform::Row;

pub mod formatters;
pub mod json;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        println!("{}", self.format(format)?);
        Ok(())
    }
}

impl Formattable for [Row] {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty | OutputFormat::Table => Ok(table::format_rows(self)),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

impl Formattable for Vec<Row> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        self.as_slice().format(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_as_json_keep_column_order() {
        let rows = vec![
            Row::new()
                .with("track", "Silverstone Circuit")
                .with("meanTime", "1:32.145"),
        ];
        let out = rows.format(OutputFormat::Json).unwrap();

        let track = out.find("\"track\"").unwrap();
        let mean = out.find("\"meanTime\"").unwrap();
        assert!(track < mean);
        assert!(out.contains("\"meta\""));
    }

    #[test]
    fn test_rows_as_table() {
        let rows = vec![Row::new().with("lap", 1)];
        assert!(rows.format(OutputFormat::Table).unwrap().contains("lap"));
        assert_eq!(
            Vec::<Row>::new().format(OutputFormat::Pretty).unwrap(),
            "No results found."
        );
    }
}
