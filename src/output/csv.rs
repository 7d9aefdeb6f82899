//! CSV output format

use anyhow::Result;
use termcolor::WriteColor;

use crate::config::Config;
use crate::model::{Cell, Table};

use super::OutputFormatter;

/// CSV output. Rows keep their own lengths; nulls become the null marker,
/// or an empty field when no marker is configured.
pub struct CsvOutput {
    delimiter: u8,
    null_marker: String,
}

impl CsvOutput {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            null_marker: String::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            delimiter: config.delimiter.unwrap_or(b','),
            null_marker: config.null_marker.clone().unwrap_or_default(),
        }
    }
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for CsvOutput {
    fn render(&self, table: &Table, writer: &mut dyn WriteColor) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .flexible(true)
            .delimiter(self.delimiter)
            .from_writer(&mut *writer);

        for row in table {
            if row.is_empty() {
                // empty rows come out as a single empty field
                csv_writer.write_record([""])?;
                continue;
            }
            csv_writer.write_record(row.iter().map(|cell| match cell {
                Cell::Null => self.null_marker.as_str(),
                Cell::Text(s) => s.as_str(),
            }))?;
        }
        csv_writer.flush()?;

        Ok(())
    }
}
