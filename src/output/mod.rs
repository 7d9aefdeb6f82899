//! Output formatting for tables

mod bsv;
mod csv;
mod debug;
mod json;
mod terminal;

use std::fs::File;
use std::io::{BufWriter, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};
use termcolor::{ColorChoice, NoColor, StandardStream, WriteColor};

use crate::config::{Config, OutputFormat};
use crate::model::Table;
use crate::parser::delimiter_for;

pub use self::bsv::BsvOutput;
pub use self::csv::CsvOutput;
pub use self::debug::DebugOutput;
pub use self::json::JsonOutput;
pub use self::terminal::TerminalOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a table to a writer
    fn render(&self, table: &Table, writer: &mut dyn WriteColor) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat, config: &Config) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Terminal => Box::new(TerminalOutput::new()),
            OutputFormat::Json if config.pretty_json => Box::new(JsonOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::compact()),
            OutputFormat::Csv => Box::new(CsvOutput::from_config(config)),
            OutputFormat::Debug => Box::new(DebugOutput),
            OutputFormat::Bsv => Box::new(BsvOutput),
        }
    }
}

/// Render a table to stdout in the configured format
pub fn render_to_stdout(table: &Table, config: &Config) -> Result<()> {
    let formatter = OutputFactory::create(config.output_format, config);
    let choice = match config.output_format {
        OutputFormat::Terminal if std::io::stdout().is_terminal() => ColorChoice::Auto,
        _ => ColorChoice::Never,
    };
    let mut stdout = StandardStream::stdout(choice);
    formatter.render(table, &mut stdout)
}

/// Render a table into a new file, without colors
pub fn write_to_path(table: &Table, path: &Path, format: OutputFormat, config: &Config) -> Result<()> {
    let config = Config {
        delimiter: Some(delimiter_for(path, config)),
        ..config.clone()
    };
    let formatter = OutputFactory::create(format, &config);
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let mut writer = NoColor::new(BufWriter::new(file));
    formatter.render(table, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn render_plain(formatter: &dyn OutputFormatter, table: &Table) -> String {
    let mut writer = NoColor::new(Vec::new());
    formatter.render(table, &mut writer).unwrap();
    String::from_utf8(writer.into_inner()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;

    #[test]
    fn test_write_tsv_uses_tab() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        let table = Table::from(vec![vec![Cell::text("a"), Cell::text("b")]]);
        write_to_path(&table, &path, OutputFormat::Csv, &Config::default()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\tb\n");
    }

    #[test]
    fn test_factory_respects_compact_json() {
        let table = Table::from(vec![vec![Cell::Null]]);
        let config = Config::new().with_pretty_json(false);
        let formatter = OutputFactory::create(OutputFormat::Json, &config);
        assert_eq!(render_plain(formatter.as_ref(), &table), "[[null]]\n");
    }
}
