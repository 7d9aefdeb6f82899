//! JSON output format

use anyhow::Result;
use termcolor::WriteColor;

use crate::model::Table;

use super::OutputFormatter;

/// JSON output formatter: an array of arrays of strings or nulls
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn render(&self, table: &Table, writer: &mut dyn WriteColor) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, table)?;
        } else {
            serde_json::to_writer(&mut *writer, table)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;
    use crate::output::render_plain;

    #[test]
    fn test_compact() {
        let table = Table::from(vec![vec![Cell::text("a"), Cell::Null], vec![]]);
        assert_eq!(render_plain(&JsonOutput::compact(), &table), "[[\"a\",null],[]]\n");
    }

    #[test]
    fn test_pretty_parses_back() {
        let table = Table::from(vec![vec![Cell::text("🌎"), Cell::text("")]]);
        let text = render_plain(&JsonOutput::new(), &table);
        assert!(text.contains('\n'));
        let back: Table = serde_json::from_str(&text).unwrap();
        assert_eq!(back, table);
    }
}
