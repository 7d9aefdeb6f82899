//! Bracketed debug listing

use anyhow::Result;
use termcolor::WriteColor;

use crate::model::Table;

use super::OutputFormatter;

/// One row per line, text quoted with escapes, `null` for nulls
pub struct DebugOutput;

impl OutputFormatter for DebugOutput {
    fn render(&self, table: &Table, writer: &mut dyn WriteColor) -> Result<()> {
        writeln!(writer, "{}", table)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;
    use crate::output::render_plain;

    #[test]
    fn test_listing() {
        let table = Table::from(vec![vec![Cell::text("Hello"), Cell::Null, Cell::text("")]]);
        assert_eq!(render_plain(&DebugOutput, &table), "[\n  [\"Hello\", null, \"\"]\n]\n");
    }
}
