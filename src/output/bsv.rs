//! Raw BSV bytes

use anyhow::Result;
use termcolor::WriteColor;

use crate::codec::encode;
use crate::model::Table;

use super::OutputFormatter;

/// Writes the encoded table unchanged
pub struct BsvOutput;

impl OutputFormatter for BsvOutput {
    fn render(&self, table: &Table, writer: &mut dyn WriteColor) -> Result<()> {
        writer.write_all(&encode(table)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;
    use termcolor::NoColor;

    #[test]
    fn test_writes_encoded_bytes() {
        let table = Table::from(vec![vec![Cell::Null], vec![Cell::text("")]]);
        let mut writer = NoColor::new(Vec::new());
        BsvOutput.render(&table, &mut writer).unwrap();
        assert_eq!(writer.into_inner(), vec![0xFD, 0xFF, 0xFC]);
    }
}
