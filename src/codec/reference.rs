//! Split-based reference decoder, kept as a stricter differential-testing oracle.
//!
//! Splits on the row separator, then on the cell separator, and rejects every
//! zero-length piece. It agrees with [`super::decode`] except on inputs that
//! contain an empty row (including the empty buffer), which it refuses.

use crate::error::DecodeError;
use crate::model::{Cell, Row, Table};

use super::{CELL_SEPARATOR, EMPTY_MARKER, NULL_MARKER, ROW_SEPARATOR};

pub fn decode_split(bytes: &[u8]) -> Result<Table, DecodeError> {
    let mut table = Table::new();
    let mut offset = 0;
    for line in bytes.split(|&b| b == ROW_SEPARATOR) {
        let mut row = Row::new();
        for value in line.split(|&b| b == CELL_SEPARATOR) {
            let cell = match value {
                [] => return Err(DecodeError::MalformedSequence { offset }),
                [NULL_MARKER] => Cell::Null,
                [EMPTY_MARKER] => Cell::text(""),
                _ => std::str::from_utf8(value)
                    .map(Cell::text)
                    .map_err(|e| DecodeError::InvalidText {
                        offset: offset + e.valid_up_to(),
                    })?,
            };
            row.cells.push(cell);
            offset += value.len() + 1;
        }
        table.push_row(row);
    }
    Ok(table)
}
