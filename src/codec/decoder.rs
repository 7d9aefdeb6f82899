//! Bytes to table: a single left-to-right scan over sentinel-framed segments

use crate::error::DecodeError;
use crate::model::{Cell, Row, Table};

use super::{CELL_SEPARATOR, EMPTY_MARKER, NULL_MARKER, ROW_SEPARATOR};

/// A decoded cell that borrows its text from the input buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRef<'a> {
    Null,
    Text(&'a str),
}

impl CellRef<'_> {
    pub fn to_cell(self) -> Cell {
        match self {
            CellRef::Null => Cell::Null,
            CellRef::Text(s) => Cell::Text(s.to_string()),
        }
    }
}

/// One step of the scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Cell(CellRef<'a>),
    EndOfRow,
}

/// Iterator over the cells and row ends of a BSV buffer.
///
/// A segment is the run of bytes between two separators, or between a
/// buffer edge and a separator. Every non-empty segment is a cell. A
/// zero-length segment is only allowed with a row separator or buffer edge
/// on both sides, where it stands for "no cells" rather than a cell. The
/// scan always ends with one final [`Token::EndOfRow`], so even an empty
/// buffer yields one (empty) row.
///
/// After the first error the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    bytes: &'a [u8],
    segment_start: usize,
    row_end_pending: bool,
    exhausted: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            segment_start: 0,
            row_end_pending: false,
            exhausted: false,
        }
    }

    fn fail(&mut self, err: DecodeError) -> Option<Result<Token<'a>, DecodeError>> {
        self.exhausted = true;
        self.row_end_pending = false;
        Some(Err(err))
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.row_end_pending {
                self.row_end_pending = false;
                return Some(Ok(Token::EndOfRow));
            }
            if self.exhausted {
                return None;
            }

            let start = self.segment_start;
            let end = self.bytes[start..]
                .iter()
                .position(|&b| b >= CELL_SEPARATOR)
                .map_or(self.bytes.len(), |i| start + i);
            let terminator = self.bytes.get(end).copied();
            let segment = &self.bytes[start..end];

            match terminator {
                Some(CELL_SEPARATOR) => self.segment_start = end + 1,
                Some(_) => {
                    self.segment_start = end + 1;
                    self.row_end_pending = true;
                }
                None => {
                    self.exhausted = true;
                    self.row_end_pending = true;
                }
            }

            match segment {
                [] => {
                    let opens_row = start == 0 || self.bytes[start - 1] == ROW_SEPARATOR;
                    let closes_row = terminator != Some(CELL_SEPARATOR);
                    if !(opens_row && closes_row) {
                        return self.fail(DecodeError::MalformedSequence { offset: start });
                    }
                    // an empty row: no cell, fall through to the row end
                }
                [NULL_MARKER] => return Some(Ok(Token::Cell(CellRef::Null))),
                [EMPTY_MARKER] => return Some(Ok(Token::Cell(CellRef::Text("")))),
                _ => {
                    return match std::str::from_utf8(segment) {
                        Ok(text) => Some(Ok(Token::Cell(CellRef::Text(text)))),
                        Err(e) => self.fail(DecodeError::InvalidText {
                            offset: start + e.valid_up_to(),
                        }),
                    };
                }
            }
        }
    }
}

/// Decode a BSV buffer into a table.
///
/// An empty buffer decodes to one empty row, not to an empty table.
pub fn decode(bytes: &[u8]) -> Result<Table, DecodeError> {
    let mut table = Table::new();
    let mut row = Row::new();
    for token in Scanner::new(bytes) {
        match token? {
            Token::Cell(cell) => row.cells.push(cell.to_cell()),
            Token::EndOfRow => table.push_row(std::mem::take(&mut row)),
        }
    }
    Ok(table)
}

/// Row and cell counts of a well-formed buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub rows: usize,
    pub cells: usize,
    pub nulls: usize,
    pub empty_rows: usize,
}

/// Check a buffer without building a table
pub fn validate(bytes: &[u8]) -> Result<Summary, DecodeError> {
    let mut summary = Summary::default();
    let mut cells_in_row = 0;
    for token in Scanner::new(bytes) {
        match token? {
            Token::Cell(cell) => {
                summary.cells += 1;
                cells_in_row += 1;
                if cell == CellRef::Null {
                    summary.nulls += 1;
                }
            }
            Token::EndOfRow => {
                summary.rows += 1;
                if cells_in_row == 0 {
                    summary.empty_rows += 1;
                }
                cells_in_row = 0;
            }
        }
    }
    Ok(summary)
}
