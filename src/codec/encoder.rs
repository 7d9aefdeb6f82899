//! Table to bytes

use crate::error::EncodeError;
use crate::model::{Cell, Table};

use super::{CELL_SEPARATOR, EMPTY_MARKER, NULL_MARKER, ROW_SEPARATOR};

/// Incremental BSV writer.
///
/// Call [`Encoder::begin_row`] once per row (including rows with no cells),
/// then push that row's cells. Separators are placed between rows and
/// between cells only, never leading or trailing.
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
    rows: usize,
    cells_in_row: usize,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Start a new row
    pub fn begin_row(&mut self) {
        if self.rows > 0 {
            self.buf.push(ROW_SEPARATOR);
        }
        self.rows += 1;
        self.cells_in_row = 0;
    }

    /// Append a cell to the current row
    pub fn push_cell(&mut self, cell: &Cell) {
        self.separate_cell();
        match cell {
            Cell::Null => self.buf.push(NULL_MARKER),
            Cell::Text(s) if s.is_empty() => self.buf.push(EMPTY_MARKER),
            Cell::Text(s) => self.buf.extend_from_slice(s.as_bytes()),
        }
    }

    /// Append a byte-level value to the current row, checking it is UTF-8.
    ///
    /// `None` is null. On error nothing is written.
    pub fn push_raw(&mut self, value: Option<&[u8]>) -> Result<(), EncodeError> {
        if let Some(bytes) = value {
            if std::str::from_utf8(bytes).is_err() {
                return Err(EncodeError::InvalidText {
                    row: self.rows.saturating_sub(1),
                    cell: self.cells_in_row,
                });
            }
        }
        self.separate_cell();
        match value {
            None => self.buf.push(NULL_MARKER),
            Some([]) => self.buf.push(EMPTY_MARKER),
            Some(bytes) => self.buf.extend_from_slice(bytes),
        }
        Ok(())
    }

    fn separate_cell(&mut self) {
        if self.rows == 0 {
            self.begin_row();
        }
        if self.cells_in_row > 0 {
            self.buf.push(CELL_SEPARATOR);
        }
        self.cells_in_row += 1;
    }

    /// Number of rows started so far
    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Encode a table into a BSV buffer.
///
/// A table with no rows encodes to an empty buffer.
pub fn encode(table: &Table) -> Result<Vec<u8>, EncodeError> {
    let capacity = table
        .iter()
        .map(|row| row.iter().map(|c| c.as_str().map_or(1, str::len).max(1) + 1).sum::<usize>() + 1)
        .sum();
    let mut encoder = Encoder::with_capacity(capacity);
    for row in table {
        encoder.begin_row();
        for cell in row {
            encoder.push_cell(cell);
        }
    }
    Ok(encoder.finish())
}

/// Encode rows of byte-level values, validating each value as UTF-8
pub fn encode_raw<R, C, V>(rows: R) -> Result<Vec<u8>, EncodeError>
where
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = Option<V>>,
    V: AsRef<[u8]>,
{
    let mut encoder = Encoder::new();
    for row in rows {
        encoder.begin_row();
        for value in row {
            encoder.push_raw(value.as_ref().map(|v| v.as_ref()))?;
        }
    }
    Ok(encoder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        let null = Table::from(vec![vec![Cell::Null]]);
        let empty = Table::from(vec![vec![Cell::text("")]]);
        assert_eq!(encode(&null).unwrap(), vec![0xFD]);
        assert_eq!(encode(&empty).unwrap(), vec![0xFC]);
    }

    #[test]
    fn test_empty_table_and_empty_rows() {
        assert_eq!(encode(&Table::new()).unwrap(), Vec::<u8>::new());
        assert_eq!(encode(&Table::from(vec![Vec::<Cell>::new()])).unwrap(), Vec::<u8>::new());
        let three = Table::from(vec![Vec::<Cell>::new(), vec![], vec![]]);
        assert_eq!(encode(&three).unwrap(), vec![0xFF, 0xFF]);
    }

    #[test]
    fn test_no_leading_or_trailing_separators() {
        let table = Table::from(vec![
            vec![Cell::text("a"), Cell::text("b")],
            vec![Cell::text("c")],
        ]);
        assert_eq!(encode(&table).unwrap(), b"a\xFEb\xFFc".to_vec());
    }

    #[test]
    fn test_push_raw_rejects_invalid_utf8() {
        let mut encoder = Encoder::new();
        encoder.begin_row();
        encoder.push_raw(Some(&b"ok"[..])).unwrap();
        let err = encoder.push_raw(Some(&[0xED, 0xA0, 0x80][..])).unwrap_err();
        assert_eq!(err, EncodeError::InvalidText { row: 0, cell: 1 });
        // the rejected value left no trace
        assert_eq!(encoder.finish(), b"ok".to_vec());
    }

    #[test]
    fn test_encode_raw() {
        let rows: Vec<Vec<Option<&[u8]>>> = vec![
            vec![Some(&b"x"[..]), None, Some(&b""[..])],
            vec![],
            vec![Some("🌎".as_bytes())],
        ];
        let bytes = encode_raw(rows).unwrap();
        let mut expected = b"x\xFE\xFD\xFE\xFC\xFF\xFF".to_vec();
        expected.extend_from_slice("🌎".as_bytes());
        assert_eq!(bytes, expected);

        let bad: Vec<Vec<Option<Vec<u8>>>> = vec![vec![Some(b"a".to_vec())], vec![Some(vec![0xFE])]];
        assert_eq!(
            encode_raw(bad).unwrap_err(),
            EncodeError::InvalidText { row: 1, cell: 0 }
        );
    }

    #[test]
    fn test_push_cell_without_begin_row() {
        let mut encoder = Encoder::new();
        encoder.push_cell(&Cell::text("a"));
        encoder.push_cell(&Cell::Null);
        assert_eq!(encoder.row_count(), 1);
        assert_eq!(encoder.finish(), b"a\xFE\xFD".to_vec());
    }
}
