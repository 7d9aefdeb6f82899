//! Table and Row data structures

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// A row in the table. Rows may hold any number of cells, including none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    /// Cell values in order
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row from cells
    pub fn with_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Append a cell
    pub fn push(&mut self, cell: impl Into<Cell>) {
        self.cells.push(cell.into());
    }

    /// Get a cell by index
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Number of cells in this row
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}

impl<T: Into<Cell>> FromIterator<T> for Row {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// A jagged table: an ordered list of rows that may differ in length
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    /// All rows in the table
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a table with no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to the table
    pub fn push_row(&mut self, row: impl Into<Row>) {
        self.rows.push(row.into());
    }

    /// Get a row by index
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Get a cell by row and cell index
    pub fn cell(&self, row: usize, cell: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(cell))
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total number of cells across all rows
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }

    /// Length of the longest row
    pub fn max_width(&self) -> usize {
        self.rows.iter().map(Row::len).max().unwrap_or(0)
    }

    /// True if the table has no rows at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True if any row holds zero cells
    pub fn has_empty_row(&self) -> bool {
        self.rows.iter().any(Row::is_empty)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

impl From<Vec<Vec<Cell>>> for Table {
    fn from(rows: Vec<Vec<Cell>>) -> Self {
        Self {
            rows: rows.into_iter().map(Row::from).collect(),
        }
    }
}

impl<R: Into<Row>> FromIterator<R> for Table {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Debug listing: one bracketed row per line, text quoted and escaped
impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for row in &self.rows {
            write!(f, "\n  [")?;
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                match cell {
                    Cell::Null => write!(f, "null")?,
                    Cell::Text(s) => write!(f, "{:?}", s)?,
                }
            }
            write!(f, "]")?;
        }
        write!(f, "\n]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from(vec![
            vec![Cell::text("a"), Cell::Null],
            vec![],
            vec![Cell::text("")],
        ])
    }

    #[test]
    fn test_counts() {
        let table = sample();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.cell_count(), 3);
        assert_eq!(table.max_width(), 2);
        assert!(table.has_empty_row());
        assert_eq!(table.cell(0, 1), Some(&Cell::Null));
        assert_eq!(table.cell(1, 0), None);
    }

    #[test]
    fn test_empty_table_vs_empty_row() {
        let none = Table::new();
        let one: Table = Table::from(vec![Row::new()]);
        assert!(none.is_empty());
        assert!(!one.is_empty());
        assert_ne!(none, one);
    }

    #[test]
    fn test_display_listing() {
        let table = Table::from(vec![
            vec![Cell::text("A\u{0}B\nC"), Cell::Null],
            vec![],
        ]);
        assert_eq!(table.to_string(), "[\n  [\"A\\0B\\nC\", null]\n  []\n]");
        assert_eq!(Table::new().to_string(), "[\n]");
    }

    #[test]
    fn test_json_jagged_array() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"[["a",null],[],[""]]"#);
        let back: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
