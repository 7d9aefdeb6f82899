//! A single nullable text value

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A cell is either text (possibly empty) or an explicit null.
///
/// `Text(String::new())` and `Null` are different values, and both differ
/// from a cell that is not present in its row at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Text(String),
}

impl Cell {
    /// Create a text cell
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Check if the value is the empty string (not null)
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Cell::Text(s) if s.is_empty())
    }

    /// The text payload, or `None` for null
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Null => None,
            Cell::Text(s) => Some(s),
        }
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            Cell::Null => Cow::Borrowed("NULL"),
            Cell::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl<T> From<Option<T>> for Cell
where
    T: Into<Cell>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Cell::Null,
        }
    }
}

impl From<Cell> for Option<String> {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Null => None,
            Cell::Text(s) => Some(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_empty_distinct() {
        assert_ne!(Cell::Null, Cell::text(""));
        assert!(Cell::Null.is_null());
        assert!(!Cell::text("").is_null());
        assert!(Cell::text("").is_empty_text());
        assert!(!Cell::Null.is_empty_text());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Cell::from(None::<&str>), Cell::Null);
        assert_eq!(Cell::from(Some("a")), Cell::text("a"));
        assert_eq!(Option::<String>::from(Cell::text("b")), Some("b".to_string()));
    }

    #[test]
    fn test_json_shape() {
        let cells = vec![Cell::text("x"), Cell::Null, Cell::text("")];
        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(json, r#"["x",null,""]"#);
        let back: Vec<Cell> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cells);
    }
}
