//! JSON jagged-array parser

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::model::Table;

use super::Parser;

/// Parser for JSON files holding an array of arrays of strings or nulls
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse(&self, path: &Path, _config: &Config) -> Result<Table> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open JSON file: {}", path.display()))?;
        let reader = BufReader::new(file);

        serde_json::from_reader(reader)
            .with_context(|| format!("Expected an array of arrays of strings or nulls in {}", path.display()))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case("json")
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;

    #[test]
    fn test_parse_jagged_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        std::fs::write(&path, r#"[["a", null, ""], [], ["🌎"]]"#).unwrap();
        let table = JsonParser.parse(&path, &Config::default()).unwrap();
        assert_eq!(
            table,
            Table::from(vec![
                vec![Cell::text("a"), Cell::Null, Cell::text("")],
                vec![],
                vec![Cell::text("🌎")],
            ])
        );
    }

    #[test]
    fn test_rejects_non_text_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        std::fs::write(&path, r#"[[1, true]]"#).unwrap();
        assert!(JsonParser.parse(&path, &Config::default()).is_err());
    }
}
