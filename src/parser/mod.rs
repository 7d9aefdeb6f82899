//! Parser layer for reading tables from BSV, CSV and JSON files

mod bsv;
mod csv;
mod json;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Result};
use tracing::debug;

use crate::codec::is_sentinel;
use crate::config::Config;
use crate::model::Table;

pub use self::bsv::BsvParser;
pub use self::csv::{transcode_to_bsv, CsvParser};
pub(crate) use self::csv::delimiter_for;
pub use self::json::JsonParser;

/// Trait for parsing table files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path, config: &Config) -> Result<Table>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;

    /// Short name used in logs and errors
    fn name(&self) -> &'static str;
}

/// Factory for creating parsers based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(BsvParser), Box::new(CsvParser), Box::new(JsonParser)],
        }
    }

    /// Get a parser for the given file path.
    ///
    /// Unknown or missing extensions fall back to sniffing the content.
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        if let Some(parser) = self.by_extension(&ext) {
            return Ok(parser);
        }

        match detect_format(path).and_then(|ext| self.by_extension(ext)) {
            Some(parser) => {
                debug!(path = %path.display(), parser = parser.name(), "detected format from content");
                Ok(parser)
            }
            None => bail!(
                "Unsupported file format: {}",
                path.extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("unknown")
            ),
        }
    }

    fn by_extension(&self, ext: &str) -> Option<&dyn Parser> {
        self.parsers
            .iter()
            .find(|p| p.supports_extension(ext))
            .map(|p| p.as_ref())
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let parser = self.get_parser(path)?;
        parser.parse(path, config)
    }
}

/// Detect file format from content (for files without a known extension)
pub fn detect_format(path: &Path) -> Option<&'static str> {
    let mut file = File::open(path).ok()?;
    let mut buffer = [0u8; 4096];
    let bytes_read = file.read(&mut buffer).ok()?;
    let head = &buffer[..bytes_read];

    // Sentinel bytes never appear in UTF-8 text formats
    if bytes_read == 0 || head.iter().copied().any(is_sentinel) {
        return Some("bsv");
    }

    let first = head.iter().find(|b| !b.is_ascii_whitespace());
    if first == Some(&b'[') {
        return Some("json");
    }

    Some("csv")
}
