//! BSV file parser

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::model::Table;
use crate::persist;

use super::Parser;

/// Parser for BSV files
pub struct BsvParser;

impl Parser for BsvParser {
    fn parse(&self, path: &Path, _config: &Config) -> Result<Table> {
        persist::load(path).with_context(|| format!("Failed to load BSV file: {}", path.display()))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case("bsv")
    }

    fn name(&self) -> &'static str {
        "bsv"
    }
}
