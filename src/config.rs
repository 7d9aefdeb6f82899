//! Configuration handling for bsv

use crate::persist::DEFAULT_PERMISSIONS;

/// Output format for rendering a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Csv,
    Debug,
    Bsv,
}

impl OutputFormat {
    /// Pick an output format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "csv" | "tsv" | "txt" => Some(OutputFormat::Csv),
            "bsv" => Some(OutputFormat::Bsv),
            _ => None,
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "debug" => Ok(OutputFormat::Debug),
            "bsv" => Ok(OutputFormat::Bsv),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Options shared by parsers, outputs and file writes
#[derive(Debug, Clone)]
pub struct Config {
    /// Output format
    pub output_format: OutputFormat,
    /// Text that stands for null in CSV input and output
    pub null_marker: Option<String>,
    /// Field delimiter for CSV; `None` picks from the file extension
    pub delimiter: Option<u8>,
    /// Pretty-print JSON output
    pub pretty_json: bool,
    /// Unix mode for files created by save/append
    pub permissions: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            null_marker: None,
            delimiter: None,
            pretty_json: true,
            permissions: DEFAULT_PERMISSIONS,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set the CSV null marker
    pub fn with_null_marker(mut self, marker: impl Into<String>) -> Self {
        self.null_marker = Some(marker.into());
        self
    }

    /// Set the CSV delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Enable or disable pretty JSON
    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }

    /// Set permissions for created files
    pub fn with_permissions(mut self, mode: u32) -> Self {
        self.permissions = mode;
        self
    }

    /// True if `field` is the configured null marker
    pub fn is_null_marker(&self, field: &[u8]) -> bool {
        self.null_marker
            .as_deref()
            .is_some_and(|m| m.as_bytes() == field)
    }
}

/// Parse an octal mode such as `644` or `0o600`
pub fn parse_mode(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0o");
    u32::from_str_radix(digits, 8)
        .ok()
        .filter(|m| *m <= 0o7777)
        .ok_or_else(|| format!("Invalid octal mode: {}", s))
}
