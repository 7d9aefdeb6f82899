//! CSV file parser
//!
//! Rows are read without a header and may differ in length. CSV has no null,
//! so a field equal to the configured null marker becomes `Cell::Null` and
//! every other field is text. Blank lines are skipped by the CSV reader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use csv::ByteRecord;

use crate::codec::encode_raw;
use crate::config::Config;
use crate::model::{Cell, Row, Table};

use super::Parser;

/// Parser for CSV files
pub struct CsvParser;

impl Parser for CsvParser {
    fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let records = read_records(path, config)?;

        let mut table = Table::new();
        for (line_num, record) in records.iter().enumerate() {
            let row = record
                .iter()
                .enumerate()
                .map(|(i, field)| parse_cell(field, config).with_context(|| {
                    format!("Invalid UTF-8 in CSV row {}, field {}", line_num + 1, i + 1)
                }))
                .collect::<Result<Vec<Cell>>>()?;
            table.push_row(Row::with_cells(row));
        }

        Ok(table)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "tsv" | "txt")
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}

/// Delimiter from config, or tab for `.tsv` files, or comma
pub(crate) fn delimiter_for(path: &Path, config: &Config) -> u8 {
    config.delimiter.unwrap_or_else(|| {
        let is_tsv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
        if is_tsv {
            b'\t'
        } else {
            b','
        }
    })
}

fn reader_for<R: Read>(reader: R, delimiter: u8) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader)
}

fn read_records(path: &Path, config: &Config) -> Result<Vec<ByteRecord>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut csv_reader = reader_for(BufReader::new(file), delimiter_for(path, config));

    csv_reader
        .byte_records()
        .enumerate()
        .map(|(line_num, result)| {
            result.with_context(|| format!("Failed to read CSV row {}", line_num + 1))
        })
        .collect()
}

/// Turn one raw field into a cell
fn parse_cell(field: &[u8], config: &Config) -> Result<Cell> {
    if config.is_null_marker(field) {
        return Ok(Cell::Null);
    }
    Ok(Cell::Text(std::str::from_utf8(field)?.to_string()))
}

/// Convert a CSV file straight to BSV bytes without building a table
pub fn transcode_to_bsv(path: &Path, config: &Config) -> Result<Vec<u8>> {
    let records = read_records(path, config)?;
    let rows = records.iter().map(|record| {
        record
            .iter()
            .map(|field| (!config.is_null_marker(field)).then_some(field))
    });
    encode_raw(rows).with_context(|| format!("Failed to encode CSV file: {}", path.display()))
}
