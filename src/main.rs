//! bsv - Binary Separated Values toolkit

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use tracing::debug;

use bsv::codec::{self, validate};
use bsv::config::{parse_mode, Config, OutputFormat};
use bsv::model::{Cell, Table};
use bsv::output::{render_to_stdout, write_to_path};
use bsv::parser::{CsvParser, Parser as _, ParserFactory};
use bsv::persist;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
    Csv,
    Debug,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Csv => OutputFormat::Csv,
            CliOutputFormat::Debug => OutputFormat::Debug,
        }
    }
}

/// Read, write, convert and check BSV (Binary Separated Values) files
#[derive(Parser, Debug)]
#[command(name = "bsv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    options: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GlobalOptions {
    /// CSV field text that stands for null (read and write)
    #[arg(long, global = true)]
    null_marker: Option<String>,

    /// CSV field delimiter (single byte)
    #[arg(long, global = true)]
    delimiter: Option<char>,

    /// Compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    /// Octal permissions for created files
    #[arg(long, global = true, value_parser = parse_mode)]
    mode: Option<u32>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a table file (BSV, CSV or JSON)
    Show {
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: CliOutputFormat,
    },
    /// Convert between BSV, CSV and JSON, picking formats by extension
    Convert { input: PathBuf, output: PathBuf },
    /// Append the rows of a table file to a BSV file, creating it if missing
    Append { input: PathBuf, target: PathBuf },
    /// Validate BSV files
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Round-trip a sample table through encode, decode, save, load and append
    Demo {
        /// Directory for the demo files
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    bsv::logging::init(cli.options.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1), // check found invalid files
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn build_config(options: &GlobalOptions) -> Result<Config> {
    let mut config = Config::new().with_pretty_json(!options.compact);
    if let Some(ref marker) = options.null_marker {
        config = config.with_null_marker(marker.clone());
    }
    if let Some(d) = options.delimiter {
        if !d.is_ascii() {
            bail!("Delimiter must be a single ASCII character: {:?}", d);
        }
        config = config.with_delimiter(d as u8);
    }
    if let Some(mode) = options.mode {
        config = config.with_permissions(mode);
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<bool> {
    let config = build_config(&cli.options)?;
    let factory = ParserFactory::new();

    match cli.command {
        Command::Show { file, format } => {
            let table = factory
                .parse(&file, &config)
                .with_context(|| format!("Failed to read file: {}", file.display()))?;
            render_to_stdout(&table, &config.with_output_format(format.into()))?;
            Ok(true)
        }
        Command::Convert { input, output } => {
            convert(&factory, &input, &output, &config)?;
            Ok(true)
        }
        Command::Append { input, target } => {
            let table = factory
                .parse(&input, &config)
                .with_context(|| format!("Failed to read file: {}", input.display()))?;
            persist::append(&table, &target, config.permissions)
                .with_context(|| format!("Failed to append to {}", target.display()))?;
            Ok(true)
        }
        Command::Check { files } => Ok(check(&files)),
        Command::Demo { dir } => {
            demo(&dir, &config)?;
            Ok(true)
        }
    }
}

fn convert(factory: &ParserFactory, input: &Path, output: &Path, config: &Config) -> Result<()> {
    let format = output
        .extension()
        .and_then(|e| e.to_str())
        .and_then(OutputFormat::from_extension)
        .with_context(|| format!("Cannot tell output format from {}", output.display()))?;

    let parser = factory.get_parser(input)?;

    if format == OutputFormat::Bsv {
        if parser.name() == CsvParser.name() {
            debug!(input = %input.display(), "streaming CSV records into BSV");
            let bytes = bsv::parser::transcode_to_bsv(input, config)?;
            persist::write_encoded(&bytes, output, config.permissions)?;
        } else {
            let table = parser.parse(input, config)?;
            persist::save(&table, output, config.permissions)
                .with_context(|| format!("Failed to save {}", output.display()))?;
        }
        return Ok(());
    }

    let table = parser
        .parse(input, config)
        .with_context(|| format!("Failed to read file: {}", input.display()))?;
    write_to_path(&table, output, format, config)
}

/// Validate every file in parallel, report in argument order
fn check(files: &[PathBuf]) -> bool {
    let results: Vec<_> = files
        .par_iter()
        .map(|path| {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            validate(&bytes).map_err(anyhow::Error::from)
        })
        .collect();

    let mut all_valid = true;
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(summary) => println!(
                "{}: ok ({} rows, {} cells, {} nulls, {} empty rows)",
                path.display(),
                summary.rows,
                summary.cells,
                summary.nulls,
                summary.empty_rows
            ),
            Err(e) => {
                all_valid = false;
                println!("{}: invalid: {:#}", path.display(), e);
            }
        }
    }
    all_valid
}

fn demo(dir: &Path, config: &Config) -> Result<()> {
    let table = Table::from(vec![
        vec![Cell::text("Hello"), Cell::text("🌎"), Cell::Null, Cell::text("")],
        vec![Cell::text("A\u{0}B\nC"), Cell::text("Test 𝄞")],
    ]);
    println!("{}", table);

    let bytes = codec::encode(&table)?;
    println!("{:02X?}", bytes);

    let decoded = codec::decode(&bytes)?;
    println!("{}", decoded);

    let path = dir.join("Test.bsv");
    persist::save(&table, &path, config.permissions)?;
    let loaded = persist::load(&path)?;
    println!("{}", loaded);

    persist::append(&Table::from(vec![vec![Cell::text("ABC")]]), &path, config.permissions)?;
    let appended = persist::load(&path)?;
    println!("{}", appended);
    Ok(())
}
