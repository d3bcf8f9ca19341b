//! # sheet2sql
//!
//! Command-line front end: reads a workbook and writes the MySQL script that
//! recreates its sheets as tables.
use anyhow::{Context, Result};
use clap::Parser;
use sheet2sql::{ErrorMode, ImportOptions, Importer, ScriptWriter, Spreadsheet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// sheet2sql - Generate MySQL tables and inserts from spreadsheet sheets
#[derive(Parser)]
#[command(name = "sheet2sql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Spreadsheet file (.xlsx, .xlsm, .xlsb, .xls, .ods)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Write the script to a file instead of stdout
    #[arg(short, long, value_name = "OUT")]
    output: Option<PathBuf>,

    /// Leave out values that do not fit their column instead of failing
    #[arg(long)]
    lenient: bool,

    /// Import only matching sheets or columns (`sheet` or `sheet/column` globs)
    #[arg(short, long = "include", value_name = "PATH")]
    include: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so the script can be piped
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
        }))
        .with_writer(std::io::stderr)
        .init();

    let options = ImportOptions {
        mode: if cli.lenient { ErrorMode::Lenient } else { ErrorMode::Strict },
        include: cli.include,
    };
    let importer = Importer::new(&options)?;
    let mut spreadsheet = Spreadsheet::open(&cli.file)
        .with_context(|| format!("Failed to open spreadsheet: {}", cli.file.display()))?;

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut script = ScriptWriter::new(writer);
    let report = importer
        .import_workbook(&mut spreadsheet, &mut script)
        .with_context(|| format!("Failed to import spreadsheet: {}", spreadsheet.name()))?;
    script.into_inner()?;

    tracing::info!(
        sheets = report.sheets.len(),
        skipped = report.skipped.len(),
        rows = report.inserted_rows(),
        failures = report.conversion_failures(),
        "import finished"
    );
    Ok(())
}
