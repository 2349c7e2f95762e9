//! Query result rendering for the CLI.

use super::csv::write_csv;
use super::terminal::format_table;
use crate::driver::QueryResults;
use clap::ValueEnum;
use std::io::{self, Write};

/// Output format for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Table,
    /// The raw service response.
    Json,
}

/// Write `results` to `out` in `format`. Only result data is written.
pub fn write_results<W: Write>(
    results: &QueryResults,
    format: OutputFormat,
    out: &mut W,
) -> io::Result<()> {
    match format {
        OutputFormat::Csv => write_csv(&results.table, out),
        OutputFormat::Table => {
            for line in format_table(&results.table) {
                writeln!(out, "{line}")?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &results.response)?;
            writeln!(out)
        }
    }
}
