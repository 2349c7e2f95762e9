//! CSV output for query results.

use crate::models::{cell_to_string, Table};
use itertools::Itertools;
use std::io::{self, Write};

/// Write `table` as CSV, header first.
pub fn write_csv<W: Write>(table: &Table, out: &mut W) -> io::Result<()> {
    log::debug!(
        "write_csv() columns={} rows={}",
        table.columns.len(),
        table.len()
    );
    writeln!(
        out,
        "{}",
        table.columns.iter().map(|c| escape_csv_field(c)).join(",")
    )?;
    for row in &table.rows {
        writeln!(
            out,
            "{}",
            row.iter()
                .map(|cell| escape_csv_field(&cell_to_string(cell)))
                .join(",")
        )?;
    }
    Ok(())
}

fn escape_csv_field(input: &str) -> String {
    if input.contains(',') || input.contains('"') || input.contains('\n') {
        // Enclose in double quotes and double any embedded quotes.
        // No space after the comma, excel does not like it.
        let escaped = input.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        input.to_string()
    }
}
