//! Terminal output utilities.

use crate::models::{cell_to_string, Table};
use colored::Colorize;
use itertools::Itertools;

/// Widest column rendered before values are left to overflow.
const MAX_COLUMN_WIDTH: usize = 48;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Render `table` as aligned quoted columns, one line per row.
pub fn format_table(table: &Table) -> Vec<String> {
    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let widest = cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|c| c.len())
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0);
            (widest + 2).min(MAX_COLUMN_WIDTH)
        })
        .collect();

    let mut lines = Vec::with_capacity(cells.len() + 1);
    lines.push(
        table
            .columns
            .iter()
            .zip(&widths)
            .map(|(name, w)| format_field(name, *w))
            .join(", "),
    );
    for row in &cells {
        lines.push(
            row.iter()
                .zip(&widths)
                .map(|(cell, w)| format_field(cell, *w))
                .join(", "),
        );
    }
    lines
}

/// Print `table` to stdout followed by a row count.
pub fn print_table(table: &Table) {
    for line in format_table(table) {
        println!("{line}");
    }
    println!("#{}# rows={}", "END".on_blue(), table.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("test", 6), "\"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "  \"42\"");
    }

    #[test]
    fn test_format_table() {
        let table = Table {
            columns: vec!["name".to_string(), "tags.env".to_string()],
            rows: vec![
                vec![json!("vm-01"), json!("prod")],
                vec![json!("st"), serde_json::Value::Null],
            ],
        };
        let lines = format_table(&table);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], " \"name\", \"tags.env\"");
        assert_eq!(lines[1], "\"vm-01\",     \"prod\"");
        assert_eq!(lines[2], "   \"st\",         \"\"");
    }
}
