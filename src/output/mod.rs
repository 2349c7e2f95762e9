//! Output formatting for query results.
//!
//! - [`csv`] - CSV output
//! - [`terminal`] - aligned terminal output
//! - [`results`] - format selection for the CLI

mod csv;
mod results;
mod terminal;

pub use csv::write_csv;
pub use results::{write_results, OutputFormat};
pub use terminal::{format_field, format_table, print_table};
