//! Azure Resource Graph query driver.
//!
//! Connects to Azure Resource Graph, runs KQL queries across every
//! subscription the credential can see and flattens the rows into a table.
//!
//! ```no_run
//! # async fn demo() -> azure_resource_graph_driver::Result<()> {
//! use azure_resource_graph_driver::{DriverConfig, QueryOptions, QueryOutcome, ResourceGraphDriver};
//!
//! let mut driver = ResourceGraphDriver::new(DriverConfig::default());
//! match driver.query("Resources | project name, type", &QueryOptions::default()).await? {
//!     QueryOutcome::Table(table) => println!("{} rows", table.len()),
//!     QueryOutcome::Response(response) => println!("no rows: {response:?}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod azure;
pub mod config;
mod driver;
mod error;
pub mod models;
pub mod output;
pub mod processing;

pub use config::{ConnectOptions, DriverConfig, QueryOptions};
pub use driver::{QueryOutcome, QueryResults, ResourceGraphDriver};
pub use error::{Error, Result};
