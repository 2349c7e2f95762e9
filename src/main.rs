use azure_resource_graph_driver::config::{normalize_endpoint, parse_auth_methods};
use azure_resource_graph_driver::output::{print_table, write_results, OutputFormat};
use azure_resource_graph_driver::{DriverConfig, QueryOptions, ResourceGraphDriver};
use clap::Parser;
use colored::Colorize;
use std::error::Error;

/// Run an Azure Resource Graph query across all visible subscriptions.
#[derive(Debug, Parser)]
#[command(name = "arg-query", version)]
struct Cli {
    /// KQL query text
    #[arg(required_unless_present = "file")]
    query: Option<String>,

    /// Read the query from a file
    #[arg(short, long, conflicts_with = "query")]
    file: Option<String>,

    /// Page-size cap ($top)
    #[arg(long)]
    top: Option<u32>,

    /// Send no $top and skip the truncation check
    #[arg(long, conflicts_with = "top")]
    no_top: bool,

    /// Comma separated auth methods, e.g. "env,cli"
    #[arg(long)]
    auth_methods: Option<String>,

    /// Report credential resolution progress on stderr
    #[arg(long)]
    interactive: bool,

    /// Resource Manager endpoint
    #[arg(long, env = "ARG_ENDPOINT")]
    endpoint: Option<String>,

    #[arg(long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    if let Err(e) = log4rs::init_file("log4rs.yml", Default::default()) {
        eprintln!("{} log4rs.yml not loaded: {e}", "WARN".on_yellow());
    }
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let cli = Cli::parse();
    let mut config = DriverConfig::from_env()?;
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = normalize_endpoint(endpoint)?;
    }
    if let Some(methods) = &cli.auth_methods {
        config.connect.auth_methods = parse_auth_methods(methods)?;
    }
    if cli.interactive {
        config.connect.silent = false;
    }

    let mut options: QueryOptions = config.query.clone();
    if cli.no_top {
        options.top = None;
    } else if let Some(top) = cli.top {
        options.top = Some(top);
    }

    let query = match (&cli.query, &cli.file) {
        (_, Some(file)) => std::fs::read_to_string(file)
            .map_err(|e| format!("Error reading query file {file}: {e}"))?,
        (Some(query), None) => query.clone(),
        (None, None) => return Err("no query given".into()),
    };

    let mut driver = ResourceGraphDriver::new(config);
    let results = driver.query_with_results(&query, &options).await?;
    if let Some(warning) = &results.warning {
        eprintln!("{} {warning}", "WARNING".on_red());
    }

    match cli.format {
        OutputFormat::Table => print_table(&results.table),
        format => write_results(&results, format, &mut std::io::stdout().lock())?,
    }

    log::info!("#End main() rows={}", results.table.len());
    Ok(())
}
