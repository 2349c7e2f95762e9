//! Driver configuration and defaults.

use crate::azure::AuthMethod;
use crate::error::{Error, Result};

/// Default page-size cap sent as `$top`.
pub const DEFAULT_TOP: u32 = 1000;

/// Azure public cloud Resource Manager endpoint.
pub const RESOURCE_MANAGER_ENDPOINT: &str = "https://management.azure.com";

pub const RESOURCE_GRAPH_API_VERSION: &str = "2021-03-01";
pub const SUBSCRIPTIONS_API_VERSION: &str = "2020-01-01";

/// Where the truncation warning points users for paging guidance.
pub const TRUNCATION_DOCS_URL: &str = "https://aka.ms/arg-results-truncated";

/// Options for [`crate::ResourceGraphDriver::connect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Credential sources, tried in order. Empty means the default list.
    pub auth_methods: Vec<AuthMethod>,
    /// Suppress user-facing progress output while resolving credentials.
    pub silent: bool,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        ConnectOptions {
            auth_methods: default_auth_methods(),
            silent: true,
        }
    }
}

impl ConnectOptions {
    /// Auth methods to use, falling back to the defaults when none are set.
    pub fn effective_auth_methods(&self) -> Vec<AuthMethod> {
        if self.auth_methods.is_empty() {
            default_auth_methods()
        } else {
            self.auth_methods.clone()
        }
    }
}

fn default_auth_methods() -> Vec<AuthMethod> {
    vec![AuthMethod::Env, AuthMethod::Cli]
}

/// Per-query options for [`crate::ResourceGraphDriver::query_with_results`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Page-size cap. `None` sends no `$top` and disables the truncation check.
    pub top: Option<u32>,
    pub skip: Option<u32>,
    /// Continuation token from a previous response.
    pub skip_token: Option<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        QueryOptions {
            top: Some(DEFAULT_TOP),
            skip: None,
            skip_token: None,
        }
    }
}

/// Top level driver configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Resource Manager base URL, without trailing slash.
    pub endpoint: String,
    /// Options used for the implicit connect made by a query.
    pub connect: ConnectOptions,
    /// Default query options for callers that do not build their own.
    pub query: QueryOptions,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            endpoint: RESOURCE_MANAGER_ENDPOINT.to_string(),
            connect: ConnectOptions::default(),
            query: QueryOptions::default(),
        }
    }
}

impl DriverConfig {
    /// Build a config from `ARG_ENDPOINT`, `ARG_AUTH_METHODS`, `ARG_SILENT`
    /// and `ARG_TOP`, using defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut config = DriverConfig::default();
        if let Ok(endpoint) = std::env::var("ARG_ENDPOINT") {
            config.endpoint = normalize_endpoint(&endpoint)?;
        }
        if let Ok(methods) = std::env::var("ARG_AUTH_METHODS") {
            config.connect.auth_methods = parse_auth_methods(&methods)?;
        }
        if let Ok(silent) = std::env::var("ARG_SILENT") {
            config.connect.silent = parse_bool(&silent)?;
        }
        if let Ok(top) = std::env::var("ARG_TOP") {
            config.query.top = parse_top(&top)?;
        }
        log::debug!("DriverConfig::from_env() => {config:?}");
        Ok(config)
    }

    /// Token scope for the configured Resource Manager endpoint.
    pub fn token_scope(&self) -> String {
        format!("{}/.default", self.endpoint)
    }
}

/// Trim and validate an endpoint URL.
pub fn normalize_endpoint(input: &str) -> Result<String> {
    let endpoint = input.trim().trim_end_matches('/');
    if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
        return Err(Error::Config(format!(
            "endpoint must be an http(s) URL: '{input}'"
        )));
    }
    Ok(endpoint.to_string())
}

/// Parse a comma separated list such as `"env, cli"`.
pub fn parse_auth_methods(input: &str) -> Result<Vec<AuthMethod>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

fn parse_bool(input: &str) -> Result<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(Error::Config(format!("expected a boolean, got '{other}'"))),
    }
}

/// Parse a `$top` value; `none` disables the cap.
pub fn parse_top(input: &str) -> Result<Option<u32>> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    input
        .parse::<u32>()
        .map(Some)
        .map_err(|e| Error::Config(format!("invalid top '{input}': {e}")))
}
