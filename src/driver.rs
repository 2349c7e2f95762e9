//! Resource Graph query driver.
//!
//! Holds the connection to Azure Resource Graph and executes ad-hoc KQL
//! queries against every subscription visible to the credential.

use crate::azure::{az_connect, AzCredentials, ResourceGraphClient, SubscriptionClient};
use crate::config::{ConnectOptions, DriverConfig, QueryOptions};
use crate::error::{Error, Result};
use crate::models::{QueryRequest, QueryResponse, Table};
use crate::processing::{check_truncation, TruncationWarning};
use azure_core::auth::TokenCredential;
use colored::Colorize;
use std::fmt;
use std::sync::Arc;

/// Result of [`ResourceGraphDriver::query`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Non-empty flattened rows.
    Table(Table),
    /// The raw response, returned when no rows could be tabulated.
    Response(QueryResponse),
}

/// Result of [`ResourceGraphDriver::query_with_results`].
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResults {
    /// Flattened `data`, empty when the query matched nothing.
    pub table: Table,
    pub response: QueryResponse,
    /// Set when the service truncated results it could not page.
    pub warning: Option<TruncationWarning>,
}

impl QueryResults {
    pub fn into_parts(self) -> (Table, QueryResponse) {
        (self.table, self.response)
    }
}

impl From<QueryResults> for QueryOutcome {
    fn from(results: QueryResults) -> Self {
        if results.table.is_empty() {
            QueryOutcome::Response(results.response)
        } else {
            QueryOutcome::Table(results.table)
        }
    }
}

/// Driver to connect and query from Azure Resource Graph.
///
/// Not synchronised: share an instance across tasks behind a mutex.
pub struct ResourceGraphDriver {
    config: DriverConfig,
    http: reqwest::Client,
    supplied_credential: Option<Arc<dyn TokenCredential>>,
    credentials: Option<AzCredentials>,
    client: Option<ResourceGraphClient>,
    sub_client: Option<SubscriptionClient>,
    subscription_ids: Vec<String>,
    connected: bool,
}

impl fmt::Debug for ResourceGraphDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceGraphDriver")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .field("subscription_ids", &self.subscription_ids)
            .field("connected", &self.connected)
            .finish_non_exhaustive()
    }
}

impl ResourceGraphDriver {
    /// Driver that resolves credentials from the configured auth methods.
    pub fn new(config: DriverConfig) -> Self {
        ResourceGraphDriver {
            config,
            http: reqwest::Client::new(),
            supplied_credential: None,
            credentials: None,
            client: None,
            sub_client: None,
            subscription_ids: Vec::new(),
            connected: false,
        }
    }

    /// Driver that authenticates with `credential` instead of the auth method chain.
    pub fn with_credential(config: DriverConfig, credential: Arc<dyn TokenCredential>) -> Self {
        let mut driver = ResourceGraphDriver::new(config);
        driver.supplied_credential = Some(credential);
        driver
    }

    pub fn connected(&self) -> bool {
        self.connected
    }

    /// Subscriptions captured by the most recent successful connect.
    pub fn subscription_ids(&self) -> &[String] {
        &self.subscription_ids
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Query client built by the last successful connect.
    pub fn client(&self) -> Option<&ResourceGraphClient> {
        self.client.as_ref()
    }

    /// Subscription listing client built by the last successful connect.
    pub fn subscription_client(&self) -> Option<&SubscriptionClient> {
        self.sub_client.as_ref()
    }

    /// Authenticate, build the service clients and list subscriptions.
    ///
    /// Each call repeats the full round trips. On failure no state changes.
    pub async fn connect(&mut self, options: &ConnectOptions) -> Result<()> {
        let scope = self.config.token_scope();
        let credentials = match &self.supplied_credential {
            Some(credential) => AzCredentials::from_credential(credential.clone(), &scope).await?,
            None => {
                az_connect(&options.effective_auth_methods(), options.silent, &scope).await?
            }
        };

        let endpoint = &self.config.endpoint;
        let client = ResourceGraphClient::new(self.http.clone(), credentials.modern.clone(), endpoint);
        let sub_client =
            SubscriptionClient::new(self.http.clone(), credentials.modern.clone(), endpoint);
        let subscription_ids = sub_client.list_ids().await?;

        log::info!(
            "Connected to {endpoint} method={:?} subscriptions={}",
            credentials.method,
            subscription_ids.len()
        );
        self.credentials = Some(credentials);
        self.client = Some(client);
        self.sub_client = Some(sub_client);
        self.subscription_ids = subscription_ids;
        self.connected = true;

        // stderr, so stdout stays clean for query output
        eprintln!("{}", "Connected".green());
        Ok(())
    }

    /// Execute a query, returning the table if it has rows and the raw
    /// response otherwise.
    pub async fn query(&mut self, query: &str, options: &QueryOptions) -> Result<QueryOutcome> {
        let results = self.query_with_results(query, options).await?;
        Ok(results.into())
    }

    /// Execute a query and return both the flattened table and the raw response.
    ///
    /// Connects first if needed; a failed implicit connect returns
    /// [`Error::NotConnected`] without sending the query.
    pub async fn query_with_results(
        &mut self,
        query: &str,
        options: &QueryOptions,
    ) -> Result<QueryResults> {
        if !self.connected {
            let connect_options = self.config.connect.clone();
            if let Err(e) = self.connect(&connect_options).await {
                log::warn!("Implicit connect failed: {e}");
                return Err(Error::not_connected(e));
            }
        }
        let client = match (&self.client, self.connected) {
            (Some(client), true) => client,
            _ => return Err(Error::NotConnected { source: None }),
        };

        let request = QueryRequest::new(query, &self.subscription_ids, options);
        let response = client.resources(&request).await?;

        let warning = check_truncation(&response, options.top);
        if let Some(warning) = &warning {
            log::warn!("{warning}");
        }

        let table = Table::from_records(&response.data);
        log::info!(
            "Query returned rows={} columns={} truncated={}",
            table.len(),
            table.columns.len(),
            response.is_truncated()
        );
        Ok(QueryResults {
            table,
            response,
            warning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn results(data: serde_json::Value) -> QueryResults {
        let response = QueryResponse {
            data,
            ..Default::default()
        };
        QueryResults {
            table: Table::from_records(&response.data),
            response,
            warning: None,
        }
    }

    #[test]
    fn test_outcome_table_when_rows() {
        let outcome: QueryOutcome = results(json!([{"name": "vm-01"}])).into();
        match outcome {
            QueryOutcome::Table(table) => assert_eq!(table.get(0, "name"), Some(&json!("vm-01"))),
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn test_outcome_response_when_empty() {
        let outcome: QueryOutcome = results(json!([])).into();
        assert!(matches!(outcome, QueryOutcome::Response(ref r) if r.row_count() == 0));
    }

    #[test]
    fn test_into_parts() {
        let (table, response) = results(json!([{"id": "a"}])).into_parts();
        assert_eq!(table.len(), 1);
        assert_eq!(response.row_count(), 1);
    }

    #[test]
    fn test_new_driver_is_disconnected() {
        let driver = ResourceGraphDriver::new(DriverConfig::default());
        assert!(!driver.connected());
        assert!(driver.subscription_ids().is_empty());
        assert!(format!("{driver:?}").contains("connected: false"));
    }
}
