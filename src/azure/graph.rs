//! Azure Resource Graph query execution.

use super::rest;
use crate::config::RESOURCE_GRAPH_API_VERSION;
use crate::error::{Error, Result};
use crate::models::{QueryRequest, QueryResponse};
use azure_core::auth::TokenCredential;
use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;

/// Client for the Resource Graph `resources` operation.
#[derive(Clone)]
pub struct ResourceGraphClient {
    http: reqwest::Client,
    credential: Arc<dyn TokenCredential>,
    endpoint: String,
    scope: String,
}

impl ResourceGraphClient {
    pub fn new(http: reqwest::Client, credential: Arc<dyn TokenCredential>, endpoint: &str) -> Self {
        ResourceGraphClient {
            http,
            credential,
            endpoint: endpoint.to_string(),
            scope: format!("{endpoint}/.default"),
        }
    }

    fn resources_url(&self) -> String {
        format!(
            "{}/providers/Microsoft.ResourceGraph/resources?api-version={RESOURCE_GRAPH_API_VERSION}",
            self.endpoint
        )
    }

    /// Submit a query and return the raw service response.
    pub async fn resources(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let body = serde_json::to_string(request).map_err(|source| Error::Parse {
            context: "query request",
            path: String::new(),
            source,
        })?;
        log::debug!(
            "resources() subscriptions={} top={:?} query=[[{}]]",
            request.subscriptions.len(),
            request.options.top,
            request.query
        );

        let token = rest::bearer_token(&self.credential, &self.scope).await?;
        let builder = self
            .http
            .post(self.resources_url())
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        let response: QueryResponse = rest::send_json(builder, "resources response").await?;

        log::debug!(
            "resources() count={:?} total_records={:?} result_truncated={:?}",
            response.count,
            response.total_records,
            response.result_truncated
        );
        Ok(response)
    }
}
