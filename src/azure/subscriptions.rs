//! Subscription listing.

use super::rest;
use crate::config::SUBSCRIPTIONS_API_VERSION;
use crate::error::{Error, Result};
use crate::models::{Subscription, SubscriptionListResult};
use azure_core::auth::TokenCredential;
use std::sync::Arc;

/// Client for `GET /subscriptions`.
#[derive(Clone)]
pub struct SubscriptionClient {
    http: reqwest::Client,
    credential: Arc<dyn TokenCredential>,
    endpoint: String,
    scope: String,
}

impl SubscriptionClient {
    pub fn new(http: reqwest::Client, credential: Arc<dyn TokenCredential>, endpoint: &str) -> Self {
        SubscriptionClient {
            http,
            credential,
            endpoint: endpoint.to_string(),
            scope: format!("{endpoint}/.default"),
        }
    }

    /// List every subscription visible to the credential, following `nextLink`.
    pub async fn list(&self) -> Result<Vec<Subscription>> {
        let mut url = format!(
            "{}/subscriptions?api-version={SUBSCRIPTIONS_API_VERSION}",
            self.endpoint
        );
        let mut subscriptions = Vec::new();
        let mut page_count = 0;

        loop {
            let token = rest::bearer_token(&self.credential, &self.scope).await?;
            let page: SubscriptionListResult =
                rest::send_json(self.http.get(&url).bearer_auth(token), "subscription list").await?;
            log::debug!(
                "got page#{page_count:2} subscriptions=+{} => {}",
                page.value.len(),
                subscriptions.len() + page.value.len()
            );
            subscriptions.extend(page.value);
            page_count += 1;

            match page.next_link.filter(|link| !link.is_empty()) {
                Some(next) if next == url => {
                    return Err(Error::Paging(format!(
                        "nextLink not unique - possible infinite loop: {next}"
                    )));
                }
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(subscriptions)
    }

    /// Subscription IDs in listing order. Entries without an ID are skipped.
    pub async fn list_ids(&self) -> Result<Vec<String>> {
        let ids: Vec<String> = self
            .list()
            .await?
            .into_iter()
            .filter_map(|sub| {
                let id = sub.identifier();
                if id.is_none() {
                    log::warn!("Skipping subscription without an id: {sub:?}");
                }
                id
            })
            .collect();
        log::info!("Found {} subscriptions", ids.len());
        Ok(ids)
    }
}
