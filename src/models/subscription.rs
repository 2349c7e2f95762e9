//! Subscription descriptors returned by the subscriptions API.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static SUBSCRIPTION_ID_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_subscription_id_regex() -> &'static Regex {
    SUBSCRIPTION_ID_REGEX
        .get_or_init(|| Regex::new(r"(?i)^/subscriptions/([^/]+)/?$").expect("Invalid Regex"))
}

/// A subscription visible to the credential.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Resource ID, `/subscriptions/{id}`.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl Subscription {
    /// The subscription GUID, taken from `subscriptionId` or parsed from `id`.
    pub fn identifier(&self) -> Option<String> {
        if let Some(sub_id) = self.subscription_id.as_ref().filter(|s| !s.is_empty()) {
            return Some(sub_id.clone());
        }
        let id = self.id.as_deref()?;
        get_subscription_id_regex()
            .captures(id)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// One page of the subscription listing.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionListResult {
    #[serde(default)]
    pub value: Vec<Subscription>,
    #[serde(default)]
    pub next_link: Option<String>,
}
