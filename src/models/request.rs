//! Resource Graph query request body.

use crate::config::QueryOptions;
use serde::Serialize;

/// Encoding of the `data` field in a query response. Only the
/// one-object-per-row layout is requested.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ResultFormat {
    ObjectArray,
}

/// Request options, serialized with the `$`-prefixed names the service expects.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequestOptions {
    #[serde(rename = "$top", skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,
    #[serde(rename = "$skip", skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(rename = "$skipToken", skip_serializing_if = "Option::is_none")]
    pub skip_token: Option<String>,
    pub result_format: ResultFormat,
}

impl From<&QueryOptions> for QueryRequestOptions {
    fn from(options: &QueryOptions) -> Self {
        QueryRequestOptions {
            top: options.top,
            skip: options.skip,
            skip_token: options.skip_token.clone(),
            result_format: ResultFormat::ObjectArray,
        }
    }
}

/// A single query against the given subscriptions.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub subscriptions: Vec<String>,
    pub query: String,
    pub options: QueryRequestOptions,
}

impl QueryRequest {
    pub fn new(query: &str, subscriptions: &[String], options: &QueryOptions) -> Self {
        QueryRequest {
            subscriptions: subscriptions.to_vec(),
            query: query.to_string(),
            options: options.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_defaults() {
        let subs = vec!["sub-a".to_string(), "sub-b".to_string()];
        let request = QueryRequest::new("Resources | limit 5", &subs, &QueryOptions::default());
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "subscriptions": ["sub-a", "sub-b"],
                "query": "Resources | limit 5",
                "options": {"$top": 1000, "resultFormat": "objectArray"}
            })
        );
    }

    #[test]
    fn test_request_body_paging_fields() {
        let options = QueryOptions {
            top: None,
            skip: Some(10),
            skip_token: Some("tok".to_string()),
        };
        let request = QueryRequest::new("Resources", &[], &options);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body["options"],
            json!({"$skip": 10, "$skipToken": "tok", "resultFormat": "objectArray"})
        );
    }
}
