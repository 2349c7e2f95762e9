//! Resource Graph query response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tri-state truncation flag; absence is modelled as `None` on the response.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTruncated {
    #[serde(rename = "true")]
    True,
    #[serde(rename = "false")]
    False,
}

/// Raw response returned by the Resource Graph `resources` call.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    /// Number of records matching the query.
    #[serde(default)]
    pub total_records: Option<i64>,
    /// Number of records in this response.
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub result_truncated: Option<ResultTruncated>,
    /// Continuation token when more pages exist.
    #[serde(rename = "$skipToken", default, skip_serializing_if = "Option::is_none")]
    pub skip_token: Option<String>,
    /// Result rows, an array of objects for the `objectArray` format.
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facets: Vec<Value>,
}

impl QueryResponse {
    pub fn is_truncated(&self) -> bool {
        self.result_truncated == Some(ResultTruncated::True)
    }

    /// Number of rows carried in `data`.
    pub fn row_count(&self) -> usize {
        match &self.data {
            Value::Array(rows) => rows.len(),
            Value::Null => 0,
            _ => 1,
        }
    }
}
