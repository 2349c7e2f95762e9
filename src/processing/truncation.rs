//! Truncation check on query responses.

use crate::config::TRUNCATION_DOCS_URL;
use crate::models::QueryResponse;
use std::fmt;

/// Non-fatal notice that a truncated response could not be paged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncationWarning {
    /// Rows actually returned.
    pub returned: usize,
    /// The `$top` cap that was requested.
    pub top: u32,
}

impl fmt::Display for TruncationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unable to paginate the results of the query. \
             Some resources may be missing from the results. \
             To rewrite the query and enable paging, \
             see the docs for an example: {TRUNCATION_DOCS_URL}"
        )
    }
}

/// Warn when the service flags truncation, a cap is set and fewer rows than
/// the cap came back. Mirrors the az cli resource-graph extension check.
pub fn check_truncation(response: &QueryResponse, top: Option<u32>) -> Option<TruncationWarning> {
    let top = top?;
    let returned = response.row_count();
    if response.is_truncated() && returned < top as usize {
        Some(TruncationWarning { returned, top })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResultTruncated;
    use serde_json::{json, Value};

    fn response(truncated: Option<ResultTruncated>, rows: usize) -> QueryResponse {
        let data: Vec<Value> = (0..rows).map(|i| json!({ "i": i })).collect();
        QueryResponse {
            result_truncated: truncated,
            data: Value::Array(data),
            ..Default::default()
        }
    }

    #[test]
    fn test_truncated_under_cap_warns() {
        let warning = check_truncation(&response(Some(ResultTruncated::True), 5), Some(1000));
        assert_eq!(
            warning,
            Some(TruncationWarning {
                returned: 5,
                top: 1000
            })
        );
    }

    #[test]
    fn test_not_truncated_never_warns() {
        assert_eq!(
            check_truncation(&response(Some(ResultTruncated::False), 5), Some(1000)),
            None
        );
        assert_eq!(
            check_truncation(&response(Some(ResultTruncated::False), 2000), Some(1000)),
            None
        );
        assert_eq!(check_truncation(&response(None, 5), Some(1000)), None);
    }

    #[test]
    fn test_truncated_at_or_over_cap_no_warning() {
        assert_eq!(
            check_truncation(&response(Some(ResultTruncated::True), 10), Some(10)),
            None
        );
        assert_eq!(
            check_truncation(&response(Some(ResultTruncated::True), 11), Some(10)),
            None
        );
    }

    #[test]
    fn test_no_cap_no_warning() {
        assert_eq!(check_truncation(&response(Some(ResultTruncated::True), 5), None), None);
    }

    #[test]
    fn test_warning_message() {
        let text = TruncationWarning { returned: 5, top: 1000 }.to_string();
        assert!(text.starts_with("Unable to paginate the results of the query."));
        assert!(text.ends_with("https://aka.ms/arg-results-truncated"));
    }
}
