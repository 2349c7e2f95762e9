//! Shared HTTP plumbing for Azure Resource Manager calls.

use crate::error::{Error, Result};
use azure_core::auth::TokenCredential;
use colored::Colorize;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

/// ARM error envelope: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Fetch a bearer token for `scope`.
pub(crate) async fn bearer_token(credential: &Arc<dyn TokenCredential>, scope: &str) -> Result<String> {
    let token = credential
        .get_token(&[scope])
        .await
        .map_err(|source| Error::Authentication {
            context: format!("token for {scope}"),
            source,
        })?;
    Ok(token.token.secret().to_string())
}

/// Send a request and decode a JSON success body into `T`.
///
/// Non-success statuses become [`Error::Service`]; nothing is retried.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    context: &'static str,
) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    log::debug!("{context}: status={status} body.len()={}", body.len());
    log::trace!("{context}: body=\n┎######\n{body}\n┖######");

    if !status.is_success() {
        let (code, message) = parse_error_body(status, &body);
        log::warn!(
            "{failed} {context} status={status} code={code}",
            failed = "failed".on_red(),
        );
        return Err(Error::Service {
            status: status.as_u16(),
            code,
            message,
        });
    }

    parse_json(&body, context)
}

/// Decode `body`, reporting the JSON path of any mismatch.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &str, context: &'static str) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::error!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", body);
        Error::Parse {
            context,
            path: e.path().to_string(),
            source: e.into_inner(),
        }
    })
}

fn parse_error_body(status: reqwest::StatusCode, body: &str) -> (String, String) {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.code, envelope.error.message),
        Err(_) => (
            status.canonical_reason().unwrap_or("Unknown").to_string(),
            body.trim().to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QueryResponse;

    #[test]
    fn test_parse_error_envelope() {
        let body = r#"{"error":{"code":"BadRequest","message":"Please provide a valid query","details":[]}}"#;
        let (code, message) = parse_error_body(reqwest::StatusCode::BAD_REQUEST, body);
        assert_eq!(code, "BadRequest");
        assert_eq!(message, "Please provide a valid query");
    }

    #[test]
    fn test_parse_error_plain_body() {
        let (code, message) =
            parse_error_body(reqwest::StatusCode::SERVICE_UNAVAILABLE, " upstream down \n");
        assert_eq!(code, "Service Unavailable");
        assert_eq!(message, "upstream down");
    }

    #[test]
    fn test_parse_json_reports_path() {
        let body = r#"{"count": 1, "resultTruncated": "maybe", "data": []}"#;
        let err = parse_json::<QueryResponse>(body, "resources response").unwrap_err();
        match err {
            Error::Parse { context, path, .. } => {
                assert_eq!(context, "resources response");
                assert_eq!(path, "resultTruncated");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
