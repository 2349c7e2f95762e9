//! Error types for the Resource Graph driver.

/// Result type alias for driver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the driver and its Azure collaborators.
///
/// Authentication, transport and service failures are carried through
/// without translation so callers can inspect the original cause.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Implicit connect before a query did not succeed.
    #[error("Source is not connected. Please call connect() and retry.")]
    NotConnected {
        #[source]
        source: Option<Box<Error>>,
    },

    /// No usable credential, or a token could not be issued.
    #[error("Authentication failed ({context}): {source}")]
    Authentication {
        context: String,
        #[source]
        source: azure_core::Error,
    },

    #[error("Unsupported auth method '{0}' (expected one of: env, cli)")]
    UnknownAuthMethod(String),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success response from an Azure Resource Manager endpoint.
    #[error("Azure service error: {status} {code}: {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },

    /// A `nextLink` pointed back at the page just read.
    #[error("Paging error: {0}")]
    Paging(String),

    #[error("Error parsing {context} JSON: path={path} error={source}")]
    Parse {
        context: &'static str,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn not_connected(source: Error) -> Self {
        Error::NotConnected {
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this is the lazy-connect failure.
    pub fn is_not_connected(&self) -> bool {
        matches!(self, Error::NotConnected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_not_connected_message() {
        let err = Error::NotConnected { source: None };
        assert_eq!(
            err.to_string(),
            "Source is not connected. Please call connect() and retry."
        );
        assert!(err.is_not_connected());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_not_connected_keeps_cause() {
        let err = Error::not_connected(Error::Config("bad endpoint".to_string()));
        let cause = err.source().expect("source should be set");
        assert_eq!(cause.to_string(), "Configuration error: bad endpoint");
    }

    #[test]
    fn test_service_error_display() {
        let err = Error::Service {
            status: 400,
            code: "BadRequest".to_string(),
            message: "Query is invalid".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Azure service error: 400 BadRequest: Query is invalid"
        );
        assert!(!err.is_not_connected());
    }
}
