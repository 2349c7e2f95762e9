//! Credential resolution for Azure Resource Manager.
//!
//! Wraps `azure_identity` credentials and picks the first configured
//! method that can issue a token for the management scope.

use crate::error::{Error, Result};
use azure_core::auth::TokenCredential;
use azure_identity::{AzureCliCredential, EnvironmentCredential, TokenCredentialOptions};
use colored::Colorize;
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A credential source that can be tried during connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMethod {
    /// Service principal from `AZURE_TENANT_ID`, `AZURE_CLIENT_ID` and `AZURE_CLIENT_SECRET`.
    Env,
    /// Token from an existing `az login` session.
    Cli,
}

impl AuthMethod {
    pub fn name(&self) -> &'static str {
        match self {
            AuthMethod::Env => "env",
            AuthMethod::Cli => "cli",
        }
    }

    /// Build the credential. Missing configuration surfaces on the first `get_token`.
    fn credential(&self) -> Arc<dyn TokenCredential> {
        let credential: Arc<dyn TokenCredential> = match self {
            AuthMethod::Env => Arc::new(EnvironmentCredential::new(
                azure_core::new_http_client(),
                TokenCredentialOptions::default(),
            )),
            AuthMethod::Cli => Arc::new(AzureCliCredential::new()),
        };
        credential
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AuthMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "env" | "environment" => Ok(AuthMethod::Env),
            "cli" | "azurecli" => Ok(AuthMethod::Cli),
            other => Err(Error::UnknownAuthMethod(other.to_string())),
        }
    }
}

/// Credential handle obtained at connect time.
#[derive(Clone)]
pub struct AzCredentials {
    /// Method that produced the credential, `None` when it was supplied by the caller.
    pub method: Option<AuthMethod>,
    /// Credential used to build the service clients.
    pub modern: Arc<dyn TokenCredential>,
}

impl fmt::Debug for AzCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzCredentials")
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

impl AzCredentials {
    /// Wrap a caller supplied credential after checking it can issue a token for `scope`.
    pub async fn from_credential(credential: Arc<dyn TokenCredential>, scope: &str) -> Result<Self> {
        credential
            .get_token(&[scope])
            .await
            .map_err(|source| Error::Authentication {
                context: "supplied credential".to_string(),
                source,
            })?;
        log::info!("Supplied credential accepted for scope {scope}");
        Ok(AzCredentials {
            method: None,
            modern: credential,
        })
    }
}

/// Try each auth method in order and return the first credential that can
/// issue a token for `scope`.
///
/// With `silent == false` each attempt is also reported on stderr.
pub async fn az_connect(auth_methods: &[AuthMethod], silent: bool, scope: &str) -> Result<AzCredentials> {
    if auth_methods.is_empty() {
        return Err(Error::Config("no auth methods configured".to_string()));
    }
    let mut last_error = None;

    for method in auth_methods {
        log::debug!("az_connect() trying auth method {method}");
        let credential = method.credential();
        let attempt = credential.get_token(&[scope]).await.map(|_| credential);
        match attempt {
            Ok(credential) => {
                log::info!("Authenticated using auth method {method}");
                if !silent {
                    eprintln!("{} using {}", "Authenticated".green(), method.name().bold());
                }
                return Ok(AzCredentials {
                    method: Some(*method),
                    modern: credential,
                });
            }
            Err(e) => {
                log::debug!("auth method {method} failed: {e}");
                if !silent {
                    eprintln!("{} auth method {}: {e}", "failed".on_red(), method.name());
                }
                last_error = Some(e);
            }
        }
    }

    let methods = auth_methods.iter().join(", ");
    log::warn!("No credential found using auth methods [{methods}]");
    let source = last_error.unwrap_or_else(|| {
        azure_core::Error::message(azure_core::error::ErrorKind::Credential, "no credential")
    });
    Err(Error::Authentication {
        context: format!("auth methods [{methods}]"),
        source,
    })
}
