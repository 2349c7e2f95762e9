//! Azure Resource Manager collaborators.
//!
//! - [`auth`] - credential resolution
//! - [`graph`] - Azure Resource Graph queries
//! - [`subscriptions`] - subscription listing

mod auth;
mod graph;
mod rest;
mod subscriptions;

// Re-export public types and functions
pub use auth::{az_connect, AuthMethod, AzCredentials};
pub use graph::ResourceGraphClient;
pub use subscriptions::SubscriptionClient;
