//! Data structures exchanged with Azure Resource Graph:
//! - [`QueryRequest`] - query body sent to the service
//! - [`QueryResponse`] - raw response with truncation flag
//! - [`Subscription`] - subscription descriptors
//! - [`Table`] - flattened tabular results

mod request;
mod response;
mod subscription;
mod table;

pub use request::{QueryRequest, QueryRequestOptions, ResultFormat};
pub use response::{QueryResponse, ResultTruncated};
pub use subscription::{Subscription, SubscriptionListResult};
pub use table::{cell_to_string, Table};
