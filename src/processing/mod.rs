//! Result processing:
//! - [`flatten`] - JSON-to-table flattening
//! - [`truncation`] - truncated-result detection

mod flatten;
mod truncation;

pub use flatten::{json_normalize, SEPARATOR};
pub use truncation::{check_truncation, TruncationWarning};
