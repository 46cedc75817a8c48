//! External backend client.

pub mod client;
pub mod types;

pub use client::HttpBackend;

use tourmate_types::error::GatewayError;

/// Map a reqwest transport failure to the gateway error taxonomy.
///
/// Connection-level failures are distinguished from timeouts so callers can
/// show an actionable "server not running" message instead of a generic one.
pub(crate) fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::BackendUnavailable(err.to_string())
    }
}
