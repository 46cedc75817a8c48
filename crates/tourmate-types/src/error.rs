use thiserror::Error;

/// Errors from gateway operations (session and chat proxying).
///
/// Every transport-level failure is converted into one of these variants at
/// the client boundary; callers branch on error kind, never on raw transport
/// errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required argument (message, session id) was missing or empty.
    /// Raised before any network call is made.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The backend could not be reached at all (connection refused, DNS).
    #[error("cannot connect to backend: {0}")]
    BackendUnavailable(String),

    /// The backend was reachable but replied with a failure status.
    #[error("backend responded with status {status}: {body}")]
    BackendError { status: u16, body: String },

    /// The request did not complete within the configured timeout.
    #[error("backend request timed out")]
    Timeout,

    /// The backend replied with success but the body could not be decoded.
    #[error("malformed backend response: {0}")]
    Malformed(String),
}

impl GatewayError {
    /// Whether this error means the backend is not running / not reachable,
    /// as opposed to reachable-but-failing.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, GatewayError::BackendUnavailable(_))
    }
}

/// Errors from the persisted session store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store io error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_display() {
        let err = GatewayError::BackendError {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "backend responded with status 502: bad gateway"
        );
    }

    #[test]
    fn test_is_unreachable() {
        assert!(GatewayError::BackendUnavailable("refused".to_string()).is_unreachable());
        assert!(!GatewayError::Timeout.is_unreachable());
        assert!(
            !GatewayError::BackendError {
                status: 500,
                body: String::new()
            }
            .is_unreachable()
        );
    }
}
