use thiserror::Error;

/// Failure of a single request against the listings backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Unexpected response body: {0}")]
    Decode(String),
    #[error("Invalid endpoint: {0}")]
    Endpoint(String),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status: 404, .. })
    }
}
