// errors.rs
use crate::domain::CriteriaError;
use thiserror::Error;

/// Errors raised while serving the page itself. Failures of the listings
/// backend never get here; they are shown inside the page.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Internal Server Error")]
    InternalError,
}

impl From<CriteriaError> for ServerError {
    fn from(e: CriteriaError) -> Self {
        ServerError::BadRequest(e.to_string())
    }
}
