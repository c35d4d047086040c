//! Error types for orb-bdd-http

use orb_bdd_state::StateError;
use thiserror::Error;

/// Errors that can occur while preparing or sending a request
#[derive(Error, Debug)]
pub enum HttpError {
    /// Transport or protocol failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// Resolved URL could not be parsed
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Method is not a valid HTTP token
    #[error("invalid HTTP method '{0}'")]
    InvalidMethod(String),

    /// Template resolution failed
    #[error(transparent)]
    State(#[from] StateError),

    /// Body serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        HttpError::Http(err.to_string())
    }
}
