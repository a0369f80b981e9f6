//! Errors surfaced by the HubSpot client

use thiserror::Error;

/// Failure of a single client operation.
///
/// HTTP failures are deliberately not split into client and server errors:
/// any non-2xx response becomes [`CrmError::Http`] carrying the raw status
/// and response body.
#[derive(Debug, Error)]
pub enum CrmError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
impl CrmError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CrmError {
    fn from(err: reqwest::Error) -> Self {
        CrmError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for CrmError {
    fn from(err: serde_json::Error) -> Self {
        CrmError::Decode(err.to_string())
    }
}
