// ABOUTME: Error type for vendor API calls

use thiserror::Error;

/// Errors returned by [`super::VendorApi`] operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, TLS).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server rejected request ({status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Rejected {
        status: u16,
        /// Human-readable `detail` from the response body, when present
        detail: Option<String>,
    },

    /// A success response whose body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Message suitable for showing to the user.
    ///
    /// The server's `detail` wins; every other failure collapses to `fallback`.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}
