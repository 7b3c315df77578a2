//! Internal error types for backend API operations.
//!
//! These errors are internal to `askql-api` and are mapped to core port
//! errors at the boundary.

use thiserror::Error;

/// Result type alias for backend API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors related to backend API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// API request failed with an HTTP error status.
    #[error("Backend API request failed with status {status}: {url}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from backend API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// The response envelope carried a record-level error.
    #[error("Backend record error: {message}")]
    RecordError {
        /// Message from the record's `errors` array
        message: String,
    },

    /// The response envelope was empty (no records).
    #[error("Backend returned an empty response envelope")]
    EmptyEnvelope,

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_message_names_status_and_url() {
        let error = ApiError::RequestFailed {
            status: 502,
            url: "https://api.test/SqlChat".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("502"));
        assert!(msg.contains("SqlChat"));
    }

    #[test]
    fn record_error_message_carries_backend_text() {
        let error = ApiError::RecordError {
            message: "KeyError:text".to_string(),
        };
        assert!(error.to_string().contains("KeyError:text"));
    }
}
