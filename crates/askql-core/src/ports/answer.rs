//! Answer port — trait abstraction over the backend inference API.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{AskOverrides, AskResponse, AskRoute};

/// Errors returned by [`AnswerPort`] operations.
#[derive(Debug, Error)]
pub enum AnswerPortError {
    /// The backend rejected the request with an HTTP error status.
    #[error("Backend request failed with status {status}: {message}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Response body or status text.
        message: String,
    },

    /// The backend could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a payload we could not interpret.
    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Port trait for asking questions of the backend.
///
/// Implemented by `DefaultAskClient` in `askql-api`. One call per
/// submission; the request lifecycle upstream guarantees at most one
/// in-flight call per lane.
#[async_trait]
pub trait AnswerPort: Send + Sync {
    /// Ask `question` on `route` and return the answer record.
    async fn ask(
        &self,
        route: AskRoute,
        question: &str,
        overrides: &AskOverrides,
    ) -> Result<AskResponse, AnswerPortError>;
}
