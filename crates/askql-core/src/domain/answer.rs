//! Answer payload shapes and per-request overrides.
//!
//! `AskResponse` mirrors the backend's answer record. The backend reports
//! failures on two channels: a transport-level error (the HTTP call fails)
//! and a semantic error embedded in an otherwise well-formed payload. The
//! embedded channel is plain data here — an `AskResponse` with a non-empty
//! `error` field is still a successful response as far as the request
//! lifecycle is concerned.

use serde::{Deserialize, Serialize};

/// Which backend function answers the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AskRoute {
    /// SQL agent — plans and executes SQL against the sample database.
    SqlAgent,

    /// SQL database chain — single-chain SQL generation and execution.
    SqlChain,

    /// One-shot question answering over indexed documents.
    OneShot,

    /// Conversational chat.
    Chat,
}

impl AskRoute {
    /// Backend function name for this route (path segment on the API).
    #[must_use]
    pub const fn function_name(self) -> &'static str {
        match self {
            Self::SqlAgent => "SqlChat",
            Self::SqlChain => "SqlChain",
            Self::OneShot => "QuestionAnswering",
            Self::Chat => "Chat",
        }
    }
}

/// One answer record from the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskResponse {
    /// Supporting content snippets the answer was grounded on.
    #[serde(default)]
    pub data_points: Vec<String>,

    /// The answer text.
    #[serde(default)]
    pub answer: String,

    /// Reasoning trace (intermediate steps); shape varies by route.
    #[serde(default)]
    pub thoughts: serde_json::Value,

    /// Semantic error reported inside a successful payload.
    ///
    /// The backend sends `""` when there is no error; both `""` and a
    /// missing field normalise to no embedded error.
    #[serde(default)]
    pub error: Option<String>,
}

impl AskResponse {
    /// The embedded error, if the payload actually carries one.
    #[must_use]
    pub fn embedded_error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.trim().is_empty())
    }
}

/// Tunable answer-generation parameters, one set per session.
///
/// Setters clamp to the ranges the configuration panel allows rather than
/// rejecting out-of-range values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskOverrides {
    /// How many documents to retrieve from search (1–100).
    pub top: u32,

    /// Sampling temperature (0.0–1.0).
    pub temperature: f32,

    /// Maximum answer length in tokens (0–4000).
    pub token_length: u32,

    /// Full prompt template override, if any.
    pub prompt_template: String,

    /// Prompt prefix, prepended to the built-in template.
    pub prompt_template_prefix: String,

    /// Prompt suffix, appended to the built-in template.
    pub prompt_template_suffix: String,
}

impl Default for AskOverrides {
    fn default() -> Self {
        Self {
            top: 10,
            temperature: 0.3,
            token_length: 500,
            prompt_template: String::new(),
            prompt_template_prefix: String::new(),
            prompt_template_suffix: String::new(),
        }
    }
}

impl AskOverrides {
    /// Set the retrieval count, clamped to 1–100.
    pub fn set_top(&mut self, top: u32) {
        self.top = top.clamp(1, 100);
    }

    /// Set the temperature, clamped to 0.0–1.0.
    pub fn set_temperature(&mut self, temperature: f32) {
        self.temperature = temperature.clamp(0.0, 1.0);
    }

    /// Set the token length, clamped to 0–4000.
    pub fn set_token_length(&mut self, token_length: u32) {
        self.token_length = token_length.min(4000);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_error_field_is_no_embedded_error() {
        let response = AskResponse {
            error: Some(String::new()),
            ..AskResponse::default()
        };
        assert!(response.embedded_error().is_none());

        let response = AskResponse::default();
        assert!(response.embedded_error().is_none());
    }

    #[test]
    fn non_empty_error_field_is_surfaced() {
        let response = AskResponse {
            answer: "partial answer".to_string(),
            error: Some("Timeout expired".to_string()),
            ..AskResponse::default()
        };
        assert_eq!(response.embedded_error(), Some("Timeout expired"));
        // The answer is still present alongside the embedded error.
        assert_eq!(response.answer, "partial answer");
    }

    #[test]
    fn response_parses_backend_shape() {
        let json = serde_json::json!({
            "data_points": ["Products table"],
            "answer": "There are 77 products.",
            "thoughts": ["SELECT COUNT(*) FROM Products"],
            "error": ""
        });
        let response: AskResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.answer, "There are 77 products.");
        assert_eq!(response.data_points.len(), 1);
        assert!(response.embedded_error().is_none());
    }

    #[test]
    fn overrides_defaults() {
        let overrides = AskOverrides::default();
        assert_eq!(overrides.top, 10);
        assert!((overrides.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(overrides.token_length, 500);
    }

    #[test]
    fn overrides_setters_clamp() {
        let mut overrides = AskOverrides::default();

        overrides.set_top(0);
        assert_eq!(overrides.top, 1);
        overrides.set_top(500);
        assert_eq!(overrides.top, 100);

        overrides.set_temperature(1.7);
        assert!((overrides.temperature - 1.0).abs() < f32::EPSILON);

        overrides.set_token_length(9000);
        assert_eq!(overrides.token_length, 4000);
    }

    #[test]
    fn route_function_names() {
        assert_eq!(AskRoute::SqlAgent.function_name(), "SqlChat");
        assert_eq!(AskRoute::SqlChain.function_name(), "SqlChain");
        assert_eq!(AskRoute::OneShot.function_name(), "QuestionAnswering");
        assert_eq!(AskRoute::Chat.function_name(), "Chat");
    }
}
