//! The backend API client implementing the core ports.

use async_trait::async_trait;
use url::Url;

use askql_core::domain::{AskOverrides, AskResponse, AskRoute};
use askql_core::ports::{AnswerPort, AnswerPortError, SpeechPortError, SpeechSynthesisPort};

use crate::config::ApiClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::wire::{RequestEnvelope, ResponseEnvelope};

/// Function name for the speech synthesis endpoint.
const TEXT_TO_SPEECH: &str = "TextToSpeech";

/// Backend API client, generic over the HTTP layer.
pub struct AskClient<B: HttpBackend> {
    backend: B,
    config: ApiClientConfig,
}

/// The production client: [`AskClient`] over reqwest.
pub type DefaultAskClient = AskClient<ReqwestBackend>;

impl DefaultAskClient {
    /// Create a client for the backend described by `config`.
    #[must_use]
    pub fn new(config: ApiClientConfig) -> Self {
        let backend = ReqwestBackend::new(&config);
        Self { backend, config }
    }
}

impl<B: HttpBackend> AskClient<B> {
    #[cfg(test)]
    pub(crate) const fn with_backend(backend: B, config: ApiClientConfig) -> Self {
        Self { backend, config }
    }

    /// Build the URL for a function endpoint, with the question and
    /// retrieval count as query parameters (the way the backend reads
    /// them) and the function key when configured.
    fn function_url(
        &self,
        function: &str,
        question: Option<&str>,
        top: Option<u32>,
    ) -> ApiResult<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/{function}"))?;

        {
            let mut pairs = url.query_pairs_mut();
            if let Some(question) = question {
                pairs.append_pair("question", question);
            }
            if let Some(top) = top {
                pairs.append_pair("topK", &top.to_string());
            }
            if let Some(key) = &self.config.api_key {
                pairs.append_pair("code", key);
            }
        }
        Ok(url)
    }

    async fn call_answer_function(
        &self,
        route: AskRoute,
        question: &str,
        overrides: &AskOverrides,
    ) -> ApiResult<AskResponse> {
        let url = self.function_url(route.function_name(), Some(question), Some(overrides.top))?;
        let envelope = RequestEnvelope::single(question, Some(overrides));
        let body = serde_json::to_value(&envelope)?;

        tracing::debug!(function = route.function_name(), "Asking backend");
        let response: ResponseEnvelope = self.backend.post_json(&url, &body).await?;
        response.into_answer()
    }

    async fn call_speech_function(&self, text: &str) -> ApiResult<Option<String>> {
        let url = self.function_url(TEXT_TO_SPEECH, None, None)?;
        let envelope = RequestEnvelope::single(text, None);
        let body = serde_json::to_value(&envelope)?;

        let response: ResponseEnvelope = self.backend.post_json(&url, &body).await?;
        Ok(response.into_speech()?.speech_url)
    }
}

// ── Port error mapping ─────────────────────────────────────────────

fn to_answer_port_error(error: ApiError) -> AnswerPortError {
    match error {
        ApiError::RequestFailed { status, url } => AnswerPortError::Backend {
            status,
            message: url,
        },
        ApiError::Network(e) => AnswerPortError::Network(e.to_string()),
        ApiError::RecordError { message } => AnswerPortError::Backend {
            status: 200,
            message,
        },
        e @ (ApiError::InvalidResponse { .. }
        | ApiError::EmptyEnvelope
        | ApiError::JsonParse(_)) => AnswerPortError::InvalidResponse(e.to_string()),
        e @ ApiError::InvalidUrl(_) => AnswerPortError::Internal(e.to_string()),
    }
}

#[async_trait]
impl<B: HttpBackend> AnswerPort for AskClient<B> {
    async fn ask(
        &self,
        route: AskRoute,
        question: &str,
        overrides: &AskOverrides,
    ) -> Result<AskResponse, AnswerPortError> {
        self.call_answer_function(route, question, overrides)
            .await
            .map_err(to_answer_port_error)
    }
}

#[async_trait]
impl<B: HttpBackend> SpeechSynthesisPort for AskClient<B> {
    async fn synthesize(&self, text: &str) -> Result<Option<String>, SpeechPortError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        self.call_speech_function(text)
            .await
            .map_err(|e| SpeechPortError::Synthesis(e.to_string()))
    }
}
