//! HTTP backend abstraction for the inference API.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest with automatic retry logic for transient errors.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiClientConfig;
use crate::error::{ApiError, ApiResult};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can POST JSON and receive JSON back.
///
/// This abstraction allows for dependency injection of HTTP clients,
/// making it easy to test code that depends on HTTP requests. It is an
/// implementation detail — external code should use `DefaultAskClient`
/// through the core port traits.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST `body` to `url` and deserialize the JSON response.
    async fn post_json<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        body: &serde_json::Value,
    ) -> ApiResult<T>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest with retry logic.
///
/// Implements exponential backoff for transient server errors (5xx)
/// and network errors. Client errors (4xx) are never retried.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay: Duration,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub(crate) fn new(config: &ApiClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
        }
    }

    /// Whether a failed attempt should be retried.
    fn is_transient(result: &ApiResult<reqwest::Response>) -> bool {
        match result {
            Ok(response) => response.status().is_server_error(),
            Err(ApiError::Network(e)) => !e.is_builder(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        body: &serde_json::Value,
    ) -> ApiResult<T> {
        let mut attempt: u8 = 0;
        loop {
            let result = self
                .client
                .post(url.clone())
                .json(body)
                .send()
                .await
                .map_err(ApiError::from);

            if attempt < self.max_retries && Self::is_transient(&result) {
                let delay = self.retry_base_delay * 2u32.pow(u32::from(attempt));
                tracing::debug!(
                    url = %url,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis(),
                    "Transient backend failure, retrying"
                );
                attempt += 1;
                tokio::time::sleep(delay).await;
                continue;
            }

            let response = result?;
            let status = response.status();
            if !status.is_success() {
                return Err(ApiError::RequestFailed {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            return response.json::<T>().await.map_err(ApiError::from);
        }
    }
}

// ============================================================================
// Fake Backend (tests)
// ============================================================================
