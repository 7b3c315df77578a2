//! Answer playback controller — implements the `SpeechOutput` port.
//!
//! Playback is fetch-then-play: the synthesis adapter hands back a clip
//! URL, this controller downloads the bytes and starts them on the
//! audio sink. One controller instance is shared by every lane in the
//! session, so starting playback anywhere stops whatever was playing.

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;

use askql_core::ports::{SpeechOutput, SpeechPortError};

use crate::error::VoiceError;
use crate::sink::{AudioSink, DeviceSink};

/// How long to wait for a clip download before giving up.
const CLIP_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

// ── Clip download seam ─────────────────────────────────────────────

/// Downloads synthesized clip bytes.
#[async_trait]
pub trait ClipFetcher: Send + Sync {
    /// Fetch the clip at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, VoiceError>;
}

/// Production fetcher over reqwest.
pub struct HttpClipFetcher {
    client: reqwest::Client,
}

impl HttpClipFetcher {
    /// Create a fetcher with the default client settings.
    pub fn new() -> Result<Self, VoiceError> {
        let client = reqwest::Client::builder()
            .timeout(CLIP_FETCH_TIMEOUT)
            .build()
            .map_err(|e| VoiceError::ClipFetch {
                url: String::new(),
                source: anyhow!(e),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ClipFetcher for HttpClipFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, VoiceError> {
        let fetch_err = |e: reqwest::Error| VoiceError::ClipFetch {
            url: url.to_string(),
            source: anyhow!(e),
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(fetch_err)?
            .error_for_status()
            .map_err(fetch_err)?;

        let bytes = response.bytes().await.map_err(fetch_err)?;
        Ok(bytes.to_vec())
    }
}

// ── Playback controller ────────────────────────────────────────────

/// Shared answer playback controller.
pub struct SpeechPlayback {
    fetcher: Arc<dyn ClipFetcher>,
    sink: Arc<dyn AudioSink>,
}

impl SpeechPlayback {
    /// Open the default output device (on a dedicated audio thread) and
    /// build a controller over it.
    pub fn new() -> Result<Self, VoiceError> {
        let sink = DeviceSink::spawn()?;
        let fetcher = HttpClipFetcher::new()?;
        Ok(Self::with_parts(Arc::new(fetcher), Arc::new(sink)))
    }

    /// Build a controller from explicit parts.
    #[must_use]
    pub fn with_parts(fetcher: Arc<dyn ClipFetcher>, sink: Arc<dyn AudioSink>) -> Self {
        Self { fetcher, sink }
    }
}

#[async_trait]
impl SpeechOutput for SpeechPlayback {
    async fn play(&self, url: Option<&str>) -> Result<(), SpeechPortError> {
        // The previous clip is always torn down, even when there is
        // nothing new to play.
        self.sink.stop();

        let Some(url) = url else {
            return Ok(());
        };

        let bytes = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|e| SpeechPortError::Network(e.to_string()))?;

        tracing::debug!(bytes = bytes.len(), "Playing synthesized answer");
        self.sink
            .play(bytes)
            .map_err(|e| SpeechPortError::Playback(e.to_string()))
    }

    fn stop(&self) {
        self.sink.stop();
    }

    fn is_speaking(&self) -> bool {
        self.sink.is_busy()
    }
}
