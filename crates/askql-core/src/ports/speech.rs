//! Speech ports — answer synthesis (text → audio URL) and playback.
//!
//! Synthesis is a backend call and lives on the API adapter; playback of
//! the resulting URL is an audio concern and lives on the voice adapter.
//! The session layer only sees these two traits.

use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by the speech ports.
#[derive(Debug, Error)]
pub enum SpeechPortError {
    /// Synthesis failed on the backend.
    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    /// The synthesized clip could not be played.
    #[error("Speech playback failed: {0}")]
    Playback(String),

    /// The clip could not be fetched.
    #[error("Network error: {0}")]
    Network(String),

    /// No speech engine is available on this platform.
    #[error("Speech is not supported in this environment")]
    Unsupported,
}

/// Port trait for synthesizing speech for an answer.
#[async_trait]
pub trait SpeechSynthesisPort: Send + Sync {
    /// Synthesize `text` and return a URL for the audio clip, or `None`
    /// when synthesis is unavailable for this deployment.
    async fn synthesize(&self, text: &str) -> Result<Option<String>, SpeechPortError>;
}

/// Port trait for playing synthesized speech.
///
/// One implementation instance is shared by however many lanes the session
/// runs: starting playback from any lane stops playback started from
/// another. That sharing is a deliberate injection decision made at the
/// composition root, not a module-global.
#[async_trait]
pub trait SpeechOutput: Send + Sync {
    /// Play the clip at `url`, stopping any current playback first.
    ///
    /// `None` still stops prior playback but starts nothing.
    async fn play(&self, url: Option<&str>) -> Result<(), SpeechPortError>;

    /// Stop any current playback.
    fn stop(&self);

    /// Whether a clip is currently playing.
    fn is_speaking(&self) -> bool;
}
