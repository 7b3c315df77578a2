//! Audio adapter error types.

/// Errors that can occur in the audio adapter.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    /// Failed to open audio output stream.
    #[error("Failed to open audio output stream: {0}")]
    OutputStreamError(String),

    /// The audio thread died or was shut down.
    #[error("Audio thread is not running")]
    AudioThreadDied,

    /// The clip bytes could not be decoded as audio.
    #[error("Failed to decode audio clip: {0}")]
    DecodeError(String),

    /// The synthesized clip could not be downloaded.
    #[error("Failed to fetch audio clip from '{url}': {source}")]
    ClipFetch {
        /// The clip URL.
        url: String,
        /// Underlying HTTP failure.
        source: anyhow::Error,
    },

    /// No speech recognition engine is available in this environment.
    #[error("Speech recognition is not available in this environment")]
    RecognizerUnavailable,

    /// The recognition engine failed to start or produce results.
    #[error("Speech recognition failed: {0}")]
    RecognitionError(String),

    /// Speech capture is already running.
    #[error("Speech capture is already running")]
    AlreadyRecording,

    /// Speech capture is not running.
    #[error("Speech capture is not running")]
    NotRecording,
}
