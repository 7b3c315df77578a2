#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod device;
pub mod error;
pub mod input;
pub mod playback;
pub mod sink;

// Re-export key types for convenience
pub use error::VoiceError;
pub use input::{
    InputState, RecognizerBackend, RecognizerFactory, RecognizerResult, SpeechInput,
    SpeechInputEvent, UnavailableRecognizerFactory,
};
pub use playback::{ClipFetcher, HttpClipFetcher, SpeechPlayback};
pub use sink::{AudioSink, DeviceSink};

#[cfg(test)]
use tokio_test as _;
