//! Clip playback on the audio output device via `rodio`.
//!
//! Owned exclusively by the audio thread (see [`crate::sink`]) because
//! `rodio::OutputStream` is not `Send` on every platform.

use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::error::VoiceError;

/// Clip player for synthesized answers.
///
/// At most one sink is live; starting a new clip stops and releases the
/// previous one first.
pub(crate) struct ClipPlayer {
    /// rodio output stream (must be kept alive).
    _stream: OutputStream,

    /// Handle used to create sinks.
    stream_handle: OutputStreamHandle,

    /// Current playback sink (if any).
    sink: Option<Arc<Sink>>,

    /// Whether playback is in progress. Shared with the completion
    /// watcher so natural completion clears it.
    is_playing: Arc<AtomicBool>,
}

impl ClipPlayer {
    /// Create a player on the default output device.
    pub(crate) fn new() -> Result<Self, VoiceError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| VoiceError::OutputStreamError(e.to_string()))?;

        tracing::info!("Clip playback initialized on default output device");

        Ok(Self {
            _stream: stream,
            stream_handle,
            sink: None,
            is_playing: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Decode `bytes` and start playing them, stopping any current clip
    /// first. Spawns a watcher that clears the playing flag when the
    /// clip drains naturally.
    pub(crate) fn play(&mut self, bytes: Vec<u8>) -> Result<(), VoiceError> {
        // Stop any existing playback — one live handle, always.
        self.stop();

        let source =
            Decoder::new(Cursor::new(bytes)).map_err(|e| VoiceError::DecodeError(e.to_string()))?;

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| VoiceError::OutputStreamError(e.to_string()))?;
        sink.append(source);

        self.is_playing.store(true, Ordering::SeqCst);
        let sink = Arc::new(sink);
        self.sink = Some(Arc::clone(&sink));

        self.spawn_completion_watcher(sink);

        tracing::debug!("Clip playback started");
        Ok(())
    }

    /// Block on a background thread until the sink drains or `stop` is
    /// called, then clear the playing flag.
    fn spawn_completion_watcher(&self, sink: Arc<Sink>) {
        let is_playing = Arc::clone(&self.is_playing);

        // `Sink` is Send in rodio 0.20+, so we can move the clone into a
        // blocking thread. `sleep_until_end()` returns immediately once
        // `stop()` drops the internal sources.
        std::thread::spawn(move || {
            sink.sleep_until_end();

            // If stop() was called, is_playing is already false.
            if is_playing.swap(false, Ordering::SeqCst) {
                tracing::debug!("Clip playback finished naturally");
            }
        });
    }

    /// Stop any active playback immediately.
    pub(crate) fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.is_playing.store(false, Ordering::SeqCst);
    }

    /// Check whether a clip is currently playing.
    pub(crate) fn is_playing(&self) -> bool {
        self.is_playing.load(Ordering::SeqCst)
    }
}
