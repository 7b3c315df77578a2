//! Speech input controller — continuous capture driving the question box.
//!
//! The controller is a two-state machine:
//!
//! ```text
//!   Idle ⇄ Recording
//! ```
//!
//! `start()` constructs the recognition engine lazily on first use through
//! a capability-probing factory. If the probe fails there is no engine on
//! this platform; `start()` returns the error and the controller stays
//! `Idle`. Transcripts replace the question text rather than appending,
//! and a recording end (user stop or engine timeout) signals the session
//! layer to submit whatever text is present.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::VoiceError;

// ── Input state machine ────────────────────────────────────────────

/// Current state of the speech input controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputState {
    /// Not capturing.
    Idle,

    /// Continuous recognition is running.
    Recording,
}

// ── Events emitted by the controller ───────────────────────────────

/// Events emitted by the speech input controller to the session layer.
#[derive(Debug, Clone)]
pub enum SpeechInputEvent {
    /// Controller state changed.
    StateChanged(InputState),

    /// A transcript was recognized. Replaces the current question text.
    TranscriptReady {
        /// The recognized text.
        text: String,
    },

    /// Capture ended (user stop or engine timeout). The session submits
    /// whatever question text is present when it sees this.
    RecordingEnded,

    /// The engine reported an error mid-capture.
    Error(String),
}

// ── Recognition engine seam ────────────────────────────────────────

/// One result delivered by a recognition engine session.
#[derive(Debug, Clone)]
pub enum RecognizerResult {
    /// A recognized utterance.
    Transcript(String),

    /// The engine ended the session (timeout, or in response to `stop`).
    Ended,

    /// The engine failed mid-session.
    Failed(String),
}

/// A live recognition engine session.
pub trait RecognizerBackend: Send {
    /// Begin continuous recognition, delivering results on `results`.
    fn start(
        &mut self,
        results: mpsc::UnboundedSender<RecognizerResult>,
    ) -> Result<(), VoiceError>;

    /// End recognition. The engine delivers a final
    /// [`RecognizerResult::Ended`] (or drops the sender).
    fn stop(&mut self);
}

/// Capability probe and constructor for the recognition engine.
///
/// `create` is called at most once per controller, on the first
/// [`SpeechInput::start`]. A probe failure means no engine exists on
/// this platform and must not change controller state.
pub trait RecognizerFactory: Send {
    /// Probe for an engine and construct it.
    fn create(&self) -> Result<Box<dyn RecognizerBackend>, VoiceError>;
}

/// Factory for builds without a bundled recognition engine.
///
/// Every probe reports [`VoiceError::RecognizerUnavailable`], so
/// `start()` fails fast and the controller stays `Idle`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableRecognizerFactory;

impl RecognizerFactory for UnavailableRecognizerFactory {
    fn create(&self) -> Result<Box<dyn RecognizerBackend>, VoiceError> {
        Err(VoiceError::RecognizerUnavailable)
    }
}

// ── Controller ─────────────────────────────────────────────────────

/// The speech input controller.
///
/// Emits [`SpeechInputEvent`]s via a channel for the session layer to
/// consume.
pub struct SpeechInput {
    /// Engine factory — probed lazily on first `start`.
    factory: Box<dyn RecognizerFactory>,

    /// The engine, once constructed.
    recognizer: Option<Box<dyn RecognizerBackend>>,

    /// Event sender channel.
    event_tx: mpsc::UnboundedSender<SpeechInputEvent>,

    /// Whether capture is running. Shared with the result pump so an
    /// engine-initiated end flips it too.
    is_recording: Arc<AtomicBool>,
}

impl SpeechInput {
    /// Create a new controller.
    ///
    /// Returns the controller and a receiver for [`SpeechInputEvent`]s.
    #[must_use]
    pub fn new(
        factory: Box<dyn RecognizerFactory>,
    ) -> (Self, mpsc::UnboundedReceiver<SpeechInputEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let input = Self {
            factory,
            recognizer: None,
            event_tx,
            is_recording: Arc::new(AtomicBool::new(false)),
        };

        (input, event_rx)
    }

    /// Get the current controller state.
    #[must_use]
    pub fn state(&self) -> InputState {
        if self.is_recording.load(Ordering::SeqCst) {
            InputState::Recording
        } else {
            InputState::Idle
        }
    }

    /// Check whether capture is running.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.is_recording.load(Ordering::SeqCst)
    }

    /// Begin continuous capture.
    ///
    /// The engine is constructed on the first call; if the capability
    /// probe fails the error is returned and the controller stays `Idle`.
    pub fn start(&mut self) -> Result<(), VoiceError> {
        if self.is_recording() {
            return Err(VoiceError::AlreadyRecording);
        }

        // Lazy construction — the probe must not run before the user
        // first asks for capture.
        if self.recognizer.is_none() {
            self.recognizer = Some(self.factory.create()?);
        }

        let (result_tx, result_rx) = mpsc::unbounded_channel();
        if let Some(recognizer) = self.recognizer.as_mut() {
            recognizer.start(result_tx)?;
        }

        self.is_recording.store(true, Ordering::SeqCst);
        self.emit(SpeechInputEvent::StateChanged(InputState::Recording));
        tracing::info!("Speech capture started");

        self.spawn_result_pump(result_rx);
        Ok(())
    }

    /// End capture.
    ///
    /// Emits [`SpeechInputEvent::RecordingEnded`] so the session layer
    /// submits the question text.
    pub fn stop(&mut self) -> Result<(), VoiceError> {
        if !self.is_recording() {
            return Err(VoiceError::NotRecording);
        }

        if let Some(recognizer) = self.recognizer.as_mut() {
            recognizer.stop();
        }
        self.finish_recording();
        tracing::info!("Speech capture stopped");
        Ok(())
    }

    /// Forward engine results to the event channel until the engine ends
    /// the session, then finish the recording if `stop` hasn't already.
    fn spawn_result_pump(&self, mut result_rx: mpsc::UnboundedReceiver<RecognizerResult>) {
        let event_tx = self.event_tx.clone();
        let is_recording = Arc::clone(&self.is_recording);

        tokio::spawn(async move {
            while let Some(result) = result_rx.recv().await {
                match result {
                    RecognizerResult::Transcript(text) => {
                        let _ = event_tx.send(SpeechInputEvent::TranscriptReady { text });
                    }
                    RecognizerResult::Failed(message) => {
                        tracing::warn!(error = %message, "Recognition engine error");
                        let _ = event_tx.send(SpeechInputEvent::Error(message));
                    }
                    RecognizerResult::Ended => break,
                }
            }

            // Engine timeout path — the swap guard keeps this from
            // double-firing after an explicit stop().
            if is_recording.swap(false, Ordering::SeqCst) {
                let _ = event_tx.send(SpeechInputEvent::StateChanged(InputState::Idle));
                let _ = event_tx.send(SpeechInputEvent::RecordingEnded);
            }
        });
    }

    fn finish_recording(&self) {
        if self.is_recording.swap(false, Ordering::SeqCst) {
            self.emit(SpeechInputEvent::StateChanged(InputState::Idle));
            self.emit(SpeechInputEvent::RecordingEnded);
        }
    }

    fn emit(&self, event: SpeechInputEvent) {
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Engine that hands its result sender back out so tests can feed
    /// transcripts and timeouts.
    struct ScriptedRecognizer {
        sender: Arc<Mutex<Option<mpsc::UnboundedSender<RecognizerResult>>>>,
        stopped: Arc<AtomicBool>,
    }

    impl RecognizerBackend for ScriptedRecognizer {
        fn start(
            &mut self,
            results: mpsc::UnboundedSender<RecognizerResult>,
        ) -> Result<(), VoiceError> {
            *self.sender.lock().unwrap() = Some(results);
            Ok(())
        }

        fn stop(&mut self) {
            self.stopped.store(true, Ordering::SeqCst);
            self.sender.lock().unwrap().take();
        }
    }

    struct ScriptedFactory {
        sender: Arc<Mutex<Option<mpsc::UnboundedSender<RecognizerResult>>>>,
        stopped: Arc<AtomicBool>,
        probes: Arc<Mutex<u32>>,
    }

    impl ScriptedFactory {
        fn new() -> Self {
            Self {
                sender: Arc::new(Mutex::new(None)),
                stopped: Arc::new(AtomicBool::new(false)),
                probes: Arc::new(Mutex::new(0)),
            }
        }
    }

    impl RecognizerFactory for ScriptedFactory {
        fn create(&self) -> Result<Box<dyn RecognizerBackend>, VoiceError> {
            *self.probes.lock().unwrap() += 1;
            Ok(Box::new(ScriptedRecognizer {
                sender: Arc::clone(&self.sender),
                stopped: Arc::clone(&self.stopped),
            }))
        }
    }

    #[tokio::test]
    async fn start_transitions_to_recording() {
        let (mut input, mut events) = SpeechInput::new(Box::new(ScriptedFactory::new()));
        assert_eq!(input.state(), InputState::Idle);

        input.start().unwrap();
        assert_eq!(input.state(), InputState::Recording);
        assert!(matches!(
            events.recv().await,
            Some(SpeechInputEvent::StateChanged(InputState::Recording))
        ));
    }

    #[tokio::test]
    async fn unavailable_engine_fails_fast_and_leaves_state_untouched() {
        let (mut input, mut events) = SpeechInput::new(Box::new(UnavailableRecognizerFactory));

        let err = input.start().unwrap_err();
        assert!(matches!(err, VoiceError::RecognizerUnavailable));
        assert_eq!(input.state(), InputState::Idle);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn engine_is_constructed_once_across_restarts() {
        let factory = ScriptedFactory::new();
        let probes = Arc::clone(&factory.probes);
        let (mut input, _events) = SpeechInput::new(Box::new(factory));

        input.start().unwrap();
        input.stop().unwrap();
        input.start().unwrap();

        assert_eq!(*probes.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn transcripts_are_forwarded() {
        let factory = ScriptedFactory::new();
        let sender = Arc::clone(&factory.sender);
        let (mut input, mut events) = SpeechInput::new(Box::new(factory));

        input.start().unwrap();
        let _ = events.recv().await; // StateChanged(Recording)

        sender
            .lock()
            .unwrap()
            .as_ref()
            .unwrap()
            .send(RecognizerResult::Transcript("how many orders".into()))
            .unwrap();

        assert!(matches!(
            events.recv().await,
            Some(SpeechInputEvent::TranscriptReady { text }) if text == "how many orders"
        ));
    }

    #[tokio::test]
    async fn stop_emits_recording_ended_and_stops_the_engine() {
        let factory = ScriptedFactory::new();
        let stopped = Arc::clone(&factory.stopped);
        let (mut input, mut events) = SpeechInput::new(Box::new(factory));

        input.start().unwrap();
        let _ = events.recv().await;

        input.stop().unwrap();
        assert!(stopped.load(Ordering::SeqCst));
        assert_eq!(input.state(), InputState::Idle);

        assert!(matches!(
            events.recv().await,
            Some(SpeechInputEvent::StateChanged(InputState::Idle))
        ));
        assert!(matches!(
            events.recv().await,
            Some(SpeechInputEvent::RecordingEnded)
        ));
    }

    #[tokio::test]
    async fn engine_timeout_ends_the_recording() {
        let factory = ScriptedFactory::new();
        let sender = Arc::clone(&factory.sender);
        let (mut input, mut events) = SpeechInput::new(Box::new(factory));

        input.start().unwrap();
        let _ = events.recv().await;

        sender
            .lock()
            .unwrap()
            .as_ref()
            .unwrap()
            .send(RecognizerResult::Ended)
            .unwrap();

        assert!(matches!(
            events.recv().await,
            Some(SpeechInputEvent::StateChanged(InputState::Idle))
        ));
        assert!(matches!(
            events.recv().await,
            Some(SpeechInputEvent::RecordingEnded)
        ));
        assert!(!input.is_recording());
    }

    #[tokio::test]
    async fn double_start_is_rejected() {
        let (mut input, _events) = SpeechInput::new(Box::new(ScriptedFactory::new()));

        input.start().unwrap();
        assert!(matches!(input.start(), Err(VoiceError::AlreadyRecording)));
    }

    #[tokio::test]
    async fn stop_while_idle_is_rejected() {
        let (mut input, _events) = SpeechInput::new(Box::new(ScriptedFactory::new()));
        assert!(matches!(input.stop(), Err(VoiceError::NotRecording)));
    }

    #[tokio::test]
    async fn engine_errors_are_surfaced_without_ending_capture() {
        let factory = ScriptedFactory::new();
        let sender = Arc::clone(&factory.sender);
        let (mut input, mut events) = SpeechInput::new(Box::new(factory));

        input.start().unwrap();
        let _ = events.recv().await;

        sender
            .lock()
            .unwrap()
            .as_ref()
            .unwrap()
            .send(RecognizerResult::Failed("audio device lost".into()))
            .unwrap();

        assert!(matches!(
            events.recv().await,
            Some(SpeechInputEvent::Error(message)) if message == "audio device lost"
        ));
        assert!(input.is_recording());
    }
}
