//! Output-device seam and the dedicated audio thread behind it.
//!
//! `rodio::OutputStream` is `!Send` on some platforms. Rather than using
//! `unsafe impl Send/Sync` on the playback controller, the device is
//! confined to a single OS thread and every operation is proxied through
//! a channel. [`AudioSink`] is the seam the controller programs against;
//! [`DeviceSink`] is the production implementation.

use std::sync::mpsc;
use std::thread;

use crate::device::ClipPlayer;
use crate::error::VoiceError;

/// The audio output device, abstracted.
///
/// Implementations guarantee the one-live-handle invariant: `play`
/// tears down any clip already playing before starting the new one.
pub trait AudioSink: Send + Sync {
    /// Decode and play `bytes`, stopping any current clip first.
    fn play(&self, bytes: Vec<u8>) -> Result<(), VoiceError>;

    /// Stop any current clip.
    fn stop(&self);

    /// Whether a clip is currently playing.
    fn is_busy(&self) -> bool;
}

// ── Audio thread commands ──────────────────────────────────────────

/// A command sent from the controller to the audio thread.
enum SinkCommand {
    /// Decode and play a clip.
    Play {
        bytes: Vec<u8>,
        reply: mpsc::Sender<Result<(), VoiceError>>,
    },

    /// Stop playback (fire-and-forget).
    Stop,

    /// Query whether a clip is playing.
    IsBusy { reply: mpsc::Sender<bool> },

    /// Shut down the audio thread, releasing the device.
    Shutdown,
}

// ── Production sink ────────────────────────────────────────────────

/// `Send + Sync` handle to the dedicated audio thread.
///
/// Request–reply methods block the caller until the audio thread
/// responds; this latency is microseconds of local channel I/O plus the
/// device operation itself.
pub struct DeviceSink {
    cmd_tx: mpsc::Sender<SinkCommand>,
    thread: Option<thread::JoinHandle<()>>,
}

impl DeviceSink {
    /// Spawn the audio thread and open the default output device on it.
    ///
    /// Device-open errors are propagated back via a one-shot init
    /// channel.
    pub fn spawn() -> Result<Self, VoiceError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<SinkCommand>();
        let (init_tx, init_rx) = mpsc::channel::<Result<(), VoiceError>>();

        let thread = thread::Builder::new()
            .name("askql-audio".into())
            .spawn(move || {
                Self::run(cmd_rx, &init_tx);
            })
            .map_err(|e| {
                VoiceError::OutputStreamError(format!("failed to spawn audio thread: {e}"))
            })?;

        // Wait for the audio thread to finish opening the device.
        init_rx.recv().map_err(|_| VoiceError::AudioThreadDied)??;

        Ok(Self {
            cmd_tx,
            thread: Some(thread),
        })
    }

    /// The body of the audio thread. Owns the [`ClipPlayer`] for its
    /// entire lifetime — it never crosses a thread boundary.
    fn run(cmd_rx: mpsc::Receiver<SinkCommand>, init_tx: &mpsc::Sender<Result<(), VoiceError>>) {
        let mut player = match ClipPlayer::new() {
            Ok(p) => p,
            Err(e) => {
                let _ = init_tx.send(Err(e));
                return;
            }
        };

        if init_tx.send(Ok(())).is_err() {
            // Caller dropped — nothing to do.
            return;
        }

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                SinkCommand::Play { bytes, reply } => {
                    let _ = reply.send(player.play(bytes));
                }

                SinkCommand::Stop => {
                    player.stop();
                }

                SinkCommand::IsBusy { reply } => {
                    let _ = reply.send(player.is_playing());
                }

                SinkCommand::Shutdown => break,
            }
        }

        // `player` is dropped here, on the audio thread.
        tracing::debug!("Audio thread shutting down");
    }
}

impl AudioSink for DeviceSink {
    fn play(&self, bytes: Vec<u8>) -> Result<(), VoiceError> {
        let (tx, rx) = mpsc::channel();
        self.cmd_tx
            .send(SinkCommand::Play { bytes, reply: tx })
            .map_err(|_| VoiceError::AudioThreadDied)?;
        rx.recv().map_err(|_| VoiceError::AudioThreadDied)?
    }

    fn stop(&self) {
        let _ = self.cmd_tx.send(SinkCommand::Stop);
    }

    fn is_busy(&self) -> bool {
        let (tx, rx) = mpsc::channel();
        if self.cmd_tx.send(SinkCommand::IsBusy { reply: tx }).is_err() {
            return false;
        }
        rx.recv().unwrap_or(false)
    }
}

impl Drop for DeviceSink {
    fn drop(&mut self) {
        // Best-effort shutdown — the thread may already be dead.
        let _ = self.cmd_tx.send(SinkCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}
