//! Ask request lifecycle — the per-lane state machine for one asynchronous
//! answer request.
//!
//! ```text
//!   Idle → Loading → {Succeeded, Failed} → Idle (via clear)
//! ```
//!
//! `Loading` is never re-entered from itself: `begin` rejects a submission
//! while a request is in flight. Completions are epoch-tagged — `begin`
//! hands out a [`RequestTicket`] and anything that bumps the epoch (a newer
//! `begin`, a `clear`) makes older tickets stale, so a late response can
//! never overwrite newer state.
//!
//! The lifecycle emits [`LaneEvent`]s over a channel for the front end to
//! consume, in the same fashion as the voice controllers.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::AskResponse;

/// Loading status of one request lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    /// No request has been made (or the lane was cleared).
    Idle,

    /// A request is in flight.
    Loading,

    /// The last request completed with a payload.
    Succeeded,

    /// The last request failed in transport.
    Failed,
}

/// A successful answer: the payload plus the synthesized-speech URL for it.
///
/// An outcome may still carry an embedded semantic error (see
/// [`AskResponse::embedded_error`]); that does not make it a failure.
#[derive(Debug, Clone)]
pub struct AskOutcome {
    /// The backend's answer record.
    pub response: AskResponse,

    /// Audio URL for the spoken answer, when synthesis produced one.
    pub speech_url: Option<String>,
}

/// Events emitted by a lane's lifecycle.
#[derive(Debug, Clone)]
pub enum LaneEvent {
    /// The loading status changed.
    StatusChanged(RequestStatus),

    /// A request completed successfully.
    AnswerReady(AskOutcome),

    /// A request failed in transport.
    Failed(String),

    /// The lane was cleared back to idle.
    Cleared,
}

/// Proof that a completion belongs to the current request.
///
/// Tickets are deliberately not `Clone`: one `begin`, one completion.
#[derive(Debug, PartialEq, Eq)]
pub struct RequestTicket {
    epoch: u64,
}

/// Errors from lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A request is already in flight on this lane.
    #[error("a request is already in flight on this lane")]
    InFlight,
}

/// The request lifecycle state machine for one lane.
pub struct AskLifecycle {
    status: RequestStatus,
    last_question: String,
    result: Option<AskOutcome>,
    error: Option<String>,
    epoch: u64,
    event_tx: mpsc::UnboundedSender<LaneEvent>,
}

impl AskLifecycle {
    /// Create an idle lifecycle and the receiving end of its event channel.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<LaneEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let lifecycle = Self {
            status: RequestStatus::Idle,
            last_question: String::new(),
            result: None,
            error: None,
            epoch: 0,
            event_tx,
        };
        (lifecycle, event_rx)
    }

    /// Current loading status.
    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.status
    }

    /// The question behind the most recent request (empty after `clear`).
    #[must_use]
    pub fn last_question(&self) -> &str {
        &self.last_question
    }

    /// The stored result, if the last request succeeded.
    #[must_use]
    pub const fn result(&self) -> Option<&AskOutcome> {
        self.result.as_ref()
    }

    /// The stored failure, transport-level or embedded.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    /// Start a request for `question`.
    ///
    /// Clears the previous error, transitions to `Loading`, and returns the
    /// ticket the eventual completion must present. Rejected with
    /// [`LifecycleError::InFlight`] while a request is outstanding — the
    /// lifecycle never queues or cancels a prior call.
    pub fn begin(&mut self, question: &str) -> Result<RequestTicket, LifecycleError> {
        if self.is_loading() {
            return Err(LifecycleError::InFlight);
        }

        self.epoch += 1;
        self.last_question = question.to_string();
        self.error = None;
        self.set_status(RequestStatus::Loading);

        tracing::debug!(epoch = self.epoch, question, "Request started");
        Ok(RequestTicket { epoch: self.epoch })
    }

    /// Complete the request identified by `ticket`.
    ///
    /// A stale ticket (the lane was cleared, or a newer request was begun)
    /// is discarded and the current state is left untouched; returns whether
    /// the completion was applied.
    ///
    /// An `Ok` outcome whose payload carries an embedded error still reaches
    /// `Succeeded` — the embedded error is surfaced on [`error`](Self::error)
    /// alongside the result.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<AskOutcome, String>,
    ) -> bool {
        if ticket.epoch != self.epoch {
            tracing::debug!(
                stale = ticket.epoch,
                current = self.epoch,
                "Discarding stale completion"
            );
            return false;
        }

        match outcome {
            Ok(answer) => {
                if let Some(embedded) = answer.response.embedded_error() {
                    self.error = Some(embedded.to_string());
                }
                self.result = Some(answer.clone());
                self.set_status(RequestStatus::Succeeded);
                self.emit(LaneEvent::AnswerReady(answer));
            }
            Err(failure) => {
                self.error = Some(failure.clone());
                self.result = None;
                self.set_status(RequestStatus::Failed);
                self.emit(LaneEvent::Failed(failure));
            }
        }
        true
    }

    /// Reset the lane to idle, erasing the last question, result, and error.
    ///
    /// Bumps the epoch so an in-flight completion lands stale.
    pub fn clear(&mut self) {
        self.epoch += 1;
        self.last_question.clear();
        self.result = None;
        self.error = None;
        self.set_status(RequestStatus::Idle);
        self.emit(LaneEvent::Cleared);
    }

    fn set_status(&mut self, status: RequestStatus) {
        if self.status != status {
            tracing::debug!(old = ?self.status, new = ?status, "Lane status transition");
            self.status = status;
            self.emit(LaneEvent::StatusChanged(status));
        }
    }

    /// Emit a lane event (best-effort — a dropped receiver is not an error).
    fn emit(&self, event: LaneEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::warn!("Lane event receiver dropped");
        }
    }
}
