//! One request lane: lifecycle + analysis panel + the ports that serve it.
//!
//! A lane performs the full submission flow the views share: close the
//! panel, call the answer port, synthesize speech for the answer, store
//! the outcome, optionally auto-speak it. Transport failures and embedded
//! payload errors both end up on the lifecycle, on their respective
//! channels.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::{AskOverrides, AskRoute};
use crate::lifecycle::{AskLifecycle, AskOutcome, LaneEvent, LifecycleError, RequestStatus};
use crate::panel::{AnalysisPanel, AnalysisTab};
use crate::ports::{AnswerPort, SpeechOutput, SpeechSynthesisPort};

/// A single chat/request lane bound to one backend route.
pub struct AskLane {
    route: AskRoute,
    lifecycle: AskLifecycle,
    panel: AnalysisPanel,
    answers: Arc<dyn AnswerPort>,
    synthesis: Arc<dyn SpeechSynthesisPort>,
    playback: Arc<dyn SpeechOutput>,
}

impl AskLane {
    /// Create a lane for `route` and the receiving end of its event channel.
    ///
    /// `playback` is typically shared between lanes — injected once at the
    /// composition root.
    #[must_use]
    pub fn new(
        route: AskRoute,
        answers: Arc<dyn AnswerPort>,
        synthesis: Arc<dyn SpeechSynthesisPort>,
        playback: Arc<dyn SpeechOutput>,
    ) -> (Self, mpsc::UnboundedReceiver<LaneEvent>) {
        let (lifecycle, event_rx) = AskLifecycle::new();
        let lane = Self {
            route,
            lifecycle,
            panel: AnalysisPanel::new(),
            answers,
            synthesis,
            playback,
        };
        (lane, event_rx)
    }

    /// The backend route this lane asks on.
    #[must_use]
    pub const fn route(&self) -> AskRoute {
        self.route
    }

    /// Current loading status.
    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.lifecycle.status()
    }

    /// Whether a request is in flight (wire the input gate's `disabled` to this).
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lifecycle.is_loading()
    }

    /// The question behind the most recent request.
    #[must_use]
    pub fn last_question(&self) -> &str {
        self.lifecycle.last_question()
    }

    /// The stored result, if the last request succeeded.
    #[must_use]
    pub const fn result(&self) -> Option<&AskOutcome> {
        self.lifecycle.result()
    }

    /// The stored error — transport failure or embedded payload error.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.lifecycle.error()
    }

    /// The analysis panel's active tab.
    #[must_use]
    pub const fn active_tab(&self) -> Option<AnalysisTab> {
        self.panel.active_tab()
    }

    /// Submit `question` on this lane.
    ///
    /// Rejected with [`LifecycleError::InFlight`] while a request is
    /// outstanding. Speech synthesis failure is non-fatal: the answer is
    /// stored without an audio URL.
    pub async fn send(
        &mut self,
        question: &str,
        overrides: &AskOverrides,
        auto_speak: bool,
    ) -> Result<(), LifecycleError> {
        let ticket = self.lifecycle.begin(question)?;
        self.panel.close();

        let outcome = match self.answers.ask(self.route, question, overrides).await {
            Ok(response) => {
                let speech_url = match self.synthesis.synthesize(&response.answer).await {
                    Ok(url) => url,
                    Err(e) => {
                        tracing::warn!(error = %e, "Speech synthesis failed, answer will be silent");
                        None
                    }
                };
                Ok(AskOutcome {
                    response,
                    speech_url,
                })
            }
            Err(e) => Err(e.to_string()),
        };

        let speech_url = outcome
            .as_ref()
            .ok()
            .and_then(|answer| answer.speech_url.clone());

        if self.lifecycle.complete(ticket, outcome) && auto_speak {
            if let Err(e) = self.playback.play(speech_url.as_deref()).await {
                tracing::warn!(error = %e, "Auto-speak playback failed");
            }
        }
        Ok(())
    }

    /// Resubmit the last question (the retry affordance on a failed answer).
    ///
    /// No-op when there is nothing to retry or a request is in flight.
    pub async fn retry(
        &mut self,
        overrides: &AskOverrides,
        auto_speak: bool,
    ) -> Result<(), LifecycleError> {
        let question = self.lifecycle.last_question().to_string();
        if question.is_empty() {
            return Ok(());
        }
        self.send(&question, overrides, auto_speak).await
    }

    /// Whether the clear affordance should be enabled.
    #[must_use]
    pub fn can_clear(&self) -> bool {
        !self.lifecycle.last_question().is_empty() && !self.is_loading()
    }

    /// Reset the lane: status, last question, result, error, panel tab.
    pub fn clear(&mut self) {
        self.panel.close();
        self.lifecycle.clear();
    }

    /// Toggle an analysis panel tab.
    pub fn toggle_tab(&mut self, tab: AnalysisTab) {
        self.panel.toggle(tab);
    }

    /// Toggle speech for the stored answer: stop if speaking, otherwise
    /// play the stored clip.
    pub async fn toggle_speech(&self) {
        if self.playback.is_speaking() {
            self.playback.stop();
            return;
        }

        let url = self.result().and_then(|answer| answer.speech_url.clone());
        if let Err(e) = self.playback.play(url.as_deref()).await {
            tracing::warn!(error = %e, "Speech playback failed");
        }
    }
}
