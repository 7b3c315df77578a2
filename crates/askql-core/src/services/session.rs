//! The SQL agent session: two independent lanes over one playback device.
//!
//! The session keeps the two lanes ("Agent" and "Database Chain") fully
//! independent — separate lifecycles, separate panel selections — while
//! sharing the answer-generation settings and the speech playback handle.
//! Because playback is shared, starting speech from one lane stops speech
//! started from the other.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::{AskOverrides, AskRoute, ExampleCatalog};
use crate::lifecycle::{LaneEvent, LifecycleError};
use crate::ports::{AnswerPort, SpeechOutput, SpeechSynthesisPort};
use crate::services::lane::AskLane;

/// Scenario blurb shown above the question input.
const SCENARIO: &str = "This use-case showcases how using the prompt engineering approach \
from Chain of Thought modelling we can make it scalable and further use LLM's capability \
of generating SQL Code from Natural Language by providing the context without the need \
to know the DB schema before hand. It runs against the Northwind sample database.";

/// Which lane of the agent session a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneId {
    /// The SQL agent lane.
    Agent,

    /// The database chain lane.
    DatabaseChain,
}

/// Session-wide answer-generation settings.
#[derive(Debug, Clone, Default)]
pub struct SessionSettings {
    /// Tunable request parameters, shared by both lanes.
    pub overrides: AskOverrides,

    /// Whether successful answers are spoken automatically.
    pub auto_speak: bool,
}

/// Per-lane event receivers handed out at session construction.
pub struct SessionEvents {
    /// Events from the agent lane.
    pub agent: mpsc::UnboundedReceiver<LaneEvent>,

    /// Events from the database chain lane.
    pub chain: mpsc::UnboundedReceiver<LaneEvent>,
}

/// A two-lane SQL question-answering session.
pub struct AgentSession {
    agent: AskLane,
    chain: AskLane,
    settings: SessionSettings,
    examples: ExampleCatalog,
}

impl AgentSession {
    /// Compose a session over the given ports.
    ///
    /// The same `playback` handle is passed to both lanes on purpose; see
    /// the module docs.
    #[must_use]
    pub fn new(
        answers: Arc<dyn AnswerPort>,
        synthesis: Arc<dyn SpeechSynthesisPort>,
        playback: Arc<dyn SpeechOutput>,
    ) -> (Self, SessionEvents) {
        let (agent, agent_rx) = AskLane::new(
            AskRoute::SqlAgent,
            Arc::clone(&answers),
            Arc::clone(&synthesis),
            Arc::clone(&playback),
        );
        let (chain, chain_rx) = AskLane::new(AskRoute::SqlChain, answers, synthesis, playback);

        let session = Self {
            agent,
            chain,
            settings: SessionSettings::default(),
            examples: ExampleCatalog::northwind(),
        };
        let events = SessionEvents {
            agent: agent_rx,
            chain: chain_rx,
        };
        (session, events)
    }

    /// Borrow a lane.
    #[must_use]
    pub const fn lane(&self, id: LaneId) -> &AskLane {
        match id {
            LaneId::Agent => &self.agent,
            LaneId::DatabaseChain => &self.chain,
        }
    }

    /// Borrow a lane mutably.
    pub const fn lane_mut(&mut self, id: LaneId) -> &mut AskLane {
        match id {
            LaneId::Agent => &mut self.agent,
            LaneId::DatabaseChain => &mut self.chain,
        }
    }

    /// Session settings.
    #[must_use]
    pub const fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Mutable session settings.
    pub const fn settings_mut(&mut self) -> &mut SessionSettings {
        &mut self.settings
    }

    /// Submit `question` on lane `id` with the session settings.
    pub async fn ask(&mut self, id: LaneId, question: &str) -> Result<(), LifecycleError> {
        let overrides = self.settings.overrides.clone();
        let auto_speak = self.settings.auto_speak;
        self.lane_mut(id)
            .send(question, &overrides, auto_speak)
            .await
    }

    /// Retry the last question on lane `id`.
    pub async fn retry(&mut self, id: LaneId) -> Result<(), LifecycleError> {
        let overrides = self.settings.overrides.clone();
        let auto_speak = self.settings.auto_speak;
        self.lane_mut(id).retry(&overrides, auto_speak).await
    }

    /// A fresh random sample of example questions.
    #[must_use]
    pub fn example_questions(&self) -> Vec<String> {
        self.examples.sample()
    }

    /// The scenario description for this session.
    #[must_use]
    pub const fn scenario(&self) -> &'static str {
        SCENARIO
    }
}
