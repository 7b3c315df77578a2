//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - Backend client (via askql-api)
//! - Audio playback (via askql-voice)
//! - Agent session (via askql-core)
//!
//! Command handlers receive the fully-composed context and delegate to it.

use std::sync::Arc;

use async_trait::async_trait;

use askql_api::{ApiClientConfig, DefaultAskClient};
use askql_core::ports::{AnswerPort, SpeechOutput, SpeechPortError, SpeechSynthesisPort};
use askql_core::services::{AgentSession, SessionEvents};
use askql_voice::SpeechPlayback;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Base URL of the backend function app.
    pub api_url: String,

    /// Function key, if the deployment requires one.
    pub api_key: Option<String>,

    /// Whether successful answers are spoken automatically.
    pub auto_speak: bool,

    /// Verbose output (event traces on the agent session).
    pub verbose: bool,
}

impl CliConfig {
    /// Build config from parsed arguments.
    ///
    /// The backend URL is required; everything else has a default.
    pub fn from_cli(cli: &Cli, auto_speak: bool) -> Result<Self, CliError> {
        let api_url = cli.api_url.clone().ok_or_else(|| {
            CliError::Config("backend URL not set - pass --api-url or set ASKQL_API_URL".into())
        })?;

        Ok(Self {
            api_url,
            api_key: cli.api_key.clone(),
            auto_speak,
            verbose: cli.verbose,
        })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The two-lane agent session.
    pub session: AgentSession,

    /// Per-lane event receivers.
    pub events: SessionEvents,

    /// Answer port, for lanes built outside the session (one-shot ask).
    pub answers: Arc<dyn AnswerPort>,

    /// Speech synthesis port.
    pub synthesis: Arc<dyn SpeechSynthesisPort>,

    /// Shared playback handle.
    pub playback: Arc<dyn SpeechOutput>,

    /// Verbose output.
    pub verbose: bool,
}

/// Playback stand-in for environments without an audio device.
///
/// Answers still carry their audio URL; playing them is a no-op.
struct SilentSpeech;

#[async_trait]
impl SpeechOutput for SilentSpeech {
    async fn play(&self, _url: Option<&str>) -> Result<(), SpeechPortError> {
        Ok(())
    }

    fn stop(&self) {}

    fn is_speaking(&self) -> bool {
        false
    }
}

/// Bootstrap the CLI application.
///
/// Builds the backend client, opens the audio device (falling back to
/// silent playback when none is available), and composes the session.
pub fn bootstrap(config: CliConfig) -> CliContext {
    let api_config =
        ApiClientConfig::new(&config.api_url).with_optional_api_key(config.api_key.clone());
    let client = Arc::new(DefaultAskClient::new(api_config));

    let playback: Arc<dyn SpeechOutput> = match SpeechPlayback::new() {
        Ok(playback) => Arc::new(playback),
        Err(e) => {
            tracing::warn!(error = %e, "No audio device, answers will not be spoken");
            Arc::new(SilentSpeech)
        }
    };

    let answers: Arc<dyn AnswerPort> = client.clone();
    let synthesis: Arc<dyn SpeechSynthesisPort> = client;

    let (mut session, events) = AgentSession::new(
        Arc::clone(&answers),
        Arc::clone(&synthesis),
        Arc::clone(&playback),
    );
    session.settings_mut().auto_speak = config.auto_speak;

    CliContext {
        session,
        events,
        answers,
        synthesis,
        playback,
        verbose: config.verbose,
    }
}

/// Bootstrap with explicit ports (for testing).
pub fn bootstrap_with(
    answers: Arc<dyn AnswerPort>,
    synthesis: Arc<dyn SpeechSynthesisPort>,
    playback: Arc<dyn SpeechOutput>,
) -> CliContext {
    let (session, events) = AgentSession::new(
        Arc::clone(&answers),
        Arc::clone(&synthesis),
        Arc::clone(&playback),
    );
    CliContext {
        session,
        events,
        answers,
        synthesis,
        playback,
        verbose: false,
    }
}
