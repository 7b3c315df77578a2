//! Integration tests for the ask lane request lifecycle.
//!
//! These drive a lane (and the two-lane agent session) through its state
//! transitions using mock ports. No network or audio hardware is required —
//! the mocks return canned responses instantly.
//!
//! # What is tested
//!
//! - The `Idle → Loading → Succeeded` happy path, with the result and last
//!   question preserved
//! - Transport failure reaching `Failed` with no result
//! - Embedded payload errors surfaced alongside a `Succeeded` result
//! - Clearing a lane resets status, question, result, error, and panel tab
//! - Overlapping sends rejected while loading
//! - Auto-speak routing through the shared playback port
//! - The two session lanes staying independent while sharing playback

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use askql_core::{
    AgentSession, AnalysisTab, AnswerPort, AnswerPortError, AskLane, AskOverrides, AskResponse,
    AskRoute, LaneId, RequestStatus, SpeechOutput, SpeechPortError, SpeechSynthesisPort,
};

// ── Mock ports ─────────────────────────────────────────────────────

/// Answer port returning a canned response (or failure) per call.
struct MockAnswers {
    response: Mutex<Result<AskResponse, String>>,
    questions_seen: Mutex<Vec<(AskRoute, String)>>,
}

impl MockAnswers {
    fn answering(answer: &str) -> Self {
        Self {
            response: Mutex::new(Ok(AskResponse {
                answer: answer.to_string(),
                data_points: vec!["supporting snippet".to_string()],
                ..AskResponse::default()
            })),
            questions_seen: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            response: Mutex::new(Err(message.to_string())),
            questions_seen: Mutex::new(Vec::new()),
        }
    }

    fn with_embedded_error(answer: &str, error: &str) -> Self {
        let mock = Self::answering(answer);
        if let Ok(response) = mock.response.lock().unwrap().as_mut() {
            response.error = Some(error.to_string());
        }
        mock
    }

    fn seen(&self) -> Vec<(AskRoute, String)> {
        self.questions_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerPort for MockAnswers {
    async fn ask(
        &self,
        route: AskRoute,
        question: &str,
        _overrides: &AskOverrides,
    ) -> Result<AskResponse, AnswerPortError> {
        self.questions_seen
            .lock()
            .unwrap()
            .push((route, question.to_string()));
        self.response
            .lock()
            .unwrap()
            .clone()
            .map_err(AnswerPortError::Network)
    }
}

/// Synthesis port returning a fixed URL (or nothing).
struct MockSynthesis {
    url: Option<String>,
}

#[async_trait]
impl SpeechSynthesisPort for MockSynthesis {
    async fn synthesize(&self, _text: &str) -> Result<Option<String>, SpeechPortError> {
        Ok(self.url.clone())
    }
}

/// Playback port that records every play/stop call.
#[derive(Default)]
struct MockPlayback {
    played: Mutex<Vec<Option<String>>>,
    stops: Mutex<u32>,
}

impl MockPlayback {
    fn played(&self) -> Vec<Option<String>> {
        self.played.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechOutput for MockPlayback {
    async fn play(&self, url: Option<&str>) -> Result<(), SpeechPortError> {
        self.played.lock().unwrap().push(url.map(String::from));
        Ok(())
    }

    fn stop(&self) {
        *self.stops.lock().unwrap() += 1;
    }

    fn is_speaking(&self) -> bool {
        false
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn lane_with(answers: Arc<MockAnswers>) -> (AskLane, Arc<MockPlayback>) {
    let playback = Arc::new(MockPlayback::default());
    let (lane, _rx) = AskLane::new(
        AskRoute::SqlAgent,
        answers,
        Arc::new(MockSynthesis {
            url: Some("https://speech.test/answer.mp3".to_string()),
        }),
        Arc::clone(&playback) as Arc<dyn SpeechOutput>,
    );
    (lane, playback)
}

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn ask_scenario_reaches_succeeded_with_answer() {
    let answers = Arc::new(MockAnswers::answering("There are 77 products."));
    let (mut lane, _playback) = lane_with(Arc::clone(&answers));

    assert_eq!(lane.status(), RequestStatus::Idle);

    lane.send("What products are available", &AskOverrides::default(), false)
        .await
        .unwrap();

    assert_eq!(lane.status(), RequestStatus::Succeeded);
    assert_eq!(lane.last_question(), "What products are available");
    let result = lane.result().unwrap();
    assert_eq!(result.response.answer, "There are 77 products.");
    assert_eq!(
        result.speech_url.as_deref(),
        Some("https://speech.test/answer.mp3")
    );
    assert!(lane.error().is_none());

    // The raw question went to the lane's route.
    assert_eq!(
        answers.seen(),
        vec![(AskRoute::SqlAgent, "What products are available".to_string())]
    );
}

#[tokio::test]
async fn transport_failure_reaches_failed_with_error_and_no_result() {
    let answers = Arc::new(MockAnswers::failing("connection refused"));
    let (mut lane, _playback) = lane_with(answers);

    lane.send("q", &AskOverrides::default(), false).await.unwrap();

    assert_eq!(lane.status(), RequestStatus::Failed);
    assert!(lane.result().is_none());
    assert!(lane.error().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn embedded_error_is_surfaced_alongside_result() {
    let answers = Arc::new(MockAnswers::with_embedded_error(
        "partial answer",
        "Timeout expired while querying",
    ));
    let (mut lane, _playback) = lane_with(answers);

    lane.send("q", &AskOverrides::default(), false).await.unwrap();

    // Loading-wise this is a success; the error rides alongside.
    assert_eq!(lane.status(), RequestStatus::Succeeded);
    assert_eq!(lane.result().unwrap().response.answer, "partial answer");
    assert_eq!(lane.error(), Some("Timeout expired while querying"));
}

#[tokio::test]
async fn retry_resubmits_the_last_question() {
    let answers = Arc::new(MockAnswers::failing("boom"));
    let (mut lane, _playback) = lane_with(Arc::clone(&answers));

    lane.send("flaky question", &AskOverrides::default(), false)
        .await
        .unwrap();
    assert_eq!(lane.status(), RequestStatus::Failed);

    *answers.response.lock().unwrap() = Ok(AskResponse {
        answer: "recovered".to_string(),
        ..AskResponse::default()
    });

    lane.retry(&AskOverrides::default(), false).await.unwrap();

    assert_eq!(lane.status(), RequestStatus::Succeeded);
    assert_eq!(lane.result().unwrap().response.answer, "recovered");
    let seen = answers.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].1, seen[1].1);
}

#[tokio::test]
async fn retry_on_a_fresh_lane_is_a_no_op() {
    let answers = Arc::new(MockAnswers::answering("unused"));
    let (mut lane, _playback) = lane_with(Arc::clone(&answers));

    lane.retry(&AskOverrides::default(), false).await.unwrap();

    assert_eq!(lane.status(), RequestStatus::Idle);
    assert!(answers.seen().is_empty());
}

#[tokio::test]
async fn clear_resets_lane_and_panel() {
    let answers = Arc::new(MockAnswers::answering("an answer"));
    let (mut lane, _playback) = lane_with(answers);

    lane.send("q", &AskOverrides::default(), false).await.unwrap();
    lane.toggle_tab(AnalysisTab::ThoughtProcess);
    assert!(lane.can_clear());

    lane.clear();

    assert_eq!(lane.status(), RequestStatus::Idle);
    assert_eq!(lane.last_question(), "");
    assert!(lane.result().is_none());
    assert!(lane.error().is_none());
    assert_eq!(lane.active_tab(), None);
    assert!(!lane.can_clear());
}

#[tokio::test]
async fn send_closes_any_open_panel_tab() {
    let answers = Arc::new(MockAnswers::answering("a"));
    let (mut lane, _playback) = lane_with(answers);

    lane.send("q1", &AskOverrides::default(), false).await.unwrap();
    lane.toggle_tab(AnalysisTab::SupportingContent);
    assert_eq!(lane.active_tab(), Some(AnalysisTab::SupportingContent));

    lane.send("q2", &AskOverrides::default(), false).await.unwrap();
    assert_eq!(lane.active_tab(), None);
}

#[tokio::test]
async fn auto_speak_plays_the_answer_clip() {
    let answers = Arc::new(MockAnswers::answering("spoken answer"));
    let (mut lane, playback) = lane_with(answers);

    lane.send("q", &AskOverrides::default(), true).await.unwrap();

    assert_eq!(
        playback.played(),
        vec![Some("https://speech.test/answer.mp3".to_string())]
    );
}

#[tokio::test]
async fn without_auto_speak_nothing_plays() {
    let answers = Arc::new(MockAnswers::answering("quiet answer"));
    let (mut lane, playback) = lane_with(answers);

    lane.send("q", &AskOverrides::default(), false).await.unwrap();

    assert!(playback.played().is_empty());
}

#[tokio::test]
async fn session_lanes_are_independent() {
    let answers = Arc::new(MockAnswers::answering("shared answer"));
    let playback = Arc::new(MockPlayback::default());
    let (mut session, _events) = AgentSession::new(
        answers,
        Arc::new(MockSynthesis { url: None }),
        playback as Arc<dyn SpeechOutput>,
    );

    session.ask(LaneId::Agent, "agent question").await.unwrap();

    assert_eq!(
        session.lane(LaneId::Agent).status(),
        RequestStatus::Succeeded
    );
    assert_eq!(session.lane(LaneId::DatabaseChain).status(), RequestStatus::Idle);

    session
        .ask(LaneId::DatabaseChain, "chain question")
        .await
        .unwrap();

    // Clearing one lane leaves the other's answer in place.
    session.lane_mut(LaneId::Agent).clear();
    assert_eq!(session.lane(LaneId::Agent).status(), RequestStatus::Idle);
    assert_eq!(
        session.lane(LaneId::DatabaseChain).last_question(),
        "chain question"
    );
}

#[tokio::test]
async fn session_routes_lanes_to_their_backend_functions() {
    let answers = Arc::new(MockAnswers::answering("x"));
    let playback = Arc::new(MockPlayback::default());
    let (mut session, _events) = AgentSession::new(
        Arc::clone(&answers) as Arc<dyn AnswerPort>,
        Arc::new(MockSynthesis { url: None }),
        playback as Arc<dyn SpeechOutput>,
    );

    session.ask(LaneId::Agent, "a").await.unwrap();
    session.ask(LaneId::DatabaseChain, "b").await.unwrap();

    let seen = answers.seen();
    assert_eq!(seen[0].0, AskRoute::SqlAgent);
    assert_eq!(seen[1].0, AskRoute::SqlChain);
}
