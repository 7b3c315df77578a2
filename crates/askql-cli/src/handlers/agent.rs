//! Interactive two-lane agent session over rustyline.
//!
//! Plain lines are questions on the current lane; `:` commands drive
//! everything else (lane switching, the analysis panel, retry, clear,
//! speech). The question box enforces the same edit and submission
//! rules as the one-shot command.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use askql_core::input::{EditOutcome, QuestionBox};
use askql_core::lifecycle::{LaneEvent, RequestStatus};
use askql_core::panel::AnalysisTab;
use askql_core::services::LaneId;
use askql_voice::{SpeechInput, SpeechInputEvent, UnavailableRecognizerFactory, VoiceError};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation;

const HELP: &str = "\
Commands:
  :lane [agent|chain]   switch lanes (no argument toggles)
  :examples             sample five example questions
  :example <n>          submit example question <n> from the last sample
  :retry                resubmit the last question on this lane
  :clear                clear this lane's chat
  :thoughts             toggle the thought process panel
  :sources              toggle the supporting content panel
  :speak                play or stop the spoken answer
  :listen               capture a question by voice
  :help                 show this help
  :quit                 exit";

/// Execute the interactive agent session.
pub async fn execute(ctx: &mut CliContext) -> Result<(), CliError> {
    println!("{}", ctx.session.scenario());
    println!();

    let examples = ctx.session.example_questions();
    print_examples(&examples);
    println!("Type a question, or :help for commands.");
    println!();

    let mut editor = DefaultEditor::new().map_err(|e| CliError::Io(e.to_string()))?;
    let mut lane_id = LaneId::Agent;
    let mut question_box = QuestionBox::new(true);
    let (mut speech, mut speech_events) =
        SpeechInput::new(Box::new(UnavailableRecognizerFactory));
    let mut last_examples = examples;

    loop {
        let prompt = match lane_id {
            LaneId::Agent => "agent> ",
            LaneId::DatabaseChain => "chain> ",
        };

        match editor.readline(prompt) {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());

                if let Some(command) = line.trim().strip_prefix(':') {
                    let flow = handle_command(
                        ctx,
                        &mut lane_id,
                        &mut question_box,
                        &mut speech,
                        &mut speech_events,
                        &mut last_examples,
                        command,
                    )
                    .await?;
                    if flow == Flow::Quit {
                        return Ok(());
                    }
                    continue;
                }

                if question_box.set_text(&line) == EditOutcome::Rejected {
                    println!("Question exceeds the 1000 character limit.");
                    continue;
                }
                let disabled = ctx.session.lane(lane_id).is_loading();
                let Some(question) = question_box.try_submit(disabled) else {
                    continue;
                };
                submit(ctx, lane_id, &question).await;
            }

            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }
            Err(ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(CliError::Io(e.to_string())),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

async fn handle_command(
    ctx: &mut CliContext,
    lane_id: &mut LaneId,
    question_box: &mut QuestionBox,
    speech: &mut SpeechInput,
    speech_events: &mut tokio::sync::mpsc::UnboundedReceiver<SpeechInputEvent>,
    last_examples: &mut Vec<String>,
    command: &str,
) -> Result<Flow, CliError> {
    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match name {
        "help" => println!("{HELP}"),

        "quit" | "exit" => return Ok(Flow::Quit),

        "lane" => {
            *lane_id = match arg {
                Some("agent") => LaneId::Agent,
                Some("chain") => LaneId::DatabaseChain,
                Some(other) => {
                    println!("Unknown lane '{other}' (expected agent or chain).");
                    return Ok(Flow::Continue);
                }
                None => match lane_id {
                    LaneId::Agent => LaneId::DatabaseChain,
                    LaneId::DatabaseChain => LaneId::Agent,
                },
            };
        }

        "examples" => {
            *last_examples = ctx.session.example_questions();
            print_examples(last_examples);
        }

        "example" => {
            let picked = arg
                .and_then(|n| n.parse::<usize>().ok())
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| last_examples.get(i).cloned());
            match picked {
                // Examples are pre-validated; they bypass the edit gate.
                Some(question) => {
                    println!("{question}");
                    submit(ctx, *lane_id, &question).await;
                }
                None => println!("Pick a number from the last :examples listing."),
            }
        }

        "retry" => {
            let had_question = !ctx.session.lane(*lane_id).last_question().is_empty();
            if let Err(e) = ctx.session.retry(*lane_id).await {
                println!("{e}");
            } else if had_question {
                render_lane(ctx, *lane_id);
            } else {
                println!("Nothing to retry on this lane.");
            }
        }

        "clear" => {
            if ctx.session.lane(*lane_id).can_clear() {
                ctx.session.lane_mut(*lane_id).clear();
                drain_events(ctx, *lane_id);
                println!("Lane cleared.");
            } else {
                println!("Nothing to clear on this lane.");
            }
        }

        "thoughts" => toggle_panel(ctx, *lane_id, AnalysisTab::ThoughtProcess)?,

        "sources" => toggle_panel(ctx, *lane_id, AnalysisTab::SupportingContent)?,

        "speak" => ctx.session.lane(*lane_id).toggle_speech().await,

        "listen" => listen(ctx, *lane_id, question_box, speech, speech_events).await?,

        other => println!("Unknown command ':{other}' - :help for the list."),
    }

    Ok(Flow::Continue)
}

/// Submit a question on a lane and render the outcome.
async fn submit(ctx: &mut CliContext, lane_id: LaneId, question: &str) {
    if let Err(e) = ctx.session.ask(lane_id, question).await {
        println!("{e}");
        return;
    }
    render_lane(ctx, lane_id);
}

/// Print the lane's stored outcome or failure.
fn render_lane(ctx: &mut CliContext, lane_id: LaneId) {
    drain_events(ctx, lane_id);

    let lane = ctx.session.lane(lane_id);
    match lane.status() {
        RequestStatus::Succeeded => {
            if let Some(outcome) = lane.result() {
                presentation::print_separator();
                presentation::print_answer(outcome);
                presentation::print_separator();
            }
        }
        RequestStatus::Failed => {
            if let Some(error) = lane.error() {
                presentation::print_failure(error);
            }
        }
        RequestStatus::Idle | RequestStatus::Loading => {}
    }
}

/// Drain this lane's buffered events; trace them when verbose.
fn drain_events(ctx: &mut CliContext, lane_id: LaneId) {
    let rx = match lane_id {
        LaneId::Agent => &mut ctx.events.agent,
        LaneId::DatabaseChain => &mut ctx.events.chain,
    };

    while let Ok(event) = rx.try_recv() {
        if !ctx.verbose {
            continue;
        }
        match event {
            LaneEvent::StatusChanged(status) => println!("  [{lane_id:?}] status: {status:?}"),
            LaneEvent::AnswerReady(_) => println!("  [{lane_id:?}] answer ready"),
            LaneEvent::Failed(e) => println!("  [{lane_id:?}] failed: {e}"),
            LaneEvent::Cleared => println!("  [{lane_id:?}] cleared"),
        }
    }
}

/// Toggle an analysis panel tab and print its content when it opens.
fn toggle_panel(ctx: &mut CliContext, lane_id: LaneId, tab: AnalysisTab) -> Result<(), CliError> {
    ctx.session.lane_mut(lane_id).toggle_tab(tab);

    let lane = ctx.session.lane(lane_id);
    if lane.active_tab() != Some(tab) {
        println!("Panel closed.");
        return Ok(());
    }

    let Some(outcome) = lane.result() else {
        println!("No answer on this lane yet.");
        return Ok(());
    };
    match tab {
        AnalysisTab::ThoughtProcess => presentation::print_thoughts(&outcome.response)?,
        AnalysisTab::SupportingContent => presentation::print_sources(&outcome.response),
    }
    Ok(())
}

/// Capture a question by voice: transcripts replace the question text,
/// and the recording end submits whatever is present.
async fn listen(
    ctx: &mut CliContext,
    lane_id: LaneId,
    question_box: &mut QuestionBox,
    speech: &mut SpeechInput,
    speech_events: &mut tokio::sync::mpsc::UnboundedReceiver<SpeechInputEvent>,
) -> Result<(), CliError> {
    if let Err(e) = speech.start() {
        // A missing engine is expected on plenty of machines; report it
        // without tearing the session down.
        if matches!(e, VoiceError::RecognizerUnavailable) {
            println!("{e}");
            return Ok(());
        }
        return Err(e.into());
    }

    println!("Listening... (the engine ends the capture)");

    while let Some(event) = speech_events.recv().await {
        match event {
            SpeechInputEvent::TranscriptReady { text } => {
                question_box.apply_transcript(&text);
                println!("Heard: {}", question_box.text());
            }
            SpeechInputEvent::RecordingEnded => break,
            SpeechInputEvent::Error(e) => println!("Recognition error: {e}"),
            SpeechInputEvent::StateChanged(_) => {}
        }
    }

    let disabled = ctx.session.lane(lane_id).is_loading();
    if let Some(question) = question_box.try_submit(disabled) {
        submit(ctx, lane_id, &question).await;
    }
    Ok(())
}

fn print_examples(examples: &[String]) {
    println!("Example questions (:example <n> to ask one):");
    for (i, question) in examples.iter().enumerate() {
        println!("  {}. {}", i + 1, question);
    }
    println!();
}
