//! One-shot ask command handler.
//!
//! Builds a single lane for the chosen route, submits the question
//! through the same gate the interactive session uses, and prints the
//! outcome.

use std::sync::Arc;

use askql_core::domain::{AskOverrides, AskRoute};
use askql_core::input::{EditOutcome, QuestionBox};
use askql_core::lifecycle::RequestStatus;
use askql_core::services::AskLane;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation;

/// Arguments for the ask command.
pub struct AskArgs {
    /// The raw question text.
    pub question: String,
    /// Backend route.
    pub route: AskRoute,
    /// Retrieval count override.
    pub top: u32,
    /// Print the reasoning trace.
    pub thoughts: bool,
    /// Print the supporting content.
    pub sources: bool,
    /// Speak the answer.
    pub speak: bool,
}

/// Execute the ask command.
pub async fn execute(ctx: &CliContext, args: AskArgs) -> Result<(), CliError> {
    // The same edit and submission rules apply here as in the session:
    // over-length questions are rejected outright, blank ones never send.
    let mut input = QuestionBox::new(true);
    if input.set_text(&args.question) == EditOutcome::Rejected {
        return Err(CliError::Arguments(
            "question exceeds the 1000 character limit".into(),
        ));
    }
    let Some(question) = input.try_submit(false) else {
        return Err(CliError::Arguments("question is empty".into()));
    };

    let mut overrides = AskOverrides::default();
    overrides.set_top(args.top);

    let (mut lane, _events) = AskLane::new(
        args.route,
        Arc::clone(&ctx.answers),
        Arc::clone(&ctx.synthesis),
        Arc::clone(&ctx.playback),
    );

    lane.send(&question, &overrides, args.speak)
        .await
        .map_err(|e| CliError::Api(e.to_string()))?;

    match lane.status() {
        RequestStatus::Succeeded => {
            if let Some(outcome) = lane.result() {
                presentation::print_answer(outcome);

                if args.sources {
                    println!();
                    presentation::print_sources(&outcome.response);
                }
                if args.thoughts {
                    println!();
                    presentation::print_thoughts(&outcome.response)?;
                }
            }
            Ok(())
        }
        _ => Err(CliError::Api(
            lane.error().unwrap_or("request did not complete").to_string(),
        )),
    }
}
