//! Answer rendering: the answer itself, citations, and the analysis
//! panel content (thought process / supporting content).

use anyhow::Result;

use askql_core::domain::AskResponse;
use askql_core::lifecycle::AskOutcome;

/// Print a horizontal separator line.
pub fn print_separator() {
    println!("{}", "─".repeat(60));
}

/// Print a stored answer.
///
/// An embedded payload error is shown inline after the answer - it
/// arrived on a successful response and partial results still count.
pub fn print_answer(outcome: &AskOutcome) {
    let response = &outcome.response;

    if !response.answer.is_empty() {
        println!("{}", response.answer);
    }

    if let Some(error) = response.embedded_error() {
        println!();
        println!("⚠️  {error}");
    }

    if !response.data_points.is_empty() {
        println!();
        println!(
            "({} supporting snippet{} - :sources to view)",
            response.data_points.len(),
            if response.data_points.len() == 1 { "" } else { "s" }
        );
    }

    if outcome.speech_url.is_some() {
        println!("(spoken audio available - :speak to play)");
    }
}

/// Print a transport failure with the retry affordance.
pub fn print_failure(error: &str) {
    eprintln!("Request failed: {error}");
    eprintln!("(:retry to resubmit the same question)");
}

/// Print the supporting content snippets, numbered.
pub fn print_sources(response: &AskResponse) {
    if response.data_points.is_empty() {
        println!("No supporting content for this answer.");
        return;
    }

    println!("Supporting content:");
    for (i, point) in response.data_points.iter().enumerate() {
        println!("  [{}] {}", i + 1, point);
    }
}

/// Print the reasoning trace.
///
/// The shape varies by route — the agent reports a list of tool steps,
/// the chain a single string — so anything that is not plain text is
/// pretty-printed as JSON.
pub fn print_thoughts(response: &AskResponse) -> Result<()> {
    println!("Thought process:");
    match &response.thoughts {
        serde_json::Value::Null => println!("  (none recorded)"),
        serde_json::Value::String(text) => {
            for line in text.lines() {
                println!("  {line}");
            }
        }
        other => {
            let pretty = serde_json::to_string_pretty(other)?;
            for line in pretty.lines() {
                println!("  {line}");
            }
        }
    }
    Ok(())
}
