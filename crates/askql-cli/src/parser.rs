//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface definition for the askql terminal client.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "askql")]
#[command(about = "Ask questions over the sample database and indexed documents")]
#[command(version)]
pub struct Cli {
    /// Base URL of the backend function app
    #[arg(long = "api-url", env = "ASKQL_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Function key, sent as the `code` query parameter
    #[arg(long = "api-key", env = "ASKQL_API_KEY", global = true)]
    pub api_key: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
