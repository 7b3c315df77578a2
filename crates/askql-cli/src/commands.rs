//! Subcommand definitions.

use clap::{Subcommand, ValueEnum};

use askql_core::AskRoute;

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Ask one question and print the answer
    Ask {
        /// The question to ask
        question: String,

        /// Backend route to ask on
        #[arg(long, value_enum, default_value_t = RouteArg::Oneshot)]
        route: RouteArg,

        /// How many documents to retrieve from search (1-100)
        #[arg(long, default_value_t = 10)]
        top: u32,

        /// Print the reasoning trace after the answer
        #[arg(long)]
        thoughts: bool,

        /// Print the supporting content after the answer
        #[arg(long)]
        sources: bool,

        /// Speak the answer through the default audio device
        #[arg(long)]
        speak: bool,
    },

    /// Interactive two-lane SQL agent session
    Agent {
        /// Speak successful answers automatically
        #[arg(long)]
        speak: bool,
    },
}

/// CLI spelling of the backend routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RouteArg {
    /// SQL agent (plans and executes SQL)
    Agent,

    /// SQL database chain
    Chain,

    /// One-shot question answering over indexed documents
    Oneshot,

    /// Conversational chat
    Chat,
}

impl RouteArg {
    /// The domain route this argument selects.
    #[must_use]
    pub const fn to_route(self) -> AskRoute {
        match self {
            Self::Agent => AskRoute::SqlAgent,
            Self::Chain => AskRoute::SqlChain,
            Self::Oneshot => AskRoute::OneShot,
            Self::Chat => AskRoute::Chat,
        }
    }
}
