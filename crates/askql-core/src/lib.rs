#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod input;
pub mod lifecycle;
pub mod panel;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{AskOverrides, AskResponse, AskRoute, ExampleCatalog};
pub use input::{EditOutcome, InputAction, QuestionBox};
pub use lifecycle::{
    AskLifecycle, AskOutcome, LaneEvent, LifecycleError, RequestStatus, RequestTicket,
};
pub use panel::{AnalysisPanel, AnalysisTab};
pub use ports::{AnswerPort, AnswerPortError, SpeechOutput, SpeechPortError, SpeechSynthesisPort};
pub use services::{AgentSession, AskLane, LaneId, SessionEvents, SessionSettings};

// Silence unused dev-dependency warnings until more async service tests land
#[cfg(test)]
use tokio_test as _;
