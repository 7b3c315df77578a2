//! Port traits implemented by the adapter crates.
//!
//! DTOs and errors here are transport-agnostic: no HTTP or audio types
//! leak into core. Adapters map their internal errors onto the port
//! errors at the boundary.

pub mod answer;
pub mod speech;

pub use answer::{AnswerPort, AnswerPortError};
pub use speech::{SpeechOutput, SpeechPortError, SpeechSynthesisPort};
