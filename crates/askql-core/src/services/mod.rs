//! Session orchestration services.

pub mod lane;
pub mod session;

pub use lane::AskLane;
pub use session::{AgentSession, LaneId, SessionEvents, SessionSettings};
