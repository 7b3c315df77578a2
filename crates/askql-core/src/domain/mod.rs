//! Domain types shared by the lifecycle, services, and adapters.

pub mod answer;
pub mod examples;

pub use answer::{AskOverrides, AskResponse, AskRoute};
pub use examples::ExampleCatalog;
