// Application layer: odds access, the tool catalog and dispatcher, the system
// prompt, and the model conversation loop.

pub mod assistant;
pub mod odds;
pub mod orchestrator;
pub mod prompt;
pub mod tools;

pub use assistant::{Assistant, OddsStatus};
pub use orchestrator::{Answer, Orchestrator, OrchestratorError};
