//! Season tick orchestration.

pub mod input;
pub mod orchestrator;
pub mod report;
pub mod security;

#[cfg(test)]
mod tests;

pub use input::SeasonInput;
pub use orchestrator::LifecycleOrchestrator;
pub use report::{SeasonEvent, SeasonReport, SkippedStep, TickStep};
pub use security::{JobSecurityModel, SecurityVerdict};
