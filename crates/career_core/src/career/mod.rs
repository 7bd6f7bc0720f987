//! People, their roles and the career state machine.

mod history;
mod profile;
mod registry;
mod role;
mod skills;

pub use history::{CareerHistory, DepartureReason, HistoryEntry};
pub use profile::{CareerProfile, Reputation, PROMOTION_REPUTATION_BUMP};
pub use registry::PersonnelRegistry;
pub use role::{Role, Track};
pub use skills::{CoachingSkills, CoachingStyle, FrontOfficeSkills, SkillSet, StyleProfile};
