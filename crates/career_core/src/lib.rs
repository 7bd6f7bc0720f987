//! # career_core - Career & Personnel Lifecycle Engine
//!
//! Tracks coaches and front-office staff across seasons: hiring, promotion,
//! firing, contracts, reputation, retirement and the job market that
//! recycles vacated roles.
//!
//! ## Features
//! - Deterministic season ticks (same seed = same result)
//! - Validated career state machine with full history
//! - Internal promotion chains, AI applicants and unsolicited offers
//! - JSON API and checksummed snapshots for host integration

// Setup and transition calls carry the whole employment context
#![allow(clippy::too_many_arguments)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Tuple-heavy vacancy bookkeeping
#![allow(clippy::type_complexity)]

pub mod api;
pub mod career;
pub mod config;
pub mod contract;
pub mod error;
pub mod market;
pub mod outcome;
pub mod reputation;
pub mod retirement;
pub mod rng;
pub mod save;
pub mod season;
pub mod types;

pub use career::{CareerHistory, CareerProfile, DepartureReason, PersonnelRegistry, Reputation, Role, Track};
pub use config::LifecycleConfig;
pub use contract::{Buyout, CoachContract};
pub use error::{CareerError, Result};
pub use market::{JobMarket, MarketSummary};
pub use outcome::{PlayoffResult, SeasonRecord, TeamOutlook, TeamSeason, TeamSituation};
pub use retirement::{RetirementModel, RetirementReason};
pub use save::{EngineSnapshot, SnapshotError};
pub use season::{LifecycleOrchestrator, SeasonEvent, SeasonInput, SeasonReport};
pub use types::{ApplicationId, OfferId, OpeningId, ProfileId, TeamId, Year};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
