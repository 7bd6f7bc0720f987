//! What happened during one season tick.

use crate::career::{Role, Track};
use crate::contract::AwardKind;
use crate::error::CareerError;
use crate::retirement::RetirementReason;
use crate::types::{OfferId, OpeningId, ProfileId, TeamId, Year};
use serde::{Deserialize, Serialize};

/// The six ordered steps of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickStep {
    CloseSeason,
    Reputation,
    JobSecurity,
    Retirement,
    Market,
    Tenure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeasonEvent {
    SeasonClosed { profile: ProfileId, team: TeamId, incentives_paid: u64 },
    AwardRecorded { profile: ProfileId, award: AwardKind, paid: u64 },
    ReputationChanged { profile: ProfileId, track: Track, before: f32, after: f32 },
    Fired { profile: ProfileId, team: TeamId, role: Role, buyout: u64 },
    ContractExtended { profile: ProfileId, team: TeamId, years: u8 },
    ContractExpired { profile: ProfileId, team: TeamId, role: Role },
    Retired { profile: ProfileId, reason: RetirementReason, chance: f32 },
    OpeningListed { opening: OpeningId, team: TeamId, role: Role },
    Promoted { profile: ProfileId, team: TeamId, role: Role },
    Hired { profile: ProfileId, team: TeamId, role: Role, opening: OpeningId },
    ApplicationRejected { profile: ProfileId, opening: OpeningId },
    OfferMade { profile: ProfileId, offer: OfferId, opening: OpeningId },
    OfferAccepted { profile: ProfileId, offer: OfferId, team: TeamId, role: Role },
    OfferExpired { offer: OfferId },
    OutsideHire { profile: ProfileId, opening: OpeningId },
}

/// A profile step that failed with a recoverable error and was skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedStep {
    pub profile: Option<ProfileId>,
    pub step: TickStep,
    pub code: String,
    pub message: String,
}

impl SkippedStep {
    pub fn new(profile: Option<ProfileId>, step: TickStep, error: &CareerError) -> Self {
        Self { profile, step, code: error.code().to_string(), message: error.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonReport {
    pub year: Year,
    pub events: Vec<SeasonEvent>,
    pub skipped: Vec<SkippedStep>,
}

impl SeasonReport {
    pub fn new(year: Year) -> Self {
        Self { year, events: Vec::new(), skipped: Vec::new() }
    }

    pub fn push(&mut self, event: SeasonEvent) {
        self.events.push(event);
    }

    pub fn count(&self, pred: impl Fn(&SeasonEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn hires(&self) -> usize {
        self.count(|e| matches!(e, SeasonEvent::Hired { .. } | SeasonEvent::OutsideHire { .. } | SeasonEvent::OfferAccepted { .. }))
    }

    pub fn firings(&self) -> usize {
        self.count(|e| matches!(e, SeasonEvent::Fired { .. }))
    }

    pub fn retirements(&self) -> usize {
        self.count(|e| matches!(e, SeasonEvent::Retired { .. }))
    }

    pub fn promotions(&self) -> usize {
        self.count(|e| matches!(e, SeasonEvent::Promoted { .. }))
    }

    /// Events touching one profile, in order.
    pub fn events_for(&self, profile: ProfileId) -> Vec<&SeasonEvent> {
        self.events.iter().filter(|e| e.profile() == Some(profile)).collect()
    }
}

impl SeasonEvent {
    pub fn profile(&self) -> Option<ProfileId> {
        match self {
            SeasonEvent::SeasonClosed { profile, .. }
            | SeasonEvent::AwardRecorded { profile, .. }
            | SeasonEvent::ReputationChanged { profile, .. }
            | SeasonEvent::Fired { profile, .. }
            | SeasonEvent::ContractExtended { profile, .. }
            | SeasonEvent::ContractExpired { profile, .. }
            | SeasonEvent::Retired { profile, .. }
            | SeasonEvent::Promoted { profile, .. }
            | SeasonEvent::Hired { profile, .. }
            | SeasonEvent::ApplicationRejected { profile, .. }
            | SeasonEvent::OfferMade { profile, .. }
            | SeasonEvent::OfferAccepted { profile, .. }
            | SeasonEvent::OutsideHire { profile, .. } => Some(*profile),
            SeasonEvent::OpeningListed { .. } | SeasonEvent::OfferExpired { .. } => None,
        }
    }
}
