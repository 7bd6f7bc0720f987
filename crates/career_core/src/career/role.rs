// 직책 / 트랙 정의
use serde::{Deserialize, Serialize};

/// Employment lineage. Unemployed and Retired are track-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Track {
    Coaching,
    FrontOffice,
    Unemployed,
    Retired,
}

impl Track {
    pub fn is_employment_track(&self) -> bool {
        matches!(self, Track::Coaching | Track::FrontOffice)
    }

    /// Roles of this track, lowest tier first.
    pub fn roles(&self) -> &'static [Role] {
        match self {
            Track::Coaching => &[
                Role::AssistantCoach,
                Role::PositionCoach,
                Role::Coordinator,
                Role::HeadCoach,
            ],
            Track::FrontOffice => &[
                Role::Scout,
                Role::ScoutingDirector,
                Role::AssistantGM,
                Role::GeneralManager,
            ],
            Track::Unemployed => &[Role::Unemployed],
            Track::Retired => &[Role::Retired],
        }
    }
}

/// Every role across both tracks plus the two terminal pseudo-roles.
///
/// Declaration order carries no meaning; seniority comes from [`Role::tier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Unemployed,
    Retired,
    AssistantCoach,
    PositionCoach,
    Coordinator,
    HeadCoach,
    Scout,
    ScoutingDirector,
    AssistantGM,
    GeneralManager,
}

impl Role {
    pub const TOP_TIER: u8 = 4;

    pub fn track(&self) -> Track {
        match self {
            Role::Unemployed => Track::Unemployed,
            Role::Retired => Track::Retired,
            Role::AssistantCoach | Role::PositionCoach | Role::Coordinator | Role::HeadCoach => {
                Track::Coaching
            }
            Role::Scout | Role::ScoutingDirector | Role::AssistantGM | Role::GeneralManager => {
                Track::FrontOffice
            }
        }
    }

    /// Seniority within the role's own track (1 = entry). Pseudo-roles have none.
    pub fn tier(&self) -> Option<u8> {
        match self {
            Role::Unemployed | Role::Retired => None,
            Role::AssistantCoach | Role::Scout => Some(1),
            Role::PositionCoach | Role::ScoutingDirector => Some(2),
            Role::Coordinator | Role::AssistantGM => Some(3),
            Role::HeadCoach | Role::GeneralManager => Some(4),
        }
    }

    pub fn is_employed(&self) -> bool {
        self.tier().is_some()
    }

    pub fn is_entry_level(&self) -> bool {
        self.tier() == Some(1)
    }

    pub fn is_top_tier(&self) -> bool {
        self.tier() == Some(Self::TOP_TIER)
    }

    /// True when `other` is in the same track and strictly more senior.
    pub fn is_promotion_to(&self, other: Role) -> bool {
        match (self.tier(), other.tier()) {
            (Some(from), Some(to)) => self.track() == other.track() && to > from,
            _ => false,
        }
    }

    /// Role one tier above within the same track.
    pub fn next_up(&self) -> Option<Role> {
        let tier = self.tier()?;
        self.track().roles().iter().copied().find(|r| r.tier() == Some(tier + 1))
    }

    /// Role one tier below within the same track.
    pub fn next_down(&self) -> Option<Role> {
        let below = self.tier()?.checked_sub(1)?;
        self.track().roles().iter().copied().find(|r| r.tier() == Some(below))
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Unemployed => "Unemployed",
            Role::Retired => "Retired",
            Role::AssistantCoach => "Assistant Coach",
            Role::PositionCoach => "Position Coach",
            Role::Coordinator => "Coordinator",
            Role::HeadCoach => "Head Coach",
            Role::Scout => "Scout",
            Role::ScoutingDirector => "Scouting Director",
            Role::AssistantGM => "Assistant GM",
            Role::GeneralManager => "General Manager",
        }
    }
}
