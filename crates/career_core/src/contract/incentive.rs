// 인센티브 조건
use crate::outcome::{PlayoffResult, TeamSeason};
use serde::{Deserialize, Serialize};

/// Award signals come from the award system, never from season totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AwardKind {
    CoachOfTheYear,
    ExecutiveOfTheYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncentiveType {
    /// Paid when season wins reach `threshold`.
    WinTotal,
    PlayoffAppearance,
    /// Paid when the playoff run reaches at least this round.
    ReachRound(PlayoffResult),
    Championship,
    Award(AwardKind),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incentive {
    pub incentive_type: IncentiveType,
    /// Only meaningful for `WinTotal`.
    pub threshold: u8,
    pub payout: u64,
    pub achieved: bool,
}

impl Incentive {
    pub fn new(incentive_type: IncentiveType, threshold: u8, payout: u64) -> Self {
        Self { incentive_type, threshold, payout, achieved: false }
    }

    pub fn win_total(threshold: u8, payout: u64) -> Self {
        Self::new(IncentiveType::WinTotal, threshold, payout)
    }

    /// Predicate against a finished season. Award incentives are never
    /// satisfied here; they count only once flagged through
    /// [`super::CoachContract::record_award`].
    pub fn is_met_by(&self, season: &TeamSeason) -> bool {
        match self.incentive_type {
            IncentiveType::WinTotal => season.record.wins >= self.threshold,
            IncentiveType::PlayoffAppearance => season.made_playoffs(),
            IncentiveType::ReachRound(round) => {
                round.made_playoffs() && season.playoff.reached(round)
            }
            IncentiveType::Championship => season.won_championship,
            IncentiveType::Award(_) => self.achieved,
        }
    }
}
