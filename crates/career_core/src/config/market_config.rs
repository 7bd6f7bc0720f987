//! Job market parameters: fit weights, offer rules, generated terms.

use crate::error::{CareerError, Result};
use serde::{Deserialize, Serialize};

/// Points available from each fit component. The total is the maximum fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitWeights {
    /// (default: 30)
    pub experience: f32,
    /// (default: 30)
    pub reputation: f32,
    /// Bonus when every stated requirement is met (default: 10)
    pub requirements: f32,
    /// Scaled by the active-track skill average (default: 20)
    pub skills: f32,
    /// Same track as the last job (default: 5)
    pub track_continuity: f32,
    /// Held this exact role before (default: 3)
    pub role_continuity: f32,
}

impl Default for FitWeights {
    fn default() -> Self {
        Self {
            experience: 30.0,
            reputation: 30.0,
            requirements: 10.0,
            skills: 20.0,
            track_continuity: 5.0,
            role_continuity: 3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    pub fit: FitWeights,
    /// Minimum fit for an offer (default: 50)
    pub offer_threshold: f32,
    /// Minimum fit for an internal promotion (default: 45)
    pub promotion_threshold: f32,
    /// Generated outside candidates per opening (default: 3)
    pub ai_candidates_per_opening: usize,
    /// Seasons an opening may stay open before an outside hire (default: 1)
    pub max_open_seasons: u8,
    /// Seasons an unsolicited offer stays valid (default: 1)
    pub offer_window: u8,
    /// Base chance of an unsolicited offer for an eligible person (default: 0.15)
    pub unsolicited_chance: f32,
    /// Reputation that makes someone poachable without an expiring deal (default: 65)
    pub poach_reputation: f32,
    /// Annual salary by tier 1..=4
    pub salary_by_tier: [u64; 4],
    /// Contract length by tier 1..=4
    pub years_by_tier: [u8; 4],
    /// Buyout share of remaining value for generated contracts (default: 0.6)
    pub buyout_percentage: f32,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            fit: FitWeights::default(),
            offer_threshold: 50.0,
            promotion_threshold: 45.0,
            ai_candidates_per_opening: 3,
            max_open_seasons: 1,
            offer_window: 1,
            unsolicited_chance: 0.15,
            poach_reputation: 65.0,
            salary_by_tier: [350_000, 750_000, 1_800_000, 6_000_000],
            years_by_tier: [2, 2, 3, 4],
            buyout_percentage: 0.6,
        }
    }
}

impl MarketConfig {
    pub fn salary_for_tier(&self, tier: u8) -> u64 {
        self.salary_by_tier[Self::index(tier)]
    }

    pub fn years_for_tier(&self, tier: u8) -> u8 {
        self.years_by_tier[Self::index(tier)]
    }

    fn index(tier: u8) -> usize {
        (tier.clamp(1, 4) - 1) as usize
    }

    pub fn validate(&self) -> Result<()> {
        let f = &self.fit;
        let weights =
            [f.experience, f.reputation, f.requirements, f.skills, f.track_continuity, f.role_continuity];
        if weights.iter().any(|w| *w < 0.0) {
            return Err(CareerError::InvalidConfig("fit weights must be >= 0".into()));
        }
        if !(0.0..=1.0).contains(&self.unsolicited_chance) {
            return Err(CareerError::InvalidConfig("unsolicited_chance must be in 0..=1".into()));
        }
        if !(0.0..=1.0).contains(&self.buyout_percentage) {
            return Err(CareerError::MalformedContract("buyout_percentage must be in 0..=1".into()));
        }
        if self.years_by_tier.iter().any(|y| *y == 0) {
            return Err(CareerError::MalformedContract("generated contracts need >= 1 year".into()));
        }
        if self.offer_window == 0 {
            return Err(CareerError::InvalidConfig("offer_window must be > 0".into()));
        }
        Ok(())
    }
}
