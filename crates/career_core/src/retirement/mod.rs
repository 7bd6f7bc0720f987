//! Retirement probability model.
//!
//! Five sub-scores (age, unemployment, recent success, health, tenure) are
//! weighted into one bounded chance plus a primary reason. The result is a
//! per-season snapshot and is never stored on the profile.

pub mod curves;

use crate::career::CareerProfile;
use crate::config::{RetirementConfig, RetirementWeights};
use crate::types::Year;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Seasons looked back for recent success.
pub const RECENT_SEASONS: u16 = 5;

const VOLUNTARY_SUCCESS_THRESHOLD: f32 = 80.0;
const VOLUNTARY_AGE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RetirementReason {
    Age,
    Unemployment,
    Health,
    /// Leaving on a high note.
    Voluntary,
    /// Long career, financially settled.
    Tenure,
}

impl RetirementReason {
    pub fn description(&self) -> &'static str {
        match self {
            RetirementReason::Age => "retired due to age",
            RetirementReason::Unemployment => "retired after failing to find work",
            RetirementReason::Health => "retired for health reasons",
            RetirementReason::Voluntary => "went out on top",
            RetirementReason::Tenure => "retired after a long career",
        }
    }
}

/// Raw inputs read off a profile for one season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementInputs {
    pub age: u8,
    pub years_unemployed: u8,
    pub recent_championship: bool,
    pub recent_playoffs: u8,
    pub currently_employed: bool,
    pub total_tenure: u16,
}

impl RetirementInputs {
    pub fn from_profile(profile: &CareerProfile, year: Year) -> Self {
        let since = year.saturating_sub(RECENT_SEASONS - 1);
        let recent: Vec<_> = profile.history().seasons_since(since).collect();
        Self {
            age: profile.age(year),
            years_unemployed: profile.years_unemployed(),
            recent_championship: recent.iter().any(|e| e.won_championship),
            recent_playoffs: recent.iter().filter(|e| e.made_playoffs()).count().min(u8::MAX as usize)
                as u8,
            currently_employed: profile.is_employed(),
            total_tenure: profile.total_tenure(),
        }
    }
}

/// Derived snapshot: sub-scores, chance and reason.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementFactors {
    pub age_factor: f32,
    pub unemployment_factor: f32,
    /// Raw success (high = successful). Inverted only inside the weighting.
    pub success_factor: f32,
    pub health_factor: f32,
    pub tenure_factor: f32,
    pub would_force_retirement: bool,
    pub final_retirement_chance: f32,
    pub primary_reason: RetirementReason,
}

impl RetirementFactors {
    /// Combine sub-scores (each 0..=100) under `weights`.
    pub fn from_scores(
        age: f32,
        unemployment: f32,
        success: f32,
        health: f32,
        tenure: f32,
        force: bool,
        weights: &RetirementWeights,
    ) -> Self {
        let clamp = |v: f32| v.clamp(0.0, 100.0);
        let (age, unemployment, success, health, tenure) =
            (clamp(age), clamp(unemployment), clamp(success), clamp(health), clamp(tenure));

        let weighted = age * weights.age
            + unemployment * weights.unemployment
            + (100.0 - success) * weights.success
            + health * weights.health
            + tenure * weights.tenure;
        let chance = (weighted / 100.0).clamp(0.0, 1.0);

        let primary_reason = if force {
            RetirementReason::Unemployment
        } else {
            Self::pick_reason(age, unemployment, success, health, tenure)
        };

        Self {
            age_factor: age,
            unemployment_factor: unemployment,
            success_factor: success,
            health_factor: health,
            tenure_factor: tenure,
            would_force_retirement: force,
            final_retirement_chance: chance,
            primary_reason,
        }
    }

    // Largest raw score, earliest listed wins ties; the "going out on top"
    // override is applied last.
    fn pick_reason(age: f32, unemployment: f32, success: f32, health: f32, tenure: f32) -> RetirementReason {
        let candidates = [
            (RetirementReason::Age, age),
            (RetirementReason::Unemployment, unemployment),
            (RetirementReason::Health, health),
            (RetirementReason::Voluntary, success),
            (RetirementReason::Tenure, tenure),
        ];
        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.1 > best.1 {
                best = *candidate;
            }
        }
        if success > VOLUNTARY_SUCCESS_THRESHOLD && age > VOLUNTARY_AGE_THRESHOLD {
            return RetirementReason::Voluntary;
        }
        best.0
    }
}

pub struct RetirementModel<'a> {
    config: &'a RetirementConfig,
}

impl<'a> RetirementModel<'a> {
    pub fn new(config: &'a RetirementConfig) -> Self {
        Self { config }
    }

    /// Whether this profile is considered at all this season: old enough, or
    /// out of work for at least a year.
    pub fn should_evaluate(&self, profile: &CareerProfile, year: Year) -> bool {
        !profile.is_retired()
            && (profile.age(year) >= self.config.min_evaluation_age || profile.years_unemployed() >= 1)
    }

    pub fn assess(&self, inputs: &RetirementInputs, rng: &mut impl Rng) -> RetirementFactors {
        let force_years = self.config.force_unemployment_years;
        RetirementFactors::from_scores(
            curves::age_score(inputs.age),
            curves::unemployment_score(inputs.years_unemployed, force_years),
            curves::success_score(
                inputs.recent_championship,
                inputs.recent_playoffs,
                inputs.currently_employed,
            ),
            curves::health_score(inputs.age, rng),
            curves::tenure_score(inputs.total_tenure),
            inputs.years_unemployed >= force_years,
            &self.config.weights,
        )
    }

    /// Bernoulli draw on the chance; forced retirements skip the draw.
    pub fn decide(&self, factors: &RetirementFactors, rng: &mut impl Rng) -> bool {
        factors.would_force_retirement || rng.gen::<f32>() < factors.final_retirement_chance
    }
}
