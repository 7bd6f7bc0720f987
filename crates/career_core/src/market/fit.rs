//! Candidate fit scoring.
//!
//! Tracked profiles and generated candidates are reduced to the same
//! `CandidateFacts` so both are ranked on one scale (0-100).

use super::types::{AiCandidate, JobOpening, JobRequirements};
use crate::career::{CareerProfile, Role};
use crate::config::FitWeights;

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFacts {
    pub experience_years: u16,
    pub reputation: f32,
    pub skill_rating: f32,
    pub has_playoff_experience: bool,
    pub has_championship: bool,
    /// Last worked in the opening's track.
    pub same_track: bool,
    /// Has held the opening's role before.
    pub held_role: bool,
}

impl CandidateFacts {
    pub fn from_profile(profile: &CareerProfile, role: Role) -> Self {
        let track = role.track();
        let history = profile.history();
        Self {
            experience_years: profile.years_in_track(track),
            reputation: profile.reputation.for_track(track),
            skill_rating: profile.skills.rating_for(track),
            has_playoff_experience: history.playoff_appearances() > 0,
            has_championship: history.championships() > 0,
            same_track: profile.active_track() == Some(track),
            held_role: profile.role() == role || history.has_held(role),
        }
    }

    pub fn from_ai(candidate: &AiCandidate) -> Self {
        Self {
            experience_years: candidate.experience_years,
            reputation: candidate.reputation,
            skill_rating: candidate.skill_rating,
            has_playoff_experience: candidate.has_playoff_experience,
            has_championship: candidate.has_championship,
            same_track: true,
            held_role: false,
        }
    }

    pub fn meets(&self, requirements: &JobRequirements) -> bool {
        (!requirements.requires_playoff_experience || self.has_playoff_experience)
            && (!requirements.requires_championship || self.has_championship)
    }
}

/// Weighted fit against an opening's requirements.
pub fn fit_score(facts: &CandidateFacts, requirements: &JobRequirements, weights: &FitWeights) -> f32 {
    let experience = if requirements.min_experience == 0 {
        1.0
    } else {
        (facts.experience_years as f32 / requirements.min_experience as f32).min(1.0)
    };
    let reputation = if requirements.preferred_reputation <= 0.0 {
        1.0
    } else {
        (facts.reputation / requirements.preferred_reputation).clamp(0.0, 1.0)
    };
    let mut score = experience * weights.experience
        + reputation * weights.reputation
        + (facts.skill_rating / 100.0).clamp(0.0, 1.0) * weights.skills;
    if facts.meets(requirements) {
        score += weights.requirements;
    }
    // continuity only separates otherwise close candidates
    if facts.same_track {
        score += weights.track_continuity;
    }
    if facts.held_role {
        score += weights.role_continuity;
    }
    score.clamp(0.0, 100.0)
}

pub fn profile_fit(profile: &CareerProfile, opening: &JobOpening, weights: &FitWeights) -> f32 {
    fit_score(&CandidateFacts::from_profile(profile, opening.role), &opening.requirements, weights)
}
