//! Generated outside candidates.

use super::fit::{fit_score, CandidateFacts};
use super::types::{AiCandidate, JobRequirements};
use crate::career::{
    CareerProfile, CoachingSkills, FrontOfficeSkills, Reputation, Role, SkillSet,
    StyleProfile, Track,
};
use crate::config::FitWeights;
use crate::contract::CoachContract;
use crate::error::Result;
use crate::types::{ProfileId, TeamId, Year};
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "Alex", "Jordan", "Casey", "Morgan", "Riley", "Taylor", "Jamie", "Avery", "Quinn", "Rowan",
    "Drew", "Kendall", "Parker", "Reese", "Sawyer", "Emerson",
];

const LAST_NAMES: &[&str] = &[
    "Walker", "Brooks", "Hayes", "Coleman", "Fischer", "Nakamura", "Okafor", "Delgado", "Lindqvist",
    "Moreau", "Kowalski", "Sato", "Mendes", "Hart", "Ramsey", "Whitfield",
];

pub fn random_name(rng: &mut impl Rng) -> String {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    format!("{} {}", first, last)
}

/// Draw `count` candidates aimed at `role`, already scored against
/// `requirements`.
pub fn generate_candidates(
    role: Role,
    requirements: &JobRequirements,
    weights: &FitWeights,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<AiCandidate> {
    let tier = role.tier().unwrap_or(1);
    (0..count)
        .map(|_| {
            let min_age = 26 + (tier - 1) * 6;
            let age = rng.gen_range(min_age..=min_age + 20);
            let experience_years =
                (requirements.min_experience as i32 + rng.gen_range(-2..=6)).max(0) as u16;
            let reputation = (requirements.preferred_reputation + rng.gen_range(-15.0..10.0)).clamp(0.0, 100.0);
            let skill_rating = rng.gen_range(40.0..80.0);
            let has_playoff_experience = rng.gen_bool((0.3 + tier as f64 * 0.1).min(1.0));
            let has_championship = has_playoff_experience && rng.gen_bool(0.15);
            let mut candidate = AiCandidate {
                name: random_name(rng),
                age,
                reputation,
                experience_years,
                skill_rating,
                has_playoff_experience,
                has_championship,
                fit_score: 0.0,
            };
            candidate.fit_score = fit_score(&CandidateFacts::from_ai(&candidate), requirements, weights);
            candidate
        })
        .collect()
}

/// Materialize a generated candidate as a tracked profile already holding
/// `role` at `team`. Outside hires arrive with their experience, so the
/// seniority rule for hires does not apply.
pub fn into_profile(
    candidate: &AiCandidate,
    id: ProfileId,
    team: TeamId,
    role: Role,
    contract: CoachContract,
    year: Year,
    rng: &mut impl Rng,
) -> Result<CareerProfile> {
    let track = role.track();
    let center = candidate.skill_rating.round().clamp(0.0, 100.0) as u8;
    let mut skills = SkillSet::default();
    match track {
        Track::Coaching => skills.coaching = CoachingSkills::random(rng, center),
        _ => skills.front_office = FrontOfficeSkills::random(rng, center),
    }
    let mut reputation = Reputation::uniform(candidate.reputation * 0.8);
    reputation.set_track(track, candidate.reputation);
    let birth_year = year.saturating_sub(candidate.age as Year);
    let profile = CareerProfile::established(
        id,
        candidate.name.clone(),
        birth_year,
        team,
        role,
        contract,
        year,
        candidate.experience_years,
    )?;
    Ok(profile
        .with_skills(skills)
        .with_style(StyleProfile::random(rng))
        .with_reputation(reputation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::Buyout;
    use crate::outcome::TeamOutlook;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_candidates_are_seeded() {
        let req = JobRequirements::for_role(Role::HeadCoach, TeamOutlook::PlayoffHopeful);
        let w = FitWeights::default();
        let a = generate_candidates(Role::HeadCoach, &req, &w, 3, &mut ChaCha8Rng::seed_from_u64(5));
        let b = generate_candidates(Role::HeadCoach, &req, &w, 3, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        for c in &a {
            assert!(c.age >= 44);
            assert!((0.0..=100.0).contains(&c.fit_score));
        }
    }

    #[test]
    fn test_into_profile_holds_role_with_experience() {
        let req = JobRequirements::for_role(Role::AssistantGM, TeamOutlook::Rebuilding);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let c = generate_candidates(Role::AssistantGM, &req, &FitWeights::default(), 1, &mut rng).remove(0);
        let contract = CoachContract::new(3, 900_000, Buyout::Percentage(0.5));
        let p = into_profile(&c, ProfileId(40), TeamId(2), Role::AssistantGM, contract, 2031, &mut rng).unwrap();
        assert_eq!(p.front_office_years(), c.experience_years);
        assert_eq!(p.coaching_years(), 0);
        assert_eq!(p.age(2031), c.age);
        assert_eq!(p.reputation.front_office, c.reputation);
        assert_eq!(p.role(), Role::AssistantGM);
        assert_eq!(p.team(), Some(TeamId(2)));
        assert_eq!(p.history().len(), 1);
    }
}
