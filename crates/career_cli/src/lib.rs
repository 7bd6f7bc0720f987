//! League driver library
//!
//! Builds a synthetic league, draws team results and runs season ticks.
//! The binary is a thin clap wrapper around these functions.

use anyhow::{Context, Result};
use career_core::career::{CoachingSkills, FrontOfficeSkills, SkillSet, StyleProfile};
use career_core::market::candidates::random_name;
use career_core::market::OfferedTerms;
use career_core::{
    CareerProfile, EngineSnapshot, LifecycleConfig, LifecycleOrchestrator, ProfileId, Reputation, Role,
    SeasonInput, SeasonRecord, SeasonReport, TeamId, TeamOutlook, TeamSeason, TeamSituation, Year,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use tracing::info;

/// Regular-season games per team.
pub const GAMES_PER_SEASON: u8 = 17;

/// Staff seats created for every team: (role, age range, prior years range, reputation center).
const SEATS: [(Role, (u16, u16), (u16, u16), f32); 4] = [
    (Role::HeadCoach, (44, 60), (10, 20), 62.0),
    (Role::Coordinator, (36, 52), (6, 12), 52.0),
    (Role::GeneralManager, (45, 62), (10, 22), 60.0),
    (Role::Scout, (25, 40), (0, 4), 40.0),
];

/// Load a config file, or the realistic preset when none is given.
pub fn load_config(path: Option<&Path>) -> Result<LifecycleConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config = LifecycleConfig::from_json_str(&json)
                .with_context(|| format!("parsing config {}", path.display()))?;
            Ok(config)
        }
        None => Ok(LifecycleConfig::realistic()),
    }
}

/// Seeded league: four staff seats per team plus two free agents per team.
pub fn build_league(config: LifecycleConfig, teams: u32, seed: u64, first_season: Year) -> Result<LifecycleOrchestrator> {
    let mut orch = LifecycleOrchestrator::new(config, first_season).context("invalid lifecycle config")?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let market = orch.config().market.clone();

    for t in 1..=teams {
        let team = TeamId(t);
        for (role, ages, prior, rep) in SEATS {
            let id = orch.registry_mut().allocate_id();
            let age = rng.gen_range(ages.0..=ages.1);
            let years = rng.gen_range(prior.0..=prior.1);
            let mut contract = OfferedTerms::for_role(role, &TeamSituation::default(), &market).to_contract();
            // stagger expiries so the whole league does not turn over at once
            contract.current_year = rng.gen_range(0..contract.total_years);
            let profile = CareerProfile::established(
                id,
                random_name(&mut rng),
                first_season.saturating_sub(age),
                team,
                role,
                contract,
                first_season,
                years,
            )
            .with_context(|| format!("seating {} at {}", role.display_name(), team))?
            .with_skills(random_skills(&mut rng, rep))
            .with_style(StyleProfile::random(&mut rng))
            .with_reputation(Reputation::uniform(rep + rng.gen_range(-8.0..8.0)));
            orch.add_profile(profile);
        }
    }

    for _ in 0..teams * 2 {
        let id = orch.registry_mut().allocate_id();
        let coaching = rng.gen_range(0..12);
        let front_office = rng.gen_range(0..6);
        let birth_year = first_season.saturating_sub(rng.gen_range(28..54));
        let profile = CareerProfile::new(id, random_name(&mut rng), birth_year)
            .with_prior_experience(coaching, front_office)
            .with_skills(random_skills(&mut rng, 50.0))
            .with_style(StyleProfile::random(&mut rng))
            .with_reputation(Reputation::uniform(rng.gen_range(30.0..60.0)));
        orch.add_profile(profile);
    }

    info!(teams, profiles = orch.registry().len(), "league built");
    Ok(orch)
}

fn random_skills(rng: &mut impl Rng, center: f32) -> SkillSet {
    let center = center.clamp(20.0, 90.0) as u8;
    SkillSet { coaching: CoachingSkills::random(rng, center), front_office: FrontOfficeSkills::random(rng, center) }
}

/// Draw one season of results. The top third of the table makes the
/// playoffs; the best record wins the title.
pub fn synthetic_input(year: Year, seed: u64, teams: u32) -> SeasonInput {
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ (year as u64).wrapping_mul(0x9E37_79B9));
    let mut table: Vec<(TeamId, u8)> =
        (1..=teams).map(|t| (TeamId(t), rng.gen_range(2..=GAMES_PER_SEASON - 2))).collect();
    table.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let playoff_spots = (teams as usize / 3).max(1);
    let mut input = SeasonInput::new(year, seed.wrapping_add(year as u64));
    for (rank, (team, wins)) in table.into_iter().enumerate() {
        let record = SeasonRecord::new(wins, GAMES_PER_SEASON - wins, 0);
        let playoff = match rank {
            0 => "championship",
            r if r >= playoff_spots => "missed",
            1 => "conference",
            2 | 3 => "divisional",
            _ => "wild card",
        };
        let outlook = match wins {
            w if w >= 11 => TeamOutlook::Contender,
            w if w <= 6 => TeamOutlook::Rebuilding,
            _ => TeamOutlook::PlayoffHopeful,
        };
        let situation = TeamSituation {
            outlook,
            owner_patience: rng.gen_range(20..=80),
            financial_health: rng.gen_range(20..=90),
        };
        input = input
            .with_team_season(team, TeamSeason::new(record, playoff, rank == 0))
            .with_situation(team, situation);
    }
    input
}

/// One line of the per-season printout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonSummary {
    pub year: Year,
    pub hires: usize,
    pub firings: usize,
    pub retirements: usize,
    pub promotions: usize,
    pub skipped: usize,
    pub open_positions: usize,
}

impl SeasonSummary {
    fn from_report(report: &SeasonReport, open_positions: usize) -> Self {
        Self {
            year: report.year,
            hires: report.hires(),
            firings: report.firings(),
            retirements: report.retirements(),
            promotions: report.promotions(),
            skipped: report.skipped.len(),
            open_positions,
        }
    }
}

/// Run `seasons` ticks starting at the engine's next season.
pub fn simulate(
    orch: &mut LifecycleOrchestrator,
    teams: u32,
    seasons: u16,
    seed: u64,
) -> Result<Vec<SeasonSummary>> {
    let mut summaries = Vec::with_capacity(seasons as usize);
    for _ in 0..seasons {
        let year = orch.next_season();
        let input = synthetic_input(year, seed, teams);
        let report = orch.run_season(&input).with_context(|| format!("season {}", year))?;
        summaries.push(SeasonSummary::from_report(&report, orch.market_summary().open_positions));
    }
    Ok(summaries)
}

pub fn save_snapshot(orch: &LifecycleOrchestrator, path: &Path) -> Result<()> {
    let snapshot = EngineSnapshot::capture(orch).context("capturing snapshot")?;
    snapshot.write_to(path).with_context(|| format!("writing snapshot {}", path.display()))?;
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<LifecycleOrchestrator> {
    let snapshot =
        EngineSnapshot::read_from(path).with_context(|| format!("reading snapshot {}", path.display()))?;
    let orch = snapshot.restore().context("restoring snapshot")?;
    Ok(orch)
}

/// Pretty JSON for `inspect`: one profile card, or the market summary.
pub fn inspect(orch: &LifecycleOrchestrator, profile: Option<u32>) -> Result<String> {
    let json = match profile {
        Some(id) => {
            let view = orch.profile_view(ProfileId(id)).with_context(|| format!("profile {}", id))?;
            serde_json::to_string_pretty(&view)?
        }
        None => serde_json::to_string_pretty(&orch.market_summary())?,
    };
    Ok(json)
}
