//! Job security: firing risk after a closed season and contract renewals.

use crate::career::CareerProfile;
use crate::config::JobSecurityConfig;
use crate::outcome::{TeamOutlook, TeamSeason, TeamSituation};
use crate::types::Year;
use rand::Rng;

/// How a season looked from the owner's box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecurityVerdict {
    pub expected_win_pct: f32,
    pub actual_win_pct: f32,
    pub met_expectations: bool,
    pub fire_chance: f32,
}

pub struct JobSecurityModel<'a> {
    config: &'a JobSecurityConfig,
}

impl<'a> JobSecurityModel<'a> {
    pub fn new(config: &'a JobSecurityConfig) -> Self {
        Self { config }
    }

    pub fn expectation(&self, outlook: TeamOutlook) -> f32 {
        match outlook {
            TeamOutlook::Contender => self.config.contender_expectation,
            TeamOutlook::PlayoffHopeful => self.config.playoff_expectation,
            TeamOutlook::Rebuilding => self.config.rebuilding_expectation,
        }
    }

    pub fn evaluate(
        &self,
        profile: &CareerProfile,
        year: Year,
        season: &TeamSeason,
        situation: &TeamSituation,
    ) -> SecurityVerdict {
        let expected = self.expectation(situation.outlook);
        let actual = season.record.win_pct();
        // a title or a deep run always satisfies the owner
        let met = actual >= expected || season.won_championship || season.playoff.depth() >= 2;
        let shortfall = (expected - actual).max(0.0);

        let patience = situation.owner_patience.min(100) as f32;
        let mut chance = shortfall * self.config.shortfall_scale * (1.0 - patience / 200.0);
        if profile.years_in_role() == 0 {
            chance *= self.config.first_season_grace;
        }
        if self.missed_previous(profile, year, expected) {
            chance *= self.config.repeat_miss_multiplier;
        }
        if !profile.role().is_top_tier() {
            chance *= self.config.junior_pressure;
        }
        if met {
            chance = 0.0;
        }
        SecurityVerdict {
            expected_win_pct: expected,
            actual_win_pct: actual,
            met_expectations: met,
            fire_chance: chance.clamp(0.0, self.config.max_fire_chance),
        }
    }

    /// Bernoulli draw on the verdict's fire chance.
    pub fn decide(&self, verdict: &SecurityVerdict, rng: &mut impl Rng) -> bool {
        verdict.fire_chance > 0.0 && rng.gen::<f32>() < verdict.fire_chance
    }

    /// Renewal for someone in the last year of a deal.
    pub fn should_extend(&self, profile: &CareerProfile, verdict: &SecurityVerdict) -> bool {
        verdict.met_expectations
            && profile.reputation.for_track(profile.track()) >= self.config.extension_reputation
    }

    fn missed_previous(&self, profile: &CareerProfile, year: Year, expected: f32) -> bool {
        profile
            .history()
            .entries()
            .iter()
            .rev()
            .find(|e| e.year + 1 == year)
            .and_then(|e| e.record)
            .is_some_and(|r| r.win_pct() < expected)
    }
}
