//! Damped reputation updates after each closed season.
//!
//! Track reputation closes part of the gap to a season target built from the
//! win-percentage trend and the postseason result; overall reputation then
//! closes half of the gap to the track value.

use crate::career::{CareerProfile, Track};
use crate::config::ReputationConfig;
use crate::outcome::TeamSeason;
use crate::types::Year;
use serde::{Deserialize, Serialize};

/// Before/after values for logging and the season report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReputationChange {
    pub track: Track,
    pub track_before: f32,
    pub track_after: f32,
    pub overall_before: f32,
    pub overall_after: f32,
}

impl ReputationChange {
    pub fn overall_delta(&self) -> f32 {
        self.overall_after - self.overall_before
    }
}

pub struct ReputationUpdater<'a> {
    config: &'a ReputationConfig,
}

impl<'a> ReputationUpdater<'a> {
    pub fn new(config: &'a ReputationConfig) -> Self {
        Self { config }
    }

    /// Target the season pulls the track reputation toward.
    pub fn season_target(&self, profile: &CareerProfile, year: Year, season: &TeamSeason) -> f32 {
        let trend = self.win_trend(profile, year, season);
        let postseason = if season.won_championship {
            self.config.championship_score
        } else if season.made_playoffs() {
            self.config.playoff_score
        } else {
            self.config.missed_score
        };
        (trend * self.config.trend_weight + postseason * self.config.postseason_weight)
            .clamp(0.0, 100.0)
    }

    /// Average win pct over the trend window: `season` plus the newest
    /// recorded seasons before `year`.
    fn win_trend(&self, profile: &CareerProfile, year: Year, season: &TeamSeason) -> f32 {
        let window = self.config.trend_window.max(1);
        let mut pcts = vec![season.record.win_pct()];
        pcts.extend(
            profile
                .history()
                .entries()
                .iter()
                .rev()
                .filter(|e| e.year < year)
                .filter_map(|e| e.record)
                .take(window - 1)
                .map(|r| r.win_pct()),
        );
        pcts.iter().sum::<f32>() / pcts.len() as f32 * 100.0
    }

    /// Apply one season. Profiles without an active track are left alone.
    pub fn apply_season(
        &self,
        profile: &mut CareerProfile,
        year: Year,
        season: &TeamSeason,
    ) -> Option<ReputationChange> {
        let track = profile.active_track()?;
        let target = self.season_target(profile, year, season);
        let track_before = profile.reputation.for_track(track);
        let overall_before = profile.reputation.overall;

        let track_after = track_before + (target - track_before) * self.config.track_pull_rate;
        profile.reputation.set_track(track, track_after);
        let track_after = profile.reputation.for_track(track);

        let overall_after = overall_before + (track_after - overall_before) * self.config.overall_damping;
        profile.reputation.set_overall(overall_after);

        Some(ReputationChange {
            track,
            track_before,
            track_after,
            overall_before,
            overall_after: profile.reputation.overall,
        })
    }

    /// Flat penalty on firing, on top of whatever the season did.
    pub fn apply_firing_penalty(&self, profile: &mut CareerProfile, track: Track) {
        let penalty = self.config.firing_penalty;
        let track_rep = profile.reputation.for_track(track) - penalty;
        profile.reputation.set_track(track, track_rep);
        profile.reputation.set_overall(profile.reputation.overall - penalty * self.config.overall_damping);
    }
}
