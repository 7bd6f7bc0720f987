use crate::contract::AwardKind;
use crate::outcome::{TeamSeason, TeamSituation};
use crate::types::{ProfileId, TeamId, Year};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the collaborators hand over for one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonInput {
    pub year: Year,
    pub seed: u64,
    pub team_seasons: BTreeMap<TeamId, TeamSeason>,
    #[serde(default)]
    pub team_situations: BTreeMap<TeamId, TeamSituation>,
    #[serde(default)]
    pub awards: Vec<(ProfileId, AwardKind)>,
}

impl SeasonInput {
    pub fn new(year: Year, seed: u64) -> Self {
        Self { year, seed, ..Self::default() }
    }

    pub fn with_team_season(mut self, team: TeamId, season: TeamSeason) -> Self {
        self.team_seasons.insert(team, season);
        self
    }

    pub fn with_situation(mut self, team: TeamId, situation: TeamSituation) -> Self {
        self.team_situations.insert(team, situation);
        self
    }

    pub fn with_award(mut self, profile: ProfileId, award: AwardKind) -> Self {
        self.awards.push((profile, award));
        self
    }

    pub fn season_for(&self, team: TeamId) -> Option<&TeamSeason> {
        self.team_seasons.get(&team)
    }

    /// Teams without a snapshot are treated as average.
    pub fn situation_for(&self, team: TeamId) -> TeamSituation {
        self.team_situations.get(&team).copied().unwrap_or_default()
    }
}
