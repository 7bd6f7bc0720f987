use super::role::{Role, Track};
use crate::outcome::{PlayoffResult, SeasonRecord, TeamSeason};
use crate::types::{TeamId, Year};
use serde::{Deserialize, Serialize};

/// Why someone left a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepartureReason {
    Fired(String),
    Resigned(String),
    ContractExpired,
    Promoted,
    TookNewJob,
    Retired(String),
}

/// One season (or partial season) in one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub year: Year,
    pub team: TeamId,
    pub role: Role,
    pub track: Track,
    pub record: Option<SeasonRecord>,
    pub playoff: PlayoffResult,
    pub won_championship: bool,
    pub departure: Option<DepartureReason>,
}

impl HistoryEntry {
    pub fn open(year: Year, team: TeamId, role: Role) -> Self {
        Self {
            year,
            team,
            role,
            track: role.track(),
            record: None,
            playoff: PlayoffResult::Missed,
            won_championship: false,
            departure: None,
        }
    }

    pub fn made_playoffs(&self) -> bool {
        self.playoff.made_playoffs() || self.won_championship
    }

    pub fn is_closed(&self) -> bool {
        self.record.is_some() || self.departure.is_some()
    }
}

/// Append-only career log. Only the newest entry may be touched, and only
/// to record its season result or its departure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CareerHistory {
    entries: Vec<HistoryEntry>,
}

impl CareerHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub(crate) fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Write the season result into the newest entry if it is still open for
    /// that year. Returns false when there is nothing to close.
    pub(crate) fn close_season(&mut self, year: Year, season: &TeamSeason) -> bool {
        match self.entries.last_mut() {
            Some(entry) if entry.year == year && entry.record.is_none() => {
                entry.record = Some(season.record);
                entry.playoff = season.playoff;
                entry.won_championship = season.won_championship;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn mark_departure(&mut self, reason: DepartureReason) -> bool {
        match self.entries.last_mut() {
            Some(entry) if entry.departure.is_none() => {
                entry.departure = Some(reason);
                true
            }
            _ => false,
        }
    }

    /// Highest tier ever held in a track.
    pub fn highest_tier(&self, track: Track) -> Option<u8> {
        self.entries.iter().filter(|e| e.track == track).filter_map(|e| e.role.tier()).max()
    }

    pub fn has_held(&self, role: Role) -> bool {
        self.entries.iter().any(|e| e.role == role)
    }

    /// Entries with a recorded season from `since` onward.
    pub fn seasons_since(&self, since: Year) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().filter(move |e| e.year >= since && e.record.is_some())
    }

    pub fn playoff_appearances(&self) -> usize {
        self.entries.iter().filter(|e| e.made_playoffs()).count()
    }

    pub fn championships(&self) -> usize {
        self.entries.iter().filter(|e| e.won_championship).count()
    }

    /// Win percentages of the most recent `n` recorded seasons, newest first.
    pub fn recent_win_pcts(&self, n: usize) -> Vec<f32> {
        self.entries.iter().rev().filter_map(|e| e.record).take(n).map(|r| r.win_pct()).collect()
    }
}
