//! Season results and franchise snapshots supplied by outside collaborators.

use serde::{Deserialize, Serialize};

/// How far a team went in the playoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PlayoffResult {
    #[default]
    Missed,
    WildCard,
    Divisional,
    Conference,
    Championship,
}

impl PlayoffResult {
    /// Rounds reached; Missed is 0. Used for every "reached at least" check.
    pub fn depth(&self) -> u8 {
        match self {
            PlayoffResult::Missed => 0,
            PlayoffResult::WildCard => 1,
            PlayoffResult::Divisional => 2,
            PlayoffResult::Conference => 3,
            PlayoffResult::Championship => 4,
        }
    }

    pub fn made_playoffs(&self) -> bool {
        self.depth() > 0
    }

    pub fn reached(&self, round: PlayoffResult) -> bool {
        self.depth() >= round.depth()
    }

    /// Parse the collaborator's free-form playoff string. Unknown text is
    /// treated as a playoff appearance of unknown depth only if it mentions
    /// "playoff"; otherwise as missed.
    pub fn parse(text: &str) -> Self {
        let t = text.trim().to_ascii_lowercase();
        if t.is_empty() || t == "none" || t.contains("missed") || t.contains("did not") {
            return PlayoffResult::Missed;
        }
        if t.contains("wild") {
            PlayoffResult::WildCard
        } else if t.contains("divisional") || t.contains("division") {
            PlayoffResult::Divisional
        } else if t.contains("conference") || t.contains("semi") {
            PlayoffResult::Conference
        } else if t.contains("championship")
            || t.contains("final")
            || t.contains("super bowl")
            || t.contains("title")
        {
            PlayoffResult::Championship
        } else if t.contains("playoff") {
            PlayoffResult::WildCard
        } else {
            PlayoffResult::Missed
        }
    }
}

/// Win/loss/tie totals for one season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeasonRecord {
    pub wins: u8,
    pub losses: u8,
    pub ties: u8,
}

impl SeasonRecord {
    pub fn new(wins: u8, losses: u8, ties: u8) -> Self {
        Self { wins, losses, ties }
    }

    pub fn games(&self) -> u16 {
        self.wins as u16 + self.losses as u16 + self.ties as u16
    }

    /// Ties count as half a win. An empty record is 0.5.
    pub fn win_pct(&self) -> f32 {
        let games = self.games();
        if games == 0 {
            return 0.5;
        }
        (self.wins as f32 + self.ties as f32 * 0.5) / games as f32
    }
}

/// One team's finished season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamSeason {
    pub record: SeasonRecord,
    pub playoff: PlayoffResult,
    pub won_championship: bool,
}

impl TeamSeason {
    pub fn new(record: SeasonRecord, playoff_text: &str, won_championship: bool) -> Self {
        let mut playoff = PlayoffResult::parse(playoff_text);
        if won_championship {
            playoff = PlayoffResult::Championship;
        }
        Self { record, playoff, won_championship }
    }

    pub fn made_playoffs(&self) -> bool {
        self.playoff.made_playoffs() || self.won_championship
    }
}

/// Where the franchise sees itself; sets how many wins are expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TeamOutlook {
    Contender,
    #[default]
    PlayoffHopeful,
    Rebuilding,
}

/// Read-only franchise snapshot from roster/franchise management.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamSituation {
    pub outlook: TeamOutlook,
    /// Owner patience, 0-100. Higher means fewer firings.
    pub owner_patience: u8,
    /// Spending room, 0-100. Scales offered salaries.
    pub financial_health: u8,
}

impl Default for TeamSituation {
    fn default() -> Self {
        Self { outlook: TeamOutlook::PlayoffHopeful, owner_patience: 50, financial_health: 50 }
    }
}

impl TeamSituation {
    /// Salary multiplier in 0.8..=1.2 from financial health.
    pub fn salary_factor(&self) -> f32 {
        0.8 + self.financial_health.min(100) as f32 / 100.0 * 0.4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_playoff_strings() {
        assert_eq!(PlayoffResult::parse(""), PlayoffResult::Missed);
        assert_eq!(PlayoffResult::parse("Missed Playoffs"), PlayoffResult::Missed);
        assert_eq!(PlayoffResult::parse("Lost in Wild Card"), PlayoffResult::WildCard);
        assert_eq!(PlayoffResult::parse("Divisional Round"), PlayoffResult::Divisional);
        assert_eq!(PlayoffResult::parse("Conference Championship"), PlayoffResult::Conference);
        assert_eq!(PlayoffResult::parse("Won Super Bowl"), PlayoffResult::Championship);
        assert_eq!(PlayoffResult::parse("made playoffs"), PlayoffResult::WildCard);
    }

    #[test]
    fn test_reached_is_depth_based() {
        assert!(PlayoffResult::Conference.reached(PlayoffResult::Divisional));
        assert!(!PlayoffResult::WildCard.reached(PlayoffResult::Conference));
        assert!(PlayoffResult::Missed.reached(PlayoffResult::Missed));
    }

    #[test]
    fn test_win_pct_counts_ties_as_half() {
        assert!((SeasonRecord::new(8, 8, 1).win_pct() - 0.5).abs() < 1e-6);
        assert!((SeasonRecord::new(12, 5, 0).win_pct() - 12.0 / 17.0).abs() < 1e-6);
        assert_eq!(SeasonRecord::default().win_pct(), 0.5);
    }

    #[test]
    fn test_salary_factor_range() {
        let poor = TeamSituation { financial_health: 0, ..TeamSituation::default() };
        let rich = TeamSituation { financial_health: 100, ..TeamSituation::default() };
        assert!((poor.salary_factor() - 0.8).abs() < 1e-6);
        assert!((rich.salary_factor() - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_champion_flag_overrides_text() {
        let season = TeamSeason::new(SeasonRecord::new(13, 4, 0), "", true);
        assert_eq!(season.playoff, PlayoffResult::Championship);
        assert!(season.made_playoffs());
    }
}
