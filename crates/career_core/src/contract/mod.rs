//! Coach and executive contracts: incentives, buyouts and expiry.

mod incentive;

pub use incentive::{AwardKind, Incentive, IncentiveType};

use crate::error::{CareerError, Result};
use crate::outcome::{PlayoffResult, SeasonRecord, TeamSeason};
use serde::{Deserialize, Serialize};

/// How much an employer owes when ending the deal early.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Buyout {
    /// Amount fixed at signing.
    Fixed(u64),
    /// Fraction (0.0-1.0) of the remaining contract value.
    Percentage(f32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachContract {
    pub total_years: u8,
    /// Seasons already completed under this deal.
    pub current_year: u8,
    pub annual_salary: u64,
    pub total_value: u64,
    pub guaranteed_years: u8,
    pub guaranteed_money: u64,
    pub has_team_option: bool,
    pub has_player_option: bool,
    pub incentives: Vec<Incentive>,
    pub buyout: Buyout,
}

impl CoachContract {
    pub fn new(total_years: u8, annual_salary: u64, buyout: Buyout) -> Self {
        Self {
            total_years,
            current_year: 0,
            annual_salary,
            total_value: annual_salary * total_years as u64,
            guaranteed_years: total_years,
            guaranteed_money: annual_salary * total_years as u64,
            has_team_option: false,
            has_player_option: false,
            incentives: Vec::new(),
            buyout,
        }
    }

    pub fn with_incentive(mut self, incentive: Incentive) -> Self {
        self.incentives.push(incentive);
        self
    }

    pub fn with_guarantee(mut self, years: u8) -> Self {
        self.guaranteed_years = years.min(self.total_years);
        self.guaranteed_money = self.annual_salary * self.guaranteed_years as u64;
        self
    }

    /// Structural checks done at signing time.
    pub fn validate(&self) -> Result<()> {
        if self.total_years == 0 {
            return Err(CareerError::MalformedContract("contract must run at least one year".into()));
        }
        if self.current_year > self.total_years {
            return Err(CareerError::MalformedContract(format!(
                "elapsed years {} exceed total {}",
                self.current_year, self.total_years
            )));
        }
        if self.guaranteed_years > self.total_years || self.guaranteed_money > self.total_value {
            return Err(CareerError::MalformedContract("guarantee exceeds contract".into()));
        }
        if let Buyout::Percentage(pct) = self.buyout {
            if !(0.0..=1.0).contains(&pct) || pct.is_nan() {
                return Err(CareerError::MalformedContract(format!(
                    "buyout percentage {} outside 0..=1",
                    pct
                )));
            }
        }
        Ok(())
    }

    pub fn years_remaining(&self) -> u8 {
        self.total_years.saturating_sub(self.current_year)
    }

    pub fn remaining_value(&self) -> u64 {
        self.annual_salary * self.years_remaining() as u64
    }

    /// Explicit amount if one was signed, otherwise a share of what is left.
    pub fn calculate_buyout(&self) -> u64 {
        match self.buyout {
            Buyout::Fixed(amount) => amount,
            Buyout::Percentage(pct) => {
                (self.remaining_value() as f64 * pct.clamp(0.0, 1.0) as f64).round() as u64
            }
        }
    }

    pub fn is_expiring(&self) -> bool {
        self.years_remaining() <= 1
    }

    pub fn is_expired(&self) -> bool {
        self.years_remaining() == 0
    }

    /// Count one completed season. Returns true when the deal has run out.
    pub fn advance_year(&mut self) -> bool {
        if self.current_year < self.total_years {
            self.current_year += 1;
        }
        if self.current_year > self.guaranteed_years {
            self.guaranteed_money = 0;
        }
        self.is_expired()
    }

    /// Sum of payouts whose predicate the season satisfies, plus award
    /// incentives already flagged. Does not mutate.
    pub fn calculate_earned_incentives(
        &self,
        season_wins: u8,
        made_playoffs: bool,
        playoff_result: PlayoffResult,
        won_championship: bool,
    ) -> u64 {
        let season = Self::season_view(season_wins, made_playoffs, playoff_result, won_championship);
        self.incentives.iter().filter(|i| i.is_met_by(&season)).map(|i| i.payout).sum()
    }

    /// Mark every satisfied incentive achieved and return the payout owed for
    /// incentives that were not already paid out.
    pub fn settle_incentives(&mut self, season: &TeamSeason) -> u64 {
        let mut paid = 0;
        for incentive in &mut self.incentives {
            if matches!(incentive.incentive_type, IncentiveType::Award(_)) {
                continue;
            }
            if !incentive.achieved && incentive.is_met_by(season) {
                incentive.achieved = true;
                paid += incentive.payout;
            }
        }
        paid
    }

    /// External award signal. Returns the payout released, if any.
    pub fn record_award(&mut self, award: AwardKind) -> u64 {
        let mut paid = 0;
        for incentive in &mut self.incentives {
            if incentive.incentive_type == IncentiveType::Award(award) && !incentive.achieved {
                incentive.achieved = true;
                paid += incentive.payout;
            }
        }
        paid
    }

    fn season_view(
        wins: u8,
        made_playoffs: bool,
        playoff_result: PlayoffResult,
        won_championship: bool,
    ) -> TeamSeason {
        let playoff = if won_championship {
            PlayoffResult::Championship
        } else if made_playoffs && !playoff_result.made_playoffs() {
            PlayoffResult::WildCard
        } else {
            playoff_result
        };
        TeamSeason {
            record: SeasonRecord { wins, losses: 0, ties: 0 },
            playoff,
            won_championship,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_contract() -> CoachContract {
        CoachContract::new(5, 4_000_000, Buyout::Percentage(0.6))
            .with_incentive(Incentive::win_total(10, 250_000))
            .with_incentive(Incentive::new(IncentiveType::PlayoffAppearance, 0, 300_000))
            .with_incentive(Incentive::new(
                IncentiveType::ReachRound(PlayoffResult::Conference),
                0,
                500_000,
            ))
            .with_incentive(Incentive::new(IncentiveType::Championship, 0, 1_000_000))
            .with_incentive(Incentive::new(
                IncentiveType::Award(AwardKind::CoachOfTheYear),
                0,
                200_000,
            ))
    }

    #[test]
    fn test_incentives_by_predicate() {
        let c = sample_contract();
        assert_eq!(c.calculate_earned_incentives(9, false, PlayoffResult::Missed, false), 0);
        assert_eq!(c.calculate_earned_incentives(10, false, PlayoffResult::Missed, false), 250_000);
        assert_eq!(
            c.calculate_earned_incentives(11, true, PlayoffResult::Divisional, false),
            550_000
        );
        assert_eq!(
            c.calculate_earned_incentives(13, true, PlayoffResult::Championship, true),
            2_050_000
        );
    }

    #[test]
    fn test_award_incentive_only_counts_when_flagged() {
        let mut c = sample_contract();
        let before = c.calculate_earned_incentives(0, false, PlayoffResult::Missed, false);
        assert_eq!(before, 0);
        assert_eq!(c.record_award(AwardKind::CoachOfTheYear), 200_000);
        assert_eq!(c.record_award(AwardKind::CoachOfTheYear), 0);
        assert_eq!(c.calculate_earned_incentives(0, false, PlayoffResult::Missed, false), 200_000);
    }

    #[test]
    fn test_settle_pays_once() {
        let mut c = sample_contract();
        let season = TeamSeason::new(SeasonRecord::new(12, 5, 0), "wild card", false);
        assert_eq!(c.settle_incentives(&season), 550_000);
        assert_eq!(c.settle_incentives(&season), 0);
    }

    #[test]
    fn test_buyout_fixed_vs_percentage() {
        let mut c = CoachContract::new(4, 1_000_000, Buyout::Percentage(0.5));
        assert_eq!(c.calculate_buyout(), 2_000_000);
        c.advance_year();
        assert_eq!(c.calculate_buyout(), 1_500_000);

        let fixed = CoachContract::new(4, 1_000_000, Buyout::Fixed(750_000));
        assert_eq!(fixed.calculate_buyout(), 750_000);
    }

    #[test]
    fn test_expiry_tracking() {
        let mut c = CoachContract::new(2, 500_000, Buyout::Percentage(1.0));
        assert!(!c.is_expiring());
        assert!(!c.advance_year());
        assert!(c.is_expiring());
        assert!(c.advance_year());
        assert!(c.is_expired());
        assert_eq!(c.calculate_buyout(), 0);
        // advancing past the end never underflows
        assert!(c.advance_year());
        assert_eq!(c.years_remaining(), 0);
    }

    #[test]
    fn test_validate_rejects_bad_terms() {
        assert!(CoachContract::new(0, 1, Buyout::Fixed(0)).validate().is_err());
        assert!(CoachContract::new(3, 1, Buyout::Percentage(1.5)).validate().is_err());
        let mut c = CoachContract::new(3, 1, Buyout::Fixed(0));
        c.current_year = 4;
        assert!(matches!(c.validate(), Err(CareerError::MalformedContract(_))));
        assert!(sample_contract().validate().is_ok());
    }

    proptest! {
        #[test]
        fn prop_buyout_non_increasing_over_time(
            years in 1u8..10,
            salary in 0u64..20_000_000,
            pct in 0.0f32..=1.0f32,
        ) {
            let mut c = CoachContract::new(years, salary, Buyout::Percentage(pct));
            let mut last = c.calculate_buyout();
            for _ in 0..years {
                c.advance_year();
                let now = c.calculate_buyout();
                prop_assert!(now <= last);
                last = now;
            }
        }
    }
}
