// 구인 시장 데이터 타입
use crate::career::Role;
use crate::config::MarketConfig;
use crate::contract::{Buyout, CoachContract, Incentive, IncentiveType};
use crate::error::{CareerError, Result};
use crate::outcome::{TeamOutlook, TeamSituation};
use crate::types::{ApplicationId, OfferId, OpeningId, ProfileId, TeamId, Year};
use serde::{Deserialize, Serialize};

/// What a team asks of candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    /// Years in the opening's track.
    pub min_experience: u16,
    pub preferred_reputation: f32,
    pub requires_playoff_experience: bool,
    pub requires_championship: bool,
}

impl JobRequirements {
    /// Default asks for a role, tightened for contenders' top jobs.
    pub fn for_role(role: Role, outlook: TeamOutlook) -> Self {
        let tier = role.tier().unwrap_or(1);
        let (min_experience, preferred_reputation) = match tier {
            1 => (0, 30.0),
            2 => (2, 45.0),
            3 => (5, 55.0),
            _ => (8, 65.0),
        };
        let contender_top_job = outlook == TeamOutlook::Contender && role.is_top_tier();
        Self {
            min_experience,
            preferred_reputation,
            requires_playoff_experience: contender_top_job,
            requires_championship: false,
        }
    }
}

/// Contract terms attached to an opening or offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferedTerms {
    pub years: u8,
    pub annual_salary: u64,
    pub guaranteed_years: u8,
    pub buyout_percentage: f32,
    pub incentives: Vec<Incentive>,
}

impl OfferedTerms {
    /// Generated terms scaled by tier and the team's finances.
    pub fn for_role(role: Role, situation: &TeamSituation, config: &MarketConfig) -> Self {
        let tier = role.tier().unwrap_or(1);
        let annual_salary =
            (config.salary_for_tier(tier) as f64 * situation.salary_factor() as f64).round() as u64;
        let years = config.years_for_tier(tier);
        let mut incentives = vec![Incentive::new(
            IncentiveType::PlayoffAppearance,
            0,
            annual_salary / 20,
        )];
        if role.is_top_tier() {
            incentives.push(Incentive::win_total(10, annual_salary / 10));
            incentives.push(Incentive::new(IncentiveType::Championship, 0, annual_salary / 4));
        }
        Self {
            years,
            annual_salary,
            guaranteed_years: years.div_ceil(2),
            buyout_percentage: config.buyout_percentage,
            incentives,
        }
    }

    pub fn to_contract(&self) -> CoachContract {
        let mut contract = CoachContract::new(
            self.years,
            self.annual_salary,
            Buyout::Percentage(self.buyout_percentage),
        )
        .with_guarantee(self.guaranteed_years);
        contract.incentives = self.incentives.clone();
        contract
    }
}

/// Outside candidate generated for an opening. Not tracked unless hired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiCandidate {
    pub name: String,
    pub age: u8,
    pub reputation: f32,
    pub experience_years: u16,
    pub skill_rating: f32,
    pub has_playoff_experience: bool,
    pub has_championship: bool,
    pub fit_score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilledBy {
    Profile(ProfileId),
    /// Generated outside hire, tracked from then on under this id.
    External(ProfileId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OpeningStatus {
    Open,
    Filled { by: FilledBy, year: Year },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOpening {
    pub id: OpeningId,
    pub team: TeamId,
    pub role: Role,
    pub requirements: JobRequirements,
    pub terms: OfferedTerms,
    pub ai_candidates: Vec<AiCandidate>,
    pub status: OpeningStatus,
    pub opened_year: Year,
    pub seasons_open: u8,
}

impl JobOpening {
    pub fn is_open(&self) -> bool {
        self.status == OpeningStatus::Open
    }

    /// Best generated candidate, earliest listed on ties.
    pub fn best_ai_candidate(&self) -> Option<&AiCandidate> {
        self.ai_candidates.iter().fold(None, |best: Option<&AiCandidate>, c| match best {
            Some(b) if b.fit_score >= c.fit_score => Some(b),
            _ => Some(c),
        })
    }

    pub fn best_ai_fit(&self) -> f32 {
        self.best_ai_candidate().map(|c| c.fit_score).unwrap_or(0.0)
    }
}

/// Application pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
    Interviewing,
    Offered,
    Accepted,
    Declined,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Accepted
                | ApplicationStatus::Declined
                | ApplicationStatus::Rejected
                | ApplicationStatus::Withdrawn
        )
    }

    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (self, next),
            (Pending, Interviewing)
                | (Pending, Rejected)
                | (Pending, Withdrawn)
                | (Interviewing, Offered)
                | (Interviewing, Rejected)
                | (Interviewing, Withdrawn)
                | (Offered, Accepted)
                | (Offered, Declined)
                | (Offered, Rejected)
                | (Offered, Withdrawn)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: ApplicationId,
    pub profile: ProfileId,
    pub opening: OpeningId,
    pub status: ApplicationStatus,
    pub submitted_year: Year,
    pub fit_score: f32,
}

impl JobApplication {
    pub(crate) fn transition(&mut self, next: ApplicationStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(CareerError::InvalidApplicationState {
                id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferStatus {
    Open,
    Accepted,
    Declined,
    Expired,
}

/// Approach to an employed person outside the application pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsolicitedOffer {
    pub id: OfferId,
    pub profile: ProfileId,
    pub opening: OpeningId,
    pub team: TeamId,
    pub role: Role,
    pub terms: OfferedTerms,
    pub made_year: Year,
    /// Last year the offer can be accepted.
    pub expires_year: Year,
    pub status: OfferStatus,
}

impl UnsolicitedOffer {
    pub fn is_live(&self, year: Year) -> bool {
        self.status == OfferStatus::Open && year <= self.expires_year
    }
}

/// Counts for the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub open_positions: usize,
    pub open_head_coach: usize,
    pub open_general_manager: usize,
    pub open_coaching: usize,
    pub open_front_office: usize,
    pub pending_applications: usize,
    pub open_offers: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_state_machine() {
        use ApplicationStatus::*;
        assert!(Pending.can_transition_to(Interviewing));
        assert!(Interviewing.can_transition_to(Offered));
        assert!(Offered.can_transition_to(Accepted));
        assert!(!Pending.can_transition_to(Offered));
        assert!(!Accepted.can_transition_to(Withdrawn));
        assert!(!Rejected.can_transition_to(Pending));
        for terminal in [Accepted, Declined, Rejected, Withdrawn] {
            assert!(terminal.is_terminal());
        }
    }

    #[test]
    fn test_invalid_application_move_is_rejected() {
        let mut app = JobApplication {
            id: ApplicationId(1),
            profile: ProfileId(1),
            opening: OpeningId(1),
            status: ApplicationStatus::Pending,
            submitted_year: 2030,
            fit_score: 50.0,
        };
        let err = app.transition(ApplicationStatus::Accepted).unwrap_err();
        assert!(matches!(err, CareerError::InvalidApplicationState { .. }));
        assert_eq!(app.status, ApplicationStatus::Pending);
    }

    #[test]
    fn test_terms_scale_with_tier_and_finances() {
        let cfg = MarketConfig::default();
        let rich = TeamSituation { financial_health: 100, ..TeamSituation::default() };
        let poor = TeamSituation { financial_health: 0, ..TeamSituation::default() };
        let hc_rich = OfferedTerms::for_role(Role::HeadCoach, &rich, &cfg);
        let hc_poor = OfferedTerms::for_role(Role::HeadCoach, &poor, &cfg);
        let scout = OfferedTerms::for_role(Role::Scout, &rich, &cfg);
        assert!(hc_rich.annual_salary > hc_poor.annual_salary);
        assert!(hc_poor.annual_salary > scout.annual_salary);
        assert_eq!(hc_rich.incentives.len(), 3);
        let contract = hc_rich.to_contract();
        assert!(contract.validate().is_ok());
        assert_eq!(contract.total_years, 4);
        assert_eq!(contract.guaranteed_years, 2);
    }

    #[test]
    fn test_contender_top_job_requires_playoffs() {
        assert!(JobRequirements::for_role(Role::HeadCoach, TeamOutlook::Contender).requires_playoff_experience);
        assert!(!JobRequirements::for_role(Role::HeadCoach, TeamOutlook::Rebuilding).requires_playoff_experience);
        assert!(!JobRequirements::for_role(Role::Coordinator, TeamOutlook::Contender).requires_playoff_experience);
    }

    #[test]
    fn test_offer_liveness() {
        let offer = UnsolicitedOffer {
            id: OfferId(1),
            profile: ProfileId(1),
            opening: OpeningId(1),
            team: TeamId(1),
            role: Role::HeadCoach,
            terms: OfferedTerms::for_role(Role::HeadCoach, &TeamSituation::default(), &MarketConfig::default()),
            made_year: 2030,
            expires_year: 2031,
            status: OfferStatus::Open,
        };
        assert!(offer.is_live(2031));
        assert!(!offer.is_live(2032));
    }
}
