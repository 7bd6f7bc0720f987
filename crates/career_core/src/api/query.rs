//! Read-only views for UI display.

use crate::career::{CareerProfile, Reputation, Role, StyleProfile, Track};
use crate::contract::CoachContract;
use crate::market::{ApplicationStatus, JobMarket, JobOpening, OfferStatus};
use crate::types::{ApplicationId, OfferId, OpeningId, ProfileId, TeamId, Year};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractView {
    pub years_remaining: u8,
    pub annual_salary: u64,
    pub total_value: u64,
    pub guaranteed_money: u64,
    pub buyout_now: u64,
    pub is_expiring: bool,
    pub incentives: usize,
}

impl From<&CoachContract> for ContractView {
    fn from(c: &CoachContract) -> Self {
        Self {
            years_remaining: c.years_remaining(),
            annual_salary: c.annual_salary,
            total_value: c.total_value,
            guaranteed_money: c.guaranteed_money,
            buyout_now: c.calculate_buyout(),
            is_expiring: c.is_expiring(),
            incentives: c.incentives.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationView {
    pub id: ApplicationId,
    pub opening: OpeningId,
    pub team: TeamId,
    pub role: Role,
    pub status: ApplicationStatus,
    pub fit_score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferView {
    pub id: OfferId,
    pub team: TeamId,
    pub role: Role,
    pub annual_salary: u64,
    pub years: u8,
    pub expires_year: Year,
}

/// Everything the UI shows on a staff card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileView {
    pub id: ProfileId,
    pub name: String,
    pub birth_year: Year,
    pub is_user: bool,
    pub track: Track,
    pub role: Role,
    pub role_name: String,
    pub team: Option<TeamId>,
    pub years_in_role: u8,
    pub years_unemployed: u8,
    pub coaching_years: u16,
    pub front_office_years: u16,
    pub reputation: Reputation,
    pub skill_rating: f32,
    pub style: StyleProfile,
    pub contract: Option<ContractView>,
    pub seasons: usize,
    pub playoff_appearances: usize,
    pub championships: usize,
    pub times_fired: u16,
    pub times_resigned: u16,
    pub track_switches: u16,
    pub career_earnings: u64,
    pub retired_year: Option<Year>,
    pub applications: Vec<ApplicationView>,
    pub open_offers: Vec<OfferView>,
}

impl ProfileView {
    pub fn build(profile: &CareerProfile, market: &JobMarket) -> Self {
        let applications = profile
            .pending_applications()
            .iter()
            .filter_map(|id| market.application(*id).ok())
            .filter_map(|app| {
                let opening = market.opening(app.opening).ok()?;
                Some(ApplicationView {
                    id: app.id,
                    opening: app.opening,
                    team: opening.team,
                    role: opening.role,
                    status: app.status,
                    fit_score: app.fit_score,
                })
            })
            .collect();
        let open_offers = market
            .offers_for(profile.id)
            .into_iter()
            .filter(|o| o.status == OfferStatus::Open)
            .map(|o| OfferView {
                id: o.id,
                team: o.team,
                role: o.role,
                annual_salary: o.terms.annual_salary,
                years: o.terms.years,
                expires_year: o.expires_year,
            })
            .collect();
        let history = profile.history();
        Self {
            id: profile.id,
            name: profile.name.clone(),
            birth_year: profile.birth_year,
            is_user: profile.is_user,
            track: profile.track(),
            role: profile.role(),
            role_name: profile.role().display_name().to_string(),
            team: profile.team(),
            years_in_role: profile.years_in_role(),
            years_unemployed: profile.years_unemployed(),
            coaching_years: profile.coaching_years(),
            front_office_years: profile.front_office_years(),
            reputation: profile.reputation,
            skill_rating: profile.active_skill_rating(),
            style: profile.style,
            contract: profile.contract().map(ContractView::from),
            seasons: history.entries().iter().filter(|e| e.record.is_some()).count(),
            playoff_appearances: history.playoff_appearances(),
            championships: history.championships(),
            times_fired: profile.times_fired(),
            times_resigned: profile.times_resigned(),
            track_switches: profile.track_switches(),
            career_earnings: profile.career_earnings(),
            retired_year: profile.retired_year(),
            applications,
            open_offers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningView {
    pub id: OpeningId,
    pub team: TeamId,
    pub role: Role,
    pub annual_salary: u64,
    pub years: u8,
    pub min_experience: u16,
    pub preferred_reputation: f32,
    pub requires_playoff_experience: bool,
    pub seasons_open: u8,
}

impl From<&JobOpening> for OpeningView {
    fn from(o: &JobOpening) -> Self {
        Self {
            id: o.id,
            team: o.team,
            role: o.role,
            annual_salary: o.terms.annual_salary,
            years: o.terms.years,
            min_experience: o.requirements.min_experience,
            preferred_reputation: o.requirements.preferred_reputation,
            requires_playoff_experience: o.requirements.requires_playoff_experience,
            seasons_open: o.seasons_open,
        }
    }
}
