use super::candidates::{generate_candidates, into_profile};
use super::fit::{fit_score, profile_fit, CandidateFacts};
use super::types::*;
use crate::career::{CareerProfile, PersonnelRegistry, Role, Track};
use crate::config::MarketConfig;
use crate::error::{CareerError, Result};
use crate::outcome::TeamSituation;
use crate::types::{ApplicationId, OfferId, OpeningId, ProfileId, TeamId, Year};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Job market state for save/load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMarketState {
    pub openings: BTreeMap<OpeningId, JobOpening>,
    pub applications: BTreeMap<ApplicationId, JobApplication>,
    pub offers: BTreeMap<OfferId, UnsolicitedOffer>,
    pub next_opening: OpeningId,
    pub next_application: ApplicationId,
    pub next_offer: OfferId,
}

impl Default for JobMarketState {
    fn default() -> Self {
        Self {
            openings: BTreeMap::new(),
            applications: BTreeMap::new(),
            offers: BTreeMap::new(),
            next_opening: OpeningId(1),
            next_application: ApplicationId(1),
            next_offer: OfferId(1),
        }
    }
}

/// Result of a vacancy: internal promotions first, then the opening for
/// whatever role is left empty at the bottom of the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct VacancyOutcome {
    pub promotions: Vec<(ProfileId, Role)>,
    pub opening: OpeningId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AutoApplyOutcome {
    Hired { opening: OpeningId, team: TeamId, role: Role },
    Rejected { opening: OpeningId },
}

/// Open positions, applications and unsolicited offers.
///
/// Every iteration is in ascending id order, which is also the tie-break for
/// equal fit scores.
#[derive(Debug)]
pub struct JobMarket {
    state: JobMarketState,
    config: MarketConfig,
}

impl Default for JobMarket {
    fn default() -> Self {
        Self::new(MarketConfig::default())
    }
}

impl JobMarket {
    pub fn new(config: MarketConfig) -> Self {
        Self { state: JobMarketState::default(), config }
    }

    /// Load from save data
    pub fn from_state(state: JobMarketState, config: MarketConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &JobMarketState {
        &self.state
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn opening(&self, id: OpeningId) -> Result<&JobOpening> {
        self.state.openings.get(&id).ok_or(CareerError::UnknownOpening(id))
    }

    pub fn application(&self, id: ApplicationId) -> Result<&JobApplication> {
        self.state.applications.get(&id).ok_or(CareerError::UnknownApplication(id))
    }

    pub fn offer(&self, id: OfferId) -> Result<&UnsolicitedOffer> {
        self.state.offers.get(&id).ok_or(CareerError::UnknownOffer(id))
    }

    pub fn open_openings(&self) -> impl Iterator<Item = &JobOpening> {
        self.state.openings.values().filter(|o| o.is_open())
    }

    pub fn find_open(&self, team: TeamId, role: Role) -> Option<OpeningId> {
        self.open_openings().find(|o| o.team == team && o.role == role).map(|o| o.id)
    }

    pub fn applications_for(&self, profile: ProfileId) -> Vec<&JobApplication> {
        self.state.applications.values().filter(|a| a.profile == profile).collect()
    }

    pub fn offers_for(&self, profile: ProfileId) -> Vec<&UnsolicitedOffer> {
        self.state.offers.values().filter(|o| o.profile == profile).collect()
    }

    /// Applications still waiting on the team, ascending id.
    pub fn undecided_application_ids(&self) -> Vec<ApplicationId> {
        self.state
            .applications
            .values()
            .filter(|a| matches!(a.status, ApplicationStatus::Pending | ApplicationStatus::Interviewing))
            .map(|a| a.id)
            .collect()
    }

    pub fn summary(&self) -> MarketSummary {
        let mut summary = MarketSummary::default();
        for opening in self.open_openings() {
            summary.open_positions += 1;
            match opening.role {
                Role::HeadCoach => summary.open_head_coach += 1,
                Role::GeneralManager => summary.open_general_manager += 1,
                _ => {}
            }
            match opening.role.track() {
                Track::Coaching => summary.open_coaching += 1,
                _ => summary.open_front_office += 1,
            }
        }
        summary.pending_applications =
            self.state.applications.values().filter(|a| a.is_active()).count();
        summary.open_offers =
            self.state.offers.values().filter(|o| o.status == OfferStatus::Open).count();
        summary
    }

    // ------------------------------------------------------------------
    // Openings
    // ------------------------------------------------------------------

    /// List `role` at `team`. An opening for the same pair that is still open
    /// is returned instead of a duplicate.
    pub fn open_position(
        &mut self,
        team: TeamId,
        role: Role,
        situation: &TeamSituation,
        year: Year,
        rng: &mut impl Rng,
    ) -> Result<OpeningId> {
        if !role.is_employed() {
            return Err(CareerError::transition(Role::Unemployed, role, "openings need a staff role"));
        }
        if let Some(id) = self.find_open(team, role) {
            return Ok(id);
        }
        let requirements = JobRequirements::for_role(role, situation.outlook);
        let terms = OfferedTerms::for_role(role, situation, &self.config);
        let ai_candidates = generate_candidates(
            role,
            &requirements,
            &self.config.fit,
            self.config.ai_candidates_per_opening,
            rng,
        );
        let id = self.state.next_opening;
        self.state.next_opening = id.next();
        self.state.openings.insert(
            id,
            JobOpening {
                id,
                team,
                role,
                requirements,
                terms,
                ai_candidates,
                status: OpeningStatus::Open,
                opened_year: year,
                seasons_open: 0,
            },
        );
        debug!(opening = %id, %team, ?role, year, "opening listed");
        Ok(id)
    }

    /// Fill a vacated seat from inside first.
    ///
    /// While the next-lower role at the same team is held by a computer
    /// controlled profile whose fit clears the promotion threshold, that
    /// person moves up and the vacancy moves down. The last vacancy is listed.
    pub fn open_vacancy(
        &mut self,
        registry: &mut PersonnelRegistry,
        team: TeamId,
        role: Role,
        situation: &TeamSituation,
        year: Year,
        start_year: Year,
        rng: &mut impl Rng,
    ) -> Result<VacancyOutcome> {
        if let Some(opening) = self.find_open(team, role) {
            return Ok(VacancyOutcome { promotions: Vec::new(), opening });
        }
        let mut vacated = role;
        let mut promotions = Vec::new();
        while let Some(below) = vacated.next_down() {
            let Some(holder_id) = registry.holder_of(team, below) else {
                break;
            };
            let holder = registry.get(holder_id)?;
            if holder.is_user {
                break;
            }
            let requirements = JobRequirements::for_role(vacated, situation.outlook);
            let fit = fit_score(&CandidateFacts::from_profile(holder, vacated), &requirements, &self.config.fit);
            if fit < self.config.promotion_threshold {
                break;
            }
            let holder = registry.get_mut(holder_id)?;
            holder.promote(vacated, start_year)?;
            self.withdraw_all(holder);
            info!(profile = %holder_id, %team, role = ?vacated, fit, "internal promotion");
            promotions.push((holder_id, vacated));
            vacated = below;
        }
        let opening = self.open_position(team, vacated, situation, year, rng)?;
        Ok(VacancyOutcome { promotions, opening })
    }

    /// Count one more season for every unfilled opening.
    pub fn age_openings(&mut self) {
        for opening in self.state.openings.values_mut().filter(|o| o.is_open()) {
            opening.seasons_open = opening.seasons_open.saturating_add(1);
        }
    }

    /// Hire the best generated candidate into every opening that has been
    /// open for `max_open_seasons`. The hire becomes a tracked profile.
    pub fn fill_stale_openings(
        &mut self,
        registry: &mut PersonnelRegistry,
        start_year: Year,
        rng: &mut impl Rng,
    ) -> Result<Vec<(OpeningId, ProfileId)>> {
        let stale: Vec<OpeningId> = self
            .open_openings()
            .filter(|o| o.seasons_open >= self.config.max_open_seasons)
            .map(|o| o.id)
            .collect();
        let mut filled = Vec::new();
        for opening_id in stale {
            let opening = self.opening(opening_id)?;
            let Some(candidate) = opening.best_ai_candidate() else {
                continue;
            };
            let id = registry.allocate_id();
            let profile = into_profile(
                candidate,
                id,
                opening.team,
                opening.role,
                opening.terms.to_contract(),
                start_year,
                rng,
            )?;
            info!(opening = %opening_id, profile = %id, name = %profile.name, "outside hire");
            registry.insert(profile);
            self.fill(registry, opening_id, FilledBy::External(id), start_year)?;
            filled.push((opening_id, id));
        }
        Ok(filled)
    }

    fn fill(
        &mut self,
        registry: &mut PersonnelRegistry,
        opening_id: OpeningId,
        by: FilledBy,
        year: Year,
    ) -> Result<()> {
        let opening = self
            .state
            .openings
            .get_mut(&opening_id)
            .ok_or(CareerError::UnknownOpening(opening_id))?;
        opening.status = OpeningStatus::Filled { by, year };

        for app in self.state.applications.values_mut() {
            if app.opening == opening_id && app.is_active() {
                app.transition(ApplicationStatus::Rejected)?;
                if let Ok(profile) = registry.get_mut(app.profile) {
                    profile.remove_pending_application(app.id);
                }
            }
        }
        for offer in self.state.offers.values_mut() {
            if offer.opening == opening_id && offer.status == OfferStatus::Open {
                offer.status = OfferStatus::Expired;
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Applications
    // ------------------------------------------------------------------

    pub fn submit_application(
        &mut self,
        profile: &mut CareerProfile,
        opening_id: OpeningId,
        year: Year,
    ) -> Result<ApplicationId> {
        let opening = self.opening(opening_id)?;
        if !opening.is_open() {
            return Err(CareerError::OpeningClosed(opening_id));
        }
        if profile.is_retired() {
            return Err(CareerError::transition(Role::Retired, opening.role, "retired profiles cannot apply"));
        }
        if profile.team() == Some(opening.team) {
            return Err(CareerError::transition(profile.role(), opening.role, "already on this staff"));
        }
        let duplicate = self
            .state
            .applications
            .values()
            .any(|a| a.profile == profile.id && a.opening == opening_id);
        if duplicate {
            return Err(CareerError::DuplicateApplication { profile: profile.id, opening: opening_id });
        }
        profile.check_hire_eligibility(opening.role)?;

        let fit = profile_fit(profile, opening, &self.config.fit);
        let id = self.state.next_application;
        self.state.next_application = id.next();
        self.state.applications.insert(
            id,
            JobApplication {
                id,
                profile: profile.id,
                opening: opening_id,
                status: ApplicationStatus::Pending,
                submitted_year: year,
                fit_score: fit,
            },
        );
        profile.add_pending_application(id);
        debug!(application = %id, profile = %profile.id, opening = %opening_id, fit, "application submitted");
        Ok(id)
    }

    pub fn withdraw_application(&mut self, profile: &mut CareerProfile, id: ApplicationId) -> Result<()> {
        let app = self.state.applications.get_mut(&id).ok_or(CareerError::UnknownApplication(id))?;
        if app.profile != profile.id {
            return Err(CareerError::UnknownApplication(id));
        }
        app.transition(ApplicationStatus::Withdrawn)?;
        profile.remove_pending_application(id);
        Ok(())
    }

    /// Withdraw every live application of `profile`.
    pub fn withdraw_all(&mut self, profile: &mut CareerProfile) {
        for app in self.state.applications.values_mut() {
            if app.profile == profile.id && app.is_active() {
                app.status = ApplicationStatus::Withdrawn;
                profile.remove_pending_application(app.id);
            }
        }
    }

    /// Move an application one stage: Pending to Interviewing, then
    /// Interviewing to Offered or Rejected. An offer needs a fit at the
    /// threshold and no worse than the best generated candidate.
    pub fn advance_application(
        &mut self,
        profile: &mut CareerProfile,
        id: ApplicationId,
    ) -> Result<ApplicationStatus> {
        let app = self.application(id)?;
        if app.profile != profile.id {
            return Err(CareerError::UnknownApplication(id));
        }
        let opening = self.opening(app.opening)?;
        let next = match app.status {
            ApplicationStatus::Pending if opening.is_open() => ApplicationStatus::Interviewing,
            ApplicationStatus::Pending | ApplicationStatus::Interviewing if !opening.is_open() => {
                ApplicationStatus::Rejected
            }
            ApplicationStatus::Interviewing => {
                if app.fit_score >= self.config.offer_threshold && app.fit_score >= opening.best_ai_fit() {
                    ApplicationStatus::Offered
                } else {
                    ApplicationStatus::Rejected
                }
            }
            status => return Ok(status),
        };
        let app = self.state.applications.get_mut(&id).ok_or(CareerError::UnknownApplication(id))?;
        app.transition(next)?;
        if next.is_terminal() {
            profile.remove_pending_application(id);
        }
        debug!(application = %id, status = ?next, "application advanced");
        Ok(next)
    }

    /// Answer an Offered application. Accepting hires (or transfers) the
    /// profile, fills the opening and withdraws the profile's other
    /// applications.
    pub fn respond_to_offer(
        &mut self,
        registry: &mut PersonnelRegistry,
        id: ApplicationId,
        accept: bool,
        start_year: Year,
    ) -> Result<ApplicationStatus> {
        let app = self.application(id)?.clone();
        let next = if accept { ApplicationStatus::Accepted } else { ApplicationStatus::Declined };
        if app.status != ApplicationStatus::Offered {
            return Err(CareerError::InvalidApplicationState { id, from: app.status, to: next });
        }
        let opening = self.opening(app.opening)?.clone();

        if !accept {
            let profile = registry.get_mut(app.profile)?;
            self.set_application_status(id, next)?;
            profile.remove_pending_application(id);
            return Ok(next);
        }
        if !opening.is_open() {
            return Err(CareerError::OpeningClosed(opening.id));
        }

        let profile = registry.get_mut(app.profile)?;
        take_job(profile, &opening, start_year)?;
        self.set_application_status(id, next)?;
        profile.remove_pending_application(id);
        self.withdraw_all(profile);
        self.fill(registry, opening.id, FilledBy::Profile(app.profile), start_year)?;
        info!(profile = %app.profile, opening = %opening.id, team = %opening.team, role = ?opening.role, "offer accepted");
        Ok(next)
    }

    /// Full pipeline for a computer-controlled unemployed profile: apply to
    /// the best-fitting open opening, interview, and take the job if offered.
    pub fn auto_apply(
        &mut self,
        registry: &mut PersonnelRegistry,
        profile_id: ProfileId,
        year: Year,
        start_year: Year,
    ) -> Result<Option<AutoApplyOutcome>> {
        let profile = registry.get(profile_id)?;
        if profile.is_user || profile.is_employed() || profile.is_retired() {
            return Ok(None);
        }
        let Some(opening_id) = self.best_opening_for(profile) else {
            return Ok(None);
        };
        let profile = registry.get_mut(profile_id)?;
        let app_id = self.submit_application(profile, opening_id, year)?;
        self.advance_application(profile, app_id)?;
        let status = self.advance_application(profile, app_id)?;
        if status != ApplicationStatus::Offered {
            return Ok(Some(AutoApplyOutcome::Rejected { opening: opening_id }));
        }
        self.respond_to_offer(registry, app_id, true, start_year)?;
        let opening = self.opening(opening_id)?;
        Ok(Some(AutoApplyOutcome::Hired { opening: opening_id, team: opening.team, role: opening.role }))
    }

    /// Highest-fit open opening the profile may be hired into and has not
    /// applied to yet. Ties go to the lower opening id.
    pub fn best_opening_for(&self, profile: &CareerProfile) -> Option<OpeningId> {
        let mut best: Option<(OpeningId, f32)> = None;
        for opening in self.open_openings() {
            let applied = self
                .state
                .applications
                .values()
                .any(|a| a.profile == profile.id && a.opening == opening.id);
            // nobody goes straight back to the staff they just left
            let just_left = profile.history().latest().is_some_and(|e| e.team == opening.team);
            if applied || just_left || profile.check_hire_eligibility(opening.role).is_err() {
                continue;
            }
            let fit = profile_fit(profile, opening, &self.config.fit);
            if best.map_or(true, |(_, b)| fit > b) {
                best = Some((opening.id, fit));
            }
        }
        best.map(|(id, _)| id)
    }

    fn set_application_status(&mut self, id: ApplicationId, next: ApplicationStatus) -> Result<()> {
        self.state
            .applications
            .get_mut(&id)
            .ok_or(CareerError::UnknownApplication(id))?
            .transition(next)
    }

    // ------------------------------------------------------------------
    // Unsolicited offers
    // ------------------------------------------------------------------

    /// Approach an employed profile about `opening_id`, outside the
    /// application pipeline.
    pub fn make_unsolicited_offer(
        &mut self,
        profile: &CareerProfile,
        opening_id: OpeningId,
        year: Year,
    ) -> Result<OfferId> {
        let opening = self.opening(opening_id)?.clone();
        if !opening.is_open() {
            return Err(CareerError::OpeningClosed(opening_id));
        }
        if !profile.is_employed() || profile.team() == Some(opening.team) {
            return Err(CareerError::transition(
                profile.role(),
                opening.role,
                "offers go to staff of other teams",
            ));
        }
        profile.check_hire_eligibility(opening.role)?;
        let id = self.state.next_offer;
        self.state.next_offer = id.next();
        let offer = UnsolicitedOffer {
            id,
            profile: profile.id,
            opening: opening_id,
            team: opening.team,
            role: opening.role,
            terms: opening.terms.clone(),
            made_year: year,
            expires_year: year + self.config.offer_window.saturating_sub(1) as Year,
            status: OfferStatus::Open,
        };
        self.state.offers.insert(id, offer);
        debug!(offer = %id, profile = %profile.id, opening = %opening_id, "unsolicited offer");
        Ok(id)
    }

    /// Maybe poach `profile`. Candidates are people with an expiring deal
    /// (same tier or better) or a reputation above the poaching bar (strict
    /// upgrades only).
    pub fn consider_poaching(
        &mut self,
        profile: &CareerProfile,
        year: Year,
        rng: &mut impl Rng,
    ) -> Result<Option<OfferId>> {
        if !profile.is_employed() {
            return Ok(None);
        }
        let already_courted = self.state.offers.values().any(|o| o.profile == profile.id && o.is_live(year));
        if already_courted {
            return Ok(None);
        }
        let expiring = profile.contract().is_some_and(|c| c.is_expiring());
        let famous = profile.reputation.for_track(profile.track()) >= self.config.poach_reputation;
        if !expiring && !famous {
            return Ok(None);
        }
        if !rng.gen_bool(self.config.unsolicited_chance.clamp(0.0, 1.0) as f64) {
            return Ok(None);
        }
        let tier = profile.role().tier().unwrap_or(0);
        let mut best: Option<(OpeningId, f32)> = None;
        for opening in self.open_openings() {
            let target = opening.role.tier().unwrap_or(0);
            let wanted = if expiring { target >= tier } else { target > tier };
            if opening.role.track() != profile.track()
                || !wanted
                || profile.team() == Some(opening.team)
                || profile.check_hire_eligibility(opening.role).is_err()
            {
                continue;
            }
            let fit = profile_fit(profile, opening, &self.config.fit);
            if best.map_or(true, |(_, b)| fit > b) {
                best = Some((opening.id, fit));
            }
        }
        match best {
            Some((opening_id, _)) => self.make_unsolicited_offer(profile, opening_id, year).map(Some),
            None => Ok(None),
        }
    }

    pub fn respond_to_unsolicited_offer(
        &mut self,
        registry: &mut PersonnelRegistry,
        id: OfferId,
        accept: bool,
        year: Year,
        start_year: Year,
    ) -> Result<OfferStatus> {
        let offer = self.offer(id)?.clone();
        if !offer.is_live(year) {
            return Err(CareerError::OfferExpired(id));
        }
        if !accept {
            self.set_offer_status(id, OfferStatus::Declined)?;
            return Ok(OfferStatus::Declined);
        }
        let opening = self.opening(offer.opening)?.clone();
        if !opening.is_open() {
            return Err(CareerError::OpeningClosed(opening.id));
        }
        let profile = registry.get_mut(offer.profile)?;
        take_job(profile, &opening, start_year)?;
        self.withdraw_all(profile);
        self.set_offer_status(id, OfferStatus::Accepted)?;
        self.fill(registry, opening.id, FilledBy::Profile(offer.profile), start_year)?;
        info!(profile = %offer.profile, opening = %opening.id, team = %opening.team, "unsolicited offer accepted");
        Ok(OfferStatus::Accepted)
    }

    /// Close out offers whose window has passed.
    pub fn expire_offers(&mut self, year: Year) -> Vec<OfferId> {
        let mut expired = Vec::new();
        for offer in self.state.offers.values_mut() {
            if offer.status == OfferStatus::Open && year > offer.expires_year {
                offer.status = OfferStatus::Expired;
                expired.push(offer.id);
            }
        }
        expired
    }

    fn set_offer_status(&mut self, id: OfferId, status: OfferStatus) -> Result<()> {
        self.state.offers.get_mut(&id).ok_or(CareerError::UnknownOffer(id))?.status = status;
        Ok(())
    }
}

/// Hire from unemployment or transfer from a current job.
fn take_job(profile: &mut CareerProfile, opening: &JobOpening, start_year: Year) -> Result<()> {
    let contract = opening.terms.to_contract();
    if profile.is_employed() {
        profile.transfer(opening.team, opening.role, contract, start_year)
    } else {
        profile.hire(opening.team, opening.role, contract, start_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::Reputation;
    use crate::contract::{Buyout, CoachContract};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    /// Candidate generation disabled so tracked profiles are not outbid.
    fn market() -> JobMarket {
        JobMarket::new(MarketConfig { ai_candidates_per_opening: 0, ..MarketConfig::default() })
    }

    fn seasoned(id: u32) -> CareerProfile {
        CareerProfile::new(ProfileId(id), format!("Coach {}", id), 1980)
            .with_prior_experience(6, 0)
            .with_reputation(Reputation::uniform(60.0))
    }

    fn registry_with(profiles: Vec<CareerProfile>) -> PersonnelRegistry {
        let mut registry = PersonnelRegistry::new();
        for p in profiles {
            registry.insert(p);
        }
        registry
    }

    #[test]
    fn test_open_position_deduplicates() {
        let mut m = market();
        let s = TeamSituation::default();
        let a = m.open_position(TeamId(1), Role::AssistantCoach, &s, 2030, &mut rng()).unwrap();
        let b = m.open_position(TeamId(1), Role::AssistantCoach, &s, 2030, &mut rng()).unwrap();
        let c = m.open_position(TeamId(2), Role::AssistantCoach, &s, 2030, &mut rng()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(m.summary().open_positions, 2);
        assert!(m.open_position(TeamId(1), Role::Unemployed, &s, 2030, &mut rng()).is_err());
    }

    #[test]
    fn test_duplicate_application_rejected() {
        let mut m = market();
        let mut p = seasoned(1);
        let o = m.open_position(TeamId(1), Role::AssistantCoach, &TeamSituation::default(), 2030, &mut rng()).unwrap();
        m.submit_application(&mut p, o, 2030).unwrap();
        let err = m.submit_application(&mut p, o, 2030).unwrap_err();
        assert!(matches!(err, CareerError::DuplicateApplication { .. }));
        assert_eq!(p.pending_applications().len(), 1);
    }

    #[test]
    fn test_user_pipeline_one_stage_at_a_time() {
        let mut m = market();
        let o = m.open_position(TeamId(3), Role::AssistantCoach, &TeamSituation::default(), 2030, &mut rng()).unwrap();
        let mut registry = registry_with(vec![seasoned(1).as_user()]);
        let app = m.submit_application(registry.get_mut(ProfileId(1)).unwrap(), o, 2030).unwrap();

        let p = registry.get_mut(ProfileId(1)).unwrap();
        assert_eq!(m.advance_application(p, app).unwrap(), ApplicationStatus::Interviewing);
        assert_eq!(m.advance_application(p, app).unwrap(), ApplicationStatus::Offered);
        // Offered waits for an answer
        assert_eq!(m.advance_application(p, app).unwrap(), ApplicationStatus::Offered);

        m.respond_to_offer(&mut registry, app, true, 2031).unwrap();
        let p = registry.get(ProfileId(1)).unwrap();
        assert_eq!(p.role(), Role::AssistantCoach);
        assert_eq!(p.team(), Some(TeamId(3)));
        assert!(p.pending_applications().is_empty());
        assert!(!m.opening(o).unwrap().is_open());
    }

    #[test]
    fn test_accept_rejects_competing_applications() {
        let mut m = market();
        let o = m.open_position(TeamId(3), Role::AssistantCoach, &TeamSituation::default(), 2030, &mut rng()).unwrap();
        let mut registry = registry_with(vec![seasoned(1).as_user(), seasoned(2).as_user()]);
        let a1 = m.submit_application(registry.get_mut(ProfileId(1)).unwrap(), o, 2030).unwrap();
        let a2 = m.submit_application(registry.get_mut(ProfileId(2)).unwrap(), o, 2030).unwrap();
        for (pid, app) in [(1, a1), (1, a1), (2, a2)] {
            m.advance_application(registry.get_mut(ProfileId(pid)).unwrap(), app).unwrap();
        }
        m.respond_to_offer(&mut registry, a1, true, 2031).unwrap();
        assert_eq!(m.application(a2).unwrap().status, ApplicationStatus::Rejected);
        assert!(registry.get(ProfileId(2)).unwrap().pending_applications().is_empty());
        let err = m.respond_to_offer(&mut registry, a2, true, 2031).unwrap_err();
        assert!(matches!(err, CareerError::InvalidApplicationState { .. }));
    }

    #[test]
    fn test_auto_apply_first_profile_wins() {
        let mut m = market();
        let o = m.open_position(TeamId(5), Role::AssistantCoach, &TeamSituation::default(), 2030, &mut rng()).unwrap();
        let mut registry = registry_with(vec![seasoned(1), seasoned(2)]);
        let first = m.auto_apply(&mut registry, ProfileId(1), 2030, 2031).unwrap();
        let second = m.auto_apply(&mut registry, ProfileId(2), 2030, 2031).unwrap();
        assert_eq!(first, Some(AutoApplyOutcome::Hired { opening: o, team: TeamId(5), role: Role::AssistantCoach }));
        assert_eq!(second, None);
        assert!(registry.get(ProfileId(2)).unwrap().role() == Role::Unemployed);
    }

    #[test]
    fn test_strong_generated_candidates_block_offer() {
        let mut m = JobMarket::default();
        let o = m.open_position(TeamId(5), Role::AssistantCoach, &TeamSituation::default(), 2030, &mut rng()).unwrap();
        let weak = CareerProfile::new(ProfileId(1), "Rookie", 2000).with_reputation(Reputation::uniform(0.0));
        let mut registry = registry_with(vec![weak]);
        let outcome = m.auto_apply(&mut registry, ProfileId(1), 2030, 2031).unwrap();
        assert_eq!(outcome, Some(AutoApplyOutcome::Rejected { opening: o }));
        assert!(m.opening(o).unwrap().is_open());
    }

    #[test]
    fn test_stale_opening_filled_from_outside() {
        let mut m = JobMarket::default();
        let o = m.open_position(TeamId(2), Role::HeadCoach, &TeamSituation::default(), 2030, &mut rng()).unwrap();
        let mut registry = PersonnelRegistry::new();
        assert!(m.fill_stale_openings(&mut registry, 2031, &mut rng()).unwrap().is_empty());
        m.age_openings();
        let filled = m.fill_stale_openings(&mut registry, 2031, &mut rng()).unwrap();
        assert_eq!(filled.len(), 1);
        let (opening, hire) = filled[0];
        assert_eq!(opening, o);
        let p = registry.get(hire).unwrap();
        assert_eq!(p.role(), Role::HeadCoach);
        assert_eq!(registry.holder_of(TeamId(2), Role::HeadCoach), Some(hire));
        assert!(matches!(m.opening(o).unwrap().status, OpeningStatus::Filled { by: FilledBy::External(_), .. }));
    }

    #[test]
    fn test_vacancy_promotes_from_within() {
        let mut m = market();
        let contract = CoachContract::new(3, 1_000_000, Buyout::Percentage(0.5));
        let oc = CareerProfile::established(ProfileId(1), "OC", 1975, TeamId(1), Role::Coordinator, contract, 2030, 12)
            .unwrap()
            .with_reputation(Reputation::uniform(70.0));
        let mut registry = registry_with(vec![oc]);
        let outcome = m
            .open_vacancy(&mut registry, TeamId(1), Role::HeadCoach, &TeamSituation::default(), 2030, 2031, &mut rng())
            .unwrap();
        assert_eq!(outcome.promotions, vec![(ProfileId(1), Role::HeadCoach)]);
        assert_eq!(m.opening(outcome.opening).unwrap().role, Role::Coordinator);
        assert_eq!(registry.get(ProfileId(1)).unwrap().role(), Role::HeadCoach);
    }

    #[test]
    fn test_unsolicited_offer_window_and_transfer() {
        let mut m = JobMarket::new(MarketConfig {
            ai_candidates_per_opening: 0,
            unsolicited_chance: 1.0,
            ..MarketConfig::default()
        });
        let contract = CoachContract::new(1, 900_000, Buyout::Fixed(0));
        let oc = CareerProfile::established(ProfileId(1), "OC", 1975, TeamId(1), Role::Coordinator, contract, 2030, 10)
            .unwrap()
            .with_reputation(Reputation::uniform(55.0));
        let mut registry = registry_with(vec![oc]);
        let o = m.open_position(TeamId(2), Role::HeadCoach, &TeamSituation::default(), 2030, &mut rng()).unwrap();

        let offer = m
            .consider_poaching(registry.get(ProfileId(1)).unwrap(), 2030, &mut rng())
            .unwrap()
            .unwrap();
        assert_eq!(m.offer(offer).unwrap().opening, o);
        assert!(m.expire_offers(2030).is_empty());

        m.respond_to_unsolicited_offer(&mut registry, offer, true, 2030, 2031).unwrap();
        let p = registry.get(ProfileId(1)).unwrap();
        assert_eq!(p.role(), Role::HeadCoach);
        assert_eq!(p.team(), Some(TeamId(2)));
        assert!(!m.opening(o).unwrap().is_open());
    }

    #[test]
    fn test_expired_offer_cannot_be_accepted() {
        let mut m = market();
        let contract = CoachContract::new(3, 900_000, Buyout::Fixed(0));
        let oc = CareerProfile::established(ProfileId(1), "OC", 1975, TeamId(1), Role::Coordinator, contract, 2030, 10)
            .unwrap();
        let mut registry = registry_with(vec![oc]);
        let o = m.open_position(TeamId(2), Role::HeadCoach, &TeamSituation::default(), 2030, &mut rng()).unwrap();
        let offer = m.make_unsolicited_offer(registry.get(ProfileId(1)).unwrap(), o, 2030).unwrap();
        assert_eq!(m.expire_offers(2031), vec![offer]);
        let err = m.respond_to_unsolicited_offer(&mut registry, offer, true, 2031, 2032).unwrap_err();
        assert!(matches!(err, CareerError::OfferExpired(_)));
        assert_eq!(registry.get(ProfileId(1)).unwrap().role(), Role::Coordinator);
    }

    #[test]
    fn test_state_round_trip() {
        let mut m = JobMarket::default();
        m.open_position(TeamId(1), Role::Scout, &TeamSituation::default(), 2030, &mut rng()).unwrap();
        let json = serde_json::to_string(m.state()).unwrap();
        let state: JobMarketState = serde_json::from_str(&json).unwrap();
        let restored = JobMarket::from_state(state, MarketConfig::default());
        assert_eq!(restored.state(), m.state());
    }
}
