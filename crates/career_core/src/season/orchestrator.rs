//! Season tick driver.
//!
//! One call to [`LifecycleOrchestrator::run_season`] runs the six steps in
//! order across every active profile: close the season, update reputation,
//! judge job security, draw retirements, work the job market, advance
//! tenure. Profiles are visited in ascending id order inside each step.

use super::input::SeasonInput;
use super::report::{SeasonEvent, SeasonReport, SkippedStep, TickStep};
use super::security::JobSecurityModel;
use crate::api::query::ProfileView;
use crate::career::{CareerProfile, PersonnelRegistry, Role};
use crate::config::LifecycleConfig;
use crate::error::{CareerError, Result};
use crate::market::{
    ApplicationStatus, AutoApplyOutcome, JobMarket, JobMarketState, MarketSummary, OfferStatus, OfferedTerms,
    VacancyOutcome,
};
use crate::reputation::ReputationUpdater;
use crate::retirement::{RetirementInputs, RetirementModel};
use crate::rng::{RngPhase, SeasonRng};
use crate::types::{ApplicationId, OfferId, OpeningId, ProfileId, TeamId, Year};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info, warn};

#[derive(Debug)]
pub struct LifecycleOrchestrator {
    config: LifecycleConfig,
    registry: PersonnelRegistry,
    market: JobMarket,
    next_season: Year,
    /// Seats emptied between ticks, listed at the next market step.
    pending_vacancies: Vec<(TeamId, Role)>,
}

impl LifecycleOrchestrator {
    /// Fails if the configuration does not validate.
    pub fn new(config: LifecycleConfig, first_season: Year) -> Result<Self> {
        config.validate()?;
        let market = JobMarket::new(config.market.clone());
        Ok(Self {
            config,
            registry: PersonnelRegistry::new(),
            market,
            next_season: first_season,
            pending_vacancies: Vec::new(),
        })
    }

    /// Rebuild from restored parts.
    pub fn from_parts(
        config: LifecycleConfig,
        registry: PersonnelRegistry,
        market: JobMarketState,
        next_season: Year,
        pending_vacancies: Vec<(TeamId, Role)>,
    ) -> Result<Self> {
        config.validate()?;
        let market = JobMarket::from_state(market, config.market.clone());
        Ok(Self { config, registry, market, next_season, pending_vacancies })
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub fn registry(&self) -> &PersonnelRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut PersonnelRegistry {
        &mut self.registry
    }

    pub fn market(&self) -> &JobMarket {
        &self.market
    }

    pub fn pending_vacancies(&self) -> &[(TeamId, Role)] {
        &self.pending_vacancies
    }

    /// Next season `run_season` will accept.
    pub fn next_season(&self) -> Year {
        self.next_season
    }

    /// Last finished season; decisions made between ticks are dated here.
    pub fn current_year(&self) -> Year {
        self.next_season.saturating_sub(1)
    }

    pub fn add_profile(&mut self, profile: CareerProfile) -> ProfileId {
        let id = profile.id;
        self.registry.insert(profile);
        id
    }

    // ------------------------------------------------------------------
    // Query surface
    // ------------------------------------------------------------------

    pub fn profile_view(&self, id: ProfileId) -> Result<ProfileView> {
        let profile = self.registry.get(id)?;
        Ok(ProfileView::build(profile, &self.market))
    }

    pub fn market_summary(&self) -> MarketSummary {
        self.market.summary()
    }

    /// Open a position outside a tick, e.g. a new expansion team.
    pub fn list_opening(&mut self, team: TeamId, role: Role, seed: u64) -> Result<OpeningId> {
        let mut rng = SeasonRng::new(seed, self.current_year()).for_phase(RngPhase::Candidates, team.0 as u64);
        self.market.open_position(team, role, &Default::default(), self.current_year(), &mut rng)
    }

    // ------------------------------------------------------------------
    // User-driven market calls between ticks
    // ------------------------------------------------------------------

    pub fn submit_application(&mut self, profile: ProfileId, opening: OpeningId) -> Result<ApplicationId> {
        let year = self.current_year();
        let profile = self.registry.get_mut(profile)?;
        self.market.submit_application(profile, opening, year)
    }

    pub fn withdraw_application(&mut self, profile: ProfileId, application: ApplicationId) -> Result<()> {
        let profile = self.registry.get_mut(profile)?;
        self.market.withdraw_application(profile, application)
    }

    /// Answer an offer on an application. An acceptance that leaves a seat
    /// empty elsewhere is listed at the next tick.
    pub fn respond_to_offer(&mut self, application: ApplicationId, accept: bool) -> Result<()> {
        let app = self.market.application(application)?;
        let vacated = self.seat_of(app.profile)?;
        self.market.respond_to_offer(&mut self.registry, application, accept, self.next_season)?;
        if accept {
            self.remember_vacancy(vacated);
        }
        Ok(())
    }

    pub fn respond_to_unsolicited_offer(&mut self, offer: OfferId, accept: bool) -> Result<OfferStatus> {
        let target = self.market.offer(offer)?.profile;
        let vacated = self.seat_of(target)?;
        let year = self.current_year();
        let status = self.market.respond_to_unsolicited_offer(
            &mut self.registry,
            offer,
            accept,
            year,
            self.next_season,
        )?;
        if status == OfferStatus::Accepted {
            self.remember_vacancy(vacated);
        }
        Ok(status)
    }

    fn seat_of(&self, profile: ProfileId) -> Result<Option<(TeamId, Role)>> {
        let profile = self.registry.get(profile)?;
        Ok(profile.team().map(|t| (t, profile.role())))
    }

    // Seats left between ticks are re-listed at the start of the next market step.
    fn remember_vacancy(&mut self, seat: Option<(TeamId, Role)>) {
        if let Some(seat) = seat {
            if !self.pending_vacancies.contains(&seat) {
                self.pending_vacancies.push(seat);
            }
        }
    }

    // ------------------------------------------------------------------
    // Season tick
    // ------------------------------------------------------------------

    /// Run one season. Configuration errors and stale years abort before any
    /// state changes; per-profile failures are recorded in the report and
    /// that profile's step is skipped.
    pub fn run_season(&mut self, input: &SeasonInput) -> Result<SeasonReport> {
        self.config.validate()?;
        if input.year < self.next_season {
            return Err(CareerError::StaleSeason { year: input.year, next: self.next_season });
        }
        let year = input.year;
        let rng = SeasonRng::new(input.seed, year);
        let mut report = SeasonReport::new(year);
        info!(year, profiles = self.registry.len(), "season tick started");

        for offer in self.market.expire_offers(year) {
            report.push(SeasonEvent::OfferExpired { offer });
        }

        let active = self.registry.active_ids();
        self.close_seasons(input, &active, &mut report);
        self.update_reputation(input, &active, &mut report);
        let mut vacancies = std::mem::take(&mut self.pending_vacancies);
        self.judge_job_security(input, &rng, &active, &mut vacancies, &mut report);
        self.draw_retirements(year, &rng, &active, &mut vacancies, &mut report);
        self.run_market(input, &rng, vacancies, &mut report);
        self.advance_tenure(year + 1);
        self.next_season = year + 1;

        info!(
            year,
            hires = report.hires(),
            fired = report.firings(),
            retired = report.retirements(),
            promoted = report.promotions(),
            skipped = report.skipped.len(),
            "season tick finished"
        );
        Ok(report)
    }

    // (1) results into history, incentives, contract year
    fn close_seasons(&mut self, input: &SeasonInput, active: &[ProfileId], report: &mut SeasonReport) {
        for &id in active {
            let profile = match self.registry.get_mut(id) {
                Ok(p) => p,
                Err(e) => {
                    skip(report, Some(id), TickStep::CloseSeason, &e);
                    continue;
                }
            };
            let Some(team) = profile.team() else {
                continue;
            };
            let Some(season) = input.season_for(team) else {
                continue;
            };
            let incentives_paid = profile.close_season(input.year, season);
            report.push(SeasonEvent::SeasonClosed { profile: id, team, incentives_paid });
        }
        for &(id, award) in &input.awards {
            match self.registry.get_mut(id) {
                Ok(profile) => {
                    let paid = profile.record_award(award);
                    report.push(SeasonEvent::AwardRecorded { profile: id, award, paid });
                }
                Err(e) => skip(report, Some(id), TickStep::CloseSeason, &e),
            }
        }
    }

    // (2)
    fn update_reputation(&mut self, input: &SeasonInput, active: &[ProfileId], report: &mut SeasonReport) {
        let updater = ReputationUpdater::new(&self.config.reputation);
        for &id in active {
            let Ok(profile) = self.registry.get_mut(id) else {
                continue;
            };
            let Some(season) = profile.team().and_then(|t| input.season_for(t)) else {
                continue;
            };
            if let Some(change) = updater.apply_season(profile, input.year, season) {
                report.push(SeasonEvent::ReputationChanged {
                    profile: id,
                    track: change.track,
                    before: change.track_before,
                    after: change.track_after,
                });
            }
        }
    }

    // (3) firing, then renewal or departure for expired deals
    fn judge_job_security(
        &mut self,
        input: &SeasonInput,
        rng: &SeasonRng,
        active: &[ProfileId],
        vacancies: &mut Vec<(TeamId, Role)>,
        report: &mut SeasonReport,
    ) {
        let year = input.year;
        let model = JobSecurityModel::new(&self.config.security);
        let updater = ReputationUpdater::new(&self.config.reputation);
        for &id in active {
            let Ok(profile) = self.registry.get_mut(id) else {
                continue;
            };
            let Some(team) = profile.team() else {
                continue;
            };
            let Some(season) = input.season_for(team) else {
                continue;
            };
            let role = profile.role();
            let situation = input.situation_for(team);
            let verdict = model.evaluate(profile, year, season, &situation);

            let mut profile_rng = rng.for_profile(RngPhase::JobSecurity, id);
            if model.decide(&verdict, &mut profile_rng) {
                let track = profile.track();
                let reason = format!(
                    "won {:.3} against an expected {:.3}",
                    verdict.actual_win_pct, verdict.expected_win_pct
                );
                match profile.fire(reason, year) {
                    Ok(buyout) => {
                        updater.apply_firing_penalty(profile, track);
                        self.market.withdraw_all(profile);
                        vacancies.push((team, role));
                        report.push(SeasonEvent::Fired { profile: id, team, role, buyout });
                    }
                    Err(e) => skip(report, Some(id), TickStep::JobSecurity, &e),
                }
                continue;
            }

            if !profile.contract().is_some_and(|c| c.is_expired()) {
                continue;
            }
            if model.should_extend(profile, &verdict) {
                let contract = OfferedTerms::for_role(role, &situation, &self.config.market).to_contract();
                let years = contract.total_years;
                match profile.extend_contract(contract) {
                    Ok(()) => report.push(SeasonEvent::ContractExtended { profile: id, team, years }),
                    Err(e) => skip(report, Some(id), TickStep::JobSecurity, &e),
                }
            } else {
                match profile.depart_on_expiry(year) {
                    Ok(()) => {
                        vacancies.push((team, role));
                        report.push(SeasonEvent::ContractExpired { profile: id, team, role });
                    }
                    Err(e) => skip(report, Some(id), TickStep::JobSecurity, &e),
                }
            }
        }
    }

    // (4)
    fn draw_retirements(
        &mut self,
        year: Year,
        rng: &SeasonRng,
        active: &[ProfileId],
        vacancies: &mut Vec<(TeamId, Role)>,
        report: &mut SeasonReport,
    ) {
        let model = RetirementModel::new(&self.config.retirement);
        for &id in active {
            let Ok(profile) = self.registry.get_mut(id) else {
                continue;
            };
            if !model.should_evaluate(profile, year) {
                continue;
            }
            let mut profile_rng = rng.for_profile(RngPhase::Retirement, id);
            let factors = model.assess(&RetirementInputs::from_profile(profile, year), &mut profile_rng);
            debug!(
                profile = %id,
                chance = factors.final_retirement_chance,
                reason = ?factors.primary_reason,
                "retirement assessed"
            );
            if !model.decide(&factors, &mut profile_rng) {
                continue;
            }
            let seat = profile.team().map(|t| (t, profile.role()));
            match profile.retire(factors.primary_reason.description(), year) {
                Ok(()) => {
                    self.market.withdraw_all(profile);
                    vacancies.extend(seat);
                    report.push(SeasonEvent::Retired {
                        profile: id,
                        reason: factors.primary_reason,
                        chance: factors.final_retirement_chance,
                    });
                }
                Err(e) => skip(report, Some(id), TickStep::Retirement, &e),
            }
        }
    }

    // (5) vacancies, user pipeline, computer applicants, poaching, outside hires
    fn run_market(
        &mut self,
        input: &SeasonInput,
        rng: &SeasonRng,
        vacancies: Vec<(TeamId, Role)>,
        report: &mut SeasonReport,
    ) {
        let year = input.year;
        let start_year = year + 1;
        let mut candidates_rng = rng.for_phase(RngPhase::Candidates, 0);

        for (team, role) in vacancies {
            self.list_vacancy(input, team, role, &mut candidates_rng, report);
        }

        for app_id in self.market.undecided_application_ids() {
            let Ok(app) = self.market.application(app_id) else {
                continue;
            };
            let (profile_id, opening) = (app.profile, app.opening);
            let profile = match self.registry.get_mut(profile_id) {
                Ok(p) => p,
                Err(e) => {
                    skip(report, Some(profile_id), TickStep::Market, &e);
                    continue;
                }
            };
            if !profile.is_user {
                continue;
            }
            match self.market.advance_application(profile, app_id) {
                Ok(ApplicationStatus::Rejected) => {
                    report.push(SeasonEvent::ApplicationRejected { profile: profile_id, opening })
                }
                Ok(_) => {}
                Err(e) => skip(report, Some(profile_id), TickStep::Market, &e),
            }
        }

        for id in self.registry.unemployed_ids() {
            match self.market.auto_apply(&mut self.registry, id, year, start_year) {
                Ok(Some(AutoApplyOutcome::Hired { opening, team, role })) => {
                    report.push(SeasonEvent::Hired { profile: id, team, role, opening })
                }
                Ok(Some(AutoApplyOutcome::Rejected { opening })) => {
                    report.push(SeasonEvent::ApplicationRejected { profile: id, opening })
                }
                Ok(None) => {}
                Err(e) => skip(report, Some(id), TickStep::Market, &e),
            }
        }

        self.make_offers(input, rng, &mut candidates_rng, report);

        match self.market.fill_stale_openings(&mut self.registry, start_year, &mut candidates_rng) {
            Ok(filled) => {
                for (opening, profile) in filled {
                    report.push(SeasonEvent::OutsideHire { profile, opening });
                }
            }
            Err(e) => skip(report, None, TickStep::Market, &e),
        }
        self.market.age_openings();
    }

    fn make_offers(
        &mut self,
        input: &SeasonInput,
        rng: &SeasonRng,
        candidates_rng: &mut ChaCha8Rng,
        report: &mut SeasonReport,
    ) {
        let year = input.year;
        let courted: Vec<ProfileId> = self
            .registry
            .iter()
            .filter(|p| p.is_employed())
            // people who just signed for next season are left alone
            .filter(|p| p.history().latest().map_or(true, |e| e.year <= year))
            .map(|p| p.id)
            .collect();

        for id in courted {
            let Ok(profile) = self.registry.get(id) else {
                continue;
            };
            let seat = profile.team().map(|t| (t, profile.role()));
            let is_user = profile.is_user;
            let mut profile_rng = rng.for_profile(RngPhase::Offers, id);
            let offer_id = match self.market.consider_poaching(profile, year, &mut profile_rng) {
                Ok(Some(offer)) => offer,
                Ok(None) => continue,
                Err(e) => {
                    skip(report, Some(id), TickStep::Market, &e);
                    continue;
                }
            };
            let Ok(offer) = self.market.offer(offer_id) else {
                continue;
            };
            let (opening, team, role) = (offer.opening, offer.team, offer.role);
            report.push(SeasonEvent::OfferMade { profile: id, offer: offer_id, opening });
            if is_user {
                continue;
            }
            match self.market.respond_to_unsolicited_offer(&mut self.registry, offer_id, true, year, year + 1) {
                Ok(_) => {
                    report.push(SeasonEvent::OfferAccepted { profile: id, offer: offer_id, team, role });
                    if let Some((old_team, old_role)) = seat {
                        self.list_vacancy(input, old_team, old_role, candidates_rng, report);
                    }
                }
                Err(e) => skip(report, Some(id), TickStep::Market, &e),
            }
        }
    }

    fn list_vacancy(
        &mut self,
        input: &SeasonInput,
        team: TeamId,
        role: Role,
        rng: &mut ChaCha8Rng,
        report: &mut SeasonReport,
    ) {
        let situation = input.situation_for(team);
        match self.market.open_vacancy(&mut self.registry, team, role, &situation, input.year, input.year + 1, rng) {
            Ok(VacancyOutcome { promotions, opening }) => {
                for (profile, new_role) in promotions {
                    report.push(SeasonEvent::Promoted { profile, team, role: new_role });
                }
                let listed = self.market.opening(opening).map(|o| o.role).unwrap_or(role);
                report.push(SeasonEvent::OpeningListed { opening, team, role: listed });
            }
            Err(e) => skip(report, None, TickStep::Market, &e),
        }
    }

    // (6)
    fn advance_tenure(&mut self, next_year: Year) {
        for id in self.registry.active_ids() {
            if let Ok(profile) = self.registry.get_mut(id) {
                profile.advance_tenure(next_year);
            }
        }
    }
}

fn skip(report: &mut SeasonReport, profile: Option<ProfileId>, step: TickStep, err: &CareerError) {
    if err.is_recoverable() {
        warn!(?profile, ?step, %err, "profile step skipped");
    } else {
        error!(?profile, ?step, %err, "profile step failed");
    }
    report.skipped.push(SkippedStep::new(profile, step, err));
}
