//! The tracked person and the legal moves between employment states.
//!
//! Every transition validates first and mutates second, so a rejected call
//! leaves the profile exactly as it was.

use super::history::{CareerHistory, DepartureReason, HistoryEntry};
use super::role::{Role, Track};
use super::skills::{SkillSet, StyleProfile};
use crate::contract::{AwardKind, CoachContract};
use crate::error::{CareerError, Result};
use crate::outcome::TeamSeason;
use crate::types::{ApplicationId, ProfileId, TeamId, Year};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reputation bump applied on every promotion.
pub const PROMOTION_REPUTATION_BUMP: f32 = 3.0;

/// Standing scores, 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reputation {
    pub overall: f32,
    pub coaching: f32,
    pub front_office: f32,
}

impl Default for Reputation {
    fn default() -> Self {
        Self { overall: 50.0, coaching: 50.0, front_office: 50.0 }
    }
}

impl Reputation {
    pub fn uniform(value: f32) -> Self {
        let v = value.clamp(0.0, 100.0);
        Self { overall: v, coaching: v, front_office: v }
    }

    pub fn for_track(&self, track: Track) -> f32 {
        match track {
            Track::Coaching => self.coaching,
            Track::FrontOffice => self.front_office,
            Track::Unemployed | Track::Retired => self.overall,
        }
    }

    pub fn set_track(&mut self, track: Track, value: f32) {
        let v = value.clamp(0.0, 100.0);
        match track {
            Track::Coaching => self.coaching = v,
            Track::FrontOffice => self.front_office = v,
            Track::Unemployed | Track::Retired => self.overall = v,
        }
    }

    pub fn set_overall(&mut self, value: f32) {
        self.overall = value.clamp(0.0, 100.0);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerProfile {
    pub id: ProfileId,
    pub name: String,
    pub birth_year: Year,
    /// Controlled by the human player; never auto-applies or auto-accepts.
    pub is_user: bool,
    pub skills: SkillSet,
    pub style: StyleProfile,
    pub reputation: Reputation,

    track: Track,
    role: Role,
    team: Option<TeamId>,
    years_in_role: u8,
    years_unemployed: u8,
    coaching_years: u16,
    front_office_years: u16,
    last_employed_track: Option<Track>,
    contract: Option<CoachContract>,
    history: CareerHistory,
    times_fired: u16,
    times_resigned: u16,
    track_switches: u16,
    career_earnings: u64,
    retired_year: Option<Year>,
    pending_applications: Vec<ApplicationId>,
}

impl CareerProfile {
    /// A new, unemployed person with no history.
    pub fn new(id: ProfileId, name: impl Into<String>, birth_year: Year) -> Self {
        Self {
            id,
            name: name.into(),
            birth_year,
            is_user: false,
            skills: SkillSet::default(),
            style: StyleProfile::default(),
            reputation: Reputation::default(),
            track: Track::Unemployed,
            role: Role::Unemployed,
            team: None,
            years_in_role: 0,
            years_unemployed: 0,
            coaching_years: 0,
            front_office_years: 0,
            last_employed_track: None,
            contract: None,
            history: CareerHistory::new(),
            times_fired: 0,
            times_resigned: 0,
            track_switches: 0,
            career_earnings: 0,
            retired_year: None,
            pending_applications: Vec::new(),
        }
    }

    /// A person who already holds `role` when the league is created.
    ///
    /// This is world setup, not a hire: prior experience is credited to the
    /// role's track and the seniority check is not applied.
    pub fn established(
        id: ProfileId,
        name: impl Into<String>,
        birth_year: Year,
        team: TeamId,
        role: Role,
        contract: CoachContract,
        year: Year,
        prior_years: u16,
    ) -> Result<Self> {
        if !role.is_employed() {
            return Err(CareerError::transition(Role::Unemployed, role, "not an employed role"));
        }
        contract.validate()?;
        let mut profile = Self::new(id, name, birth_year);
        let track = role.track();
        profile.track = track;
        profile.role = role;
        profile.team = Some(team);
        profile.last_employed_track = Some(track);
        profile.contract = Some(contract);
        match track {
            Track::Coaching => profile.coaching_years = prior_years,
            _ => profile.front_office_years = prior_years,
        }
        profile.history.append(HistoryEntry::open(year, team, role));
        Ok(profile)
    }

    pub fn with_skills(mut self, skills: SkillSet) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_style(mut self, style: StyleProfile) -> Self {
        self.style = style;
        self
    }

    pub fn with_reputation(mut self, reputation: Reputation) -> Self {
        self.reputation = reputation;
        self
    }

    pub fn as_user(mut self) -> Self {
        self.is_user = true;
        self
    }

    /// Credit experience earned before the tracked career began.
    pub fn with_prior_experience(mut self, coaching_years: u16, front_office_years: u16) -> Self {
        self.coaching_years = coaching_years;
        self.front_office_years = front_office_years;
        self
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn track(&self) -> Track {
        self.track
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn team(&self) -> Option<TeamId> {
        self.team
    }

    pub fn contract(&self) -> Option<&CoachContract> {
        self.contract.as_ref()
    }

    pub fn history(&self) -> &CareerHistory {
        &self.history
    }

    pub fn years_in_role(&self) -> u8 {
        self.years_in_role
    }

    pub fn years_unemployed(&self) -> u8 {
        self.years_unemployed
    }

    pub fn coaching_years(&self) -> u16 {
        self.coaching_years
    }

    pub fn front_office_years(&self) -> u16 {
        self.front_office_years
    }

    pub fn total_tenure(&self) -> u16 {
        self.coaching_years + self.front_office_years
    }

    pub fn years_in_track(&self, track: Track) -> u16 {
        match track {
            Track::Coaching => self.coaching_years,
            Track::FrontOffice => self.front_office_years,
            _ => 0,
        }
    }

    pub fn times_fired(&self) -> u16 {
        self.times_fired
    }

    pub fn times_resigned(&self) -> u16 {
        self.times_resigned
    }

    pub fn track_switches(&self) -> u16 {
        self.track_switches
    }

    pub fn career_earnings(&self) -> u64 {
        self.career_earnings
    }

    pub fn retired_year(&self) -> Option<Year> {
        self.retired_year
    }

    pub fn pending_applications(&self) -> &[ApplicationId] {
        &self.pending_applications
    }

    pub fn age(&self, year: Year) -> u8 {
        year.saturating_sub(self.birth_year).min(u8::MAX as u16) as u8
    }

    pub fn is_employed(&self) -> bool {
        self.role.is_employed()
    }

    pub fn is_retired(&self) -> bool {
        self.role == Role::Retired
    }

    /// Current track while employed, otherwise the last one worked in.
    pub fn active_track(&self) -> Option<Track> {
        if self.track.is_employment_track() {
            Some(self.track)
        } else {
            self.last_employed_track
        }
    }

    pub fn last_employed_track(&self) -> Option<Track> {
        self.last_employed_track
    }

    pub fn active_skill_rating(&self) -> f32 {
        self.active_track().map(|t| self.skills.rating_for(t)).unwrap_or(0.0)
    }

    /// Whether a hire into `role` passes the seniority rule.
    ///
    /// Entry roles are always open. Anything above needs a role in the same
    /// track no more than one tier below the target somewhere in history.
    pub fn check_hire_eligibility(&self, role: Role) -> Result<()> {
        let Some(tier) = role.tier() else {
            return Err(CareerError::transition(self.role, role, "cannot be hired into a pseudo-role"));
        };
        if role.is_entry_level() {
            return Ok(());
        }
        let reached = self.history.highest_tier(role.track()).unwrap_or(0);
        if reached + 1 >= tier {
            Ok(())
        } else {
            Err(CareerError::transition(
                self.role,
                role,
                format!("requires prior tier {} experience in {:?}", tier - 1, role.track()),
            ))
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Hire from Unemployed into `role` at `team`, starting in `year`.
    pub fn hire(&mut self, team: TeamId, role: Role, contract: CoachContract, year: Year) -> Result<()> {
        if self.role != Role::Unemployed {
            return Err(CareerError::transition(self.role, role, "hire requires Unemployed"));
        }
        self.check_hire_eligibility(role)?;
        contract.validate()?;

        let track = role.track();
        if self.last_employed_track.is_some_and(|last| last != track) {
            self.track_switches += 1;
        }
        self.track = track;
        self.role = role;
        self.team = Some(team);
        self.years_in_role = 0;
        self.years_unemployed = 0;
        self.last_employed_track = Some(track);
        self.contract = Some(contract);
        self.history.append(HistoryEntry::open(year, team, role));
        debug!(profile = %self.id, ?role, %team, year, "hired");
        Ok(())
    }

    /// Move up within the current track and team.
    pub fn promote(&mut self, new_role: Role, year: Year) -> Result<()> {
        if !self.role.is_promotion_to(new_role) {
            return Err(CareerError::transition(
                self.role,
                new_role,
                "promotion must be to a higher tier in the same track",
            ));
        }
        let Some(team) = self.team else {
            return Err(CareerError::transition(self.role, new_role, "no current team"));
        };

        self.history.mark_departure(DepartureReason::Promoted);
        self.role = new_role;
        self.years_in_role = 0;
        let track_rep = self.reputation.for_track(self.track) + PROMOTION_REPUTATION_BUMP;
        self.reputation.set_track(self.track, track_rep);
        self.reputation.set_overall(self.reputation.overall + PROMOTION_REPUTATION_BUMP);
        self.history.append(HistoryEntry::open(year, team, new_role));
        debug!(profile = %self.id, ?new_role, year, "promoted");
        Ok(())
    }

    /// Employer ends the deal. Returns the buyout realized as income.
    pub fn fire(&mut self, reason: impl Into<String>, year: Year) -> Result<u64> {
        self.require_employed(Role::Unemployed, "fire")?;
        let buyout = self.contract.as_ref().map(CoachContract::calculate_buyout).unwrap_or(0);
        let reason = reason.into();
        self.career_earnings += buyout;
        self.times_fired += 1;
        debug!(profile = %self.id, role = ?self.role, year, buyout, %reason, "fired");
        self.leave(DepartureReason::Fired(reason));
        Ok(buyout)
    }

    pub fn resign(&mut self, reason: impl Into<String>, year: Year) -> Result<()> {
        self.require_employed(Role::Unemployed, "resign")?;
        let reason = reason.into();
        self.times_resigned += 1;
        debug!(profile = %self.id, role = ?self.role, year, %reason, "resigned");
        self.leave(DepartureReason::Resigned(reason));
        Ok(())
    }

    /// Contract ran out and was not renewed. Counts as neither firing nor
    /// resignation.
    pub fn depart_on_expiry(&mut self, year: Year) -> Result<()> {
        self.require_employed(Role::Unemployed, "depart")?;
        debug!(profile = %self.id, role = ?self.role, year, "contract expired");
        self.leave(DepartureReason::ContractExpired);
        Ok(())
    }

    /// Leave the current employer for `role` at `team` in one step.
    pub fn transfer(
        &mut self,
        team: TeamId,
        role: Role,
        contract: CoachContract,
        year: Year,
    ) -> Result<()> {
        self.require_employed(role, "transfer")?;
        if self.team == Some(team) {
            return Err(CareerError::transition(self.role, role, "transfer must change teams"));
        }
        self.check_hire_eligibility(role)?;
        contract.validate()?;

        self.leave(DepartureReason::TookNewJob);
        self.hire(team, role, contract, year)
    }

    /// Terminal. Allowed from any state except Retired.
    pub fn retire(&mut self, reason: impl Into<String>, year: Year) -> Result<()> {
        if self.is_retired() {
            return Err(CareerError::transition(Role::Retired, Role::Retired, "already retired"));
        }
        let reason = reason.into();
        if self.is_employed() {
            self.history.mark_departure(DepartureReason::Retired(reason.clone()));
        }
        self.track = Track::Retired;
        self.role = Role::Retired;
        self.team = None;
        self.contract = None;
        self.years_in_role = 0;
        self.retired_year = Some(year);
        self.pending_applications.clear();
        debug!(profile = %self.id, year, %reason, "retired");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Season bookkeeping
    // ------------------------------------------------------------------

    /// Record the finished season against the open history entry, credit the
    /// year of experience, settle incentives and count the season against
    /// the contract. Returns the incentive payout; nothing is credited when
    /// no open entry belongs to `year`.
    pub fn close_season(&mut self, year: Year, season: &TeamSeason) -> u64 {
        if !self.is_employed() {
            return 0;
        }
        if !self.history.close_season(year, season) {
            debug!(profile = %self.id, year, "no open season to close");
            return 0;
        }
        if self.track == Track::Coaching {
            self.coaching_years += 1;
        } else {
            self.front_office_years += 1;
        }
        let Some(contract) = self.contract.as_mut() else {
            return 0;
        };
        let paid = contract.settle_incentives(season);
        contract.advance_year();
        self.career_earnings += contract.annual_salary + paid;
        paid
    }

    /// Award signal from outside; releases matching incentive payouts.
    pub fn record_award(&mut self, award: AwardKind) -> u64 {
        let paid = self.contract.as_mut().map(|c| c.record_award(award)).unwrap_or(0);
        self.career_earnings += paid;
        paid
    }

    /// Replace the contract with a renewal while staying in the same job.
    pub fn extend_contract(&mut self, contract: CoachContract) -> Result<()> {
        self.require_employed(self.role, "extend")?;
        contract.validate()?;
        self.contract = Some(contract);
        Ok(())
    }

    /// End-of-tick counters. Opens next season's history entry for anyone
    /// still in the same job.
    pub fn advance_tenure(&mut self, next_year: Year) {
        match self.track {
            Track::Retired => {}
            Track::Unemployed => {
                self.years_unemployed = self.years_unemployed.saturating_add(1);
            }
            Track::Coaching | Track::FrontOffice => {
                let hired_for_next = self.history.latest().is_some_and(|e| e.year >= next_year);
                if hired_for_next {
                    return;
                }
                self.years_in_role = self.years_in_role.saturating_add(1);
                if let Some(team) = self.team {
                    self.history.append(HistoryEntry::open(next_year, team, self.role));
                }
            }
        }
    }

    pub(crate) fn add_pending_application(&mut self, id: ApplicationId) {
        if !self.pending_applications.contains(&id) {
            self.pending_applications.push(id);
        }
    }

    pub(crate) fn remove_pending_application(&mut self, id: ApplicationId) {
        self.pending_applications.retain(|a| *a != id);
    }

    fn require_employed(&self, to: Role, action: &str) -> Result<()> {
        if self.is_employed() {
            Ok(())
        } else {
            Err(CareerError::transition(self.role, to, format!("{} requires an employed state", action)))
        }
    }

    fn leave(&mut self, reason: DepartureReason) {
        self.history.mark_departure(reason);
        self.track = Track::Unemployed;
        self.role = Role::Unemployed;
        self.team = None;
        self.contract = None;
        self.years_in_role = 0;
        self.years_unemployed = 0;
    }
}
