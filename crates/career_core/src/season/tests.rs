//! Whole-tick scenarios.

use super::*;
use crate::career::{CareerProfile, DepartureReason, Reputation, Role};
use crate::config::{LifecycleConfig, RetirementWeights};
use crate::contract::{AwardKind, Buyout, CoachContract};
use crate::error::CareerError;
use crate::market::{ApplicationStatus, OfferStatus};
use crate::outcome::{SeasonRecord, TeamSeason};
use crate::retirement::RetirementReason;
use crate::types::{ProfileId, TeamId, Year};

/// No random firings, retirements only when forced, no outside candidates
/// and no poaching. Individual tests switch pieces back on.
fn quiet_config() -> LifecycleConfig {
    let mut cfg = LifecycleConfig::realistic();
    cfg.retirement.weights =
        RetirementWeights { age: 1.0, unemployment: 0.0, success: 0.0, health: 0.0, tenure: 0.0 };
    cfg.security.max_fire_chance = 0.0;
    cfg.market.ai_candidates_per_opening = 0;
    cfg.market.unsolicited_chance = 0.0;
    cfg
}

fn contract(years: u8, salary: u64) -> CoachContract {
    CoachContract::new(years, salary, Buyout::Percentage(0.5))
}

fn staff(id: u32, team: u32, role: Role, birth_year: Year, rep: f32, prior: u16, years: u8) -> CareerProfile {
    CareerProfile::established(
        ProfileId(id),
        format!("Staffer {}", id),
        birth_year,
        TeamId(team),
        role,
        contract(years, 1_000_000),
        2030,
        prior,
    )
    .unwrap()
    .with_reputation(Reputation::uniform(rep))
}

fn season(wins: u8, losses: u8) -> TeamSeason {
    TeamSeason::new(SeasonRecord::new(wins, losses, 0), "missed", false)
}

#[test]
fn test_two_candidates_one_opening() {
    let mut orch = LifecycleOrchestrator::new(quiet_config(), 2030).unwrap();
    let opening = orch.list_opening(TeamId(9), Role::AssistantCoach, 1).unwrap();
    orch.add_profile(CareerProfile::new(ProfileId(1), "First", 1995).with_prior_experience(3, 0));
    orch.add_profile(CareerProfile::new(ProfileId(2), "Second", 1995).with_prior_experience(3, 0));

    let report = orch.run_season(&SeasonInput::new(2030, 11)).unwrap();

    let hires: Vec<_> = report.events.iter().filter(|e| matches!(e, SeasonEvent::Hired { .. })).collect();
    assert_eq!(hires.len(), 1);
    assert_eq!(
        hires[0],
        &SeasonEvent::Hired { profile: ProfileId(1), team: TeamId(9), role: Role::AssistantCoach, opening }
    );
    assert!(!orch.market().opening(opening).unwrap().is_open());
    assert_eq!(orch.registry().get(ProfileId(1)).unwrap().team(), Some(TeamId(9)));
    assert_eq!(orch.registry().get(ProfileId(2)).unwrap().role(), Role::Unemployed);
    assert_eq!(orch.registry().holder_of(TeamId(9), Role::AssistantCoach), Some(ProfileId(1)));
}

#[test]
fn test_hire_starts_next_season() {
    let mut orch = LifecycleOrchestrator::new(quiet_config(), 2030).unwrap();
    orch.list_opening(TeamId(9), Role::Scout, 1).unwrap();
    orch.add_profile(CareerProfile::new(ProfileId(1), "Scout", 1995));
    orch.run_season(&SeasonInput::new(2030, 3)).unwrap();

    let p = orch.registry().get(ProfileId(1)).unwrap();
    assert_eq!(p.history().len(), 1);
    assert_eq!(p.history().latest().unwrap().year, 2031);
    assert_eq!(p.years_in_role(), 0);

    let input = SeasonInput::new(2031, 3).with_team_season(TeamId(9), season(9, 8));
    orch.run_season(&input).unwrap();
    let p = orch.registry().get(ProfileId(1)).unwrap();
    assert_eq!(p.history().entries()[0].record, Some(SeasonRecord::new(9, 8, 0)));
    assert_eq!(p.front_office_years(), 1);
    assert_eq!(p.years_in_role(), 1);
    assert_eq!(p.history().latest().unwrap().year, 2032);
}

#[test]
fn test_firing_promotes_from_within() {
    let mut cfg = quiet_config();
    cfg.security.max_fire_chance = 1.0;
    cfg.security.shortfall_scale = 100.0;
    cfg.security.junior_pressure = 0.0;
    let mut orch = LifecycleOrchestrator::new(cfg, 2030).unwrap();
    let mut head = staff(1, 1, Role::HeadCoach, 1980, 55.0, 10, 4);
    head.extend_contract(CoachContract::new(4, 5_000_000, Buyout::Percentage(0.5))).unwrap();
    orch.add_profile(head);
    orch.add_profile(staff(2, 1, Role::Coordinator, 1985, 60.0, 10, 3));

    let input = SeasonInput::new(2030, 5).with_team_season(TeamId(1), season(3, 14));
    let report = orch.run_season(&input).unwrap();

    assert_eq!(report.firings(), 1);
    assert!(report.events.contains(&SeasonEvent::Fired {
        profile: ProfileId(1),
        team: TeamId(1),
        role: Role::HeadCoach,
        buyout: 7_500_000,
    }));
    assert_eq!(report.promotions(), 1);

    let fired = orch.registry().get(ProfileId(1)).unwrap();
    assert_eq!(fired.role(), Role::Unemployed);
    assert_eq!(fired.times_fired(), 1);
    assert_eq!(fired.career_earnings(), 5_000_000 + 7_500_000);
    assert!(matches!(fired.history().entries()[0].departure, Some(DepartureReason::Fired(_))));

    let promoted = orch.registry().get(ProfileId(2)).unwrap();
    assert_eq!(promoted.role(), Role::HeadCoach);
    assert!(orch.market().find_open(TeamId(1), Role::Coordinator).is_some());
    assert!(orch.market().find_open(TeamId(1), Role::HeadCoach).is_none());
}

#[test]
fn test_forced_retirement_after_three_idle_years() {
    let mut orch = LifecycleOrchestrator::new(LifecycleConfig::realistic(), 2030).unwrap();
    let mut idle = CareerProfile::new(ProfileId(1), "Idle", 1975);
    for year in 2028..=2030 {
        idle.advance_tenure(year);
    }
    assert_eq!(idle.years_unemployed(), 3);
    orch.add_profile(idle);

    let report = orch.run_season(&SeasonInput::new(2030, 1)).unwrap();

    assert!(report
        .events
        .iter()
        .any(|e| matches!(e, SeasonEvent::Retired { profile: ProfileId(1), reason: RetirementReason::Unemployment, .. })));
    let p = orch.registry().get(ProfileId(1)).unwrap();
    assert!(p.is_retired());
    assert_eq!(p.retired_year(), Some(2030));
    assert!(orch.registry().active_ids().is_empty());
}

#[test]
fn test_expired_contracts_renew_or_depart() {
    let mut orch = LifecycleOrchestrator::new(quiet_config(), 2030).unwrap();
    orch.add_profile(staff(1, 1, Role::HeadCoach, 1975, 60.0, 12, 1));
    orch.add_profile(staff(2, 2, Role::HeadCoach, 1975, 30.0, 12, 1));

    let input = SeasonInput::new(2030, 8)
        .with_team_season(TeamId(1), season(12, 5))
        .with_team_season(TeamId(2), season(4, 13));
    let report = orch.run_season(&input).unwrap();

    assert!(report.events.iter().any(|e| matches!(e, SeasonEvent::ContractExtended { profile: ProfileId(1), .. })));
    let kept = orch.registry().get(ProfileId(1)).unwrap();
    assert_eq!(kept.role(), Role::HeadCoach);
    assert!(!kept.contract().unwrap().is_expired());

    let gone = orch.registry().get(ProfileId(2)).unwrap();
    assert_eq!(gone.role(), Role::Unemployed);
    assert_eq!(gone.times_fired(), 0);
    assert_eq!(gone.times_resigned(), 0);
    assert_eq!(gone.history().entries()[0].departure, Some(DepartureReason::ContractExpired));
    // the open seat is not handed straight back to the person who left it
    assert!(orch.market().find_open(TeamId(2), Role::HeadCoach).is_some());
}

#[test]
fn test_user_application_advances_one_stage_per_tick() {
    let mut orch = LifecycleOrchestrator::new(quiet_config(), 2030).unwrap();
    let opening = orch.list_opening(TeamId(4), Role::AssistantCoach, 2).unwrap();
    orch.add_profile(CareerProfile::new(ProfileId(1), "Player One", 1990).with_prior_experience(4, 0).as_user());
    let app = orch.submit_application(ProfileId(1), opening).unwrap();
    assert!(matches!(
        orch.submit_application(ProfileId(1), opening),
        Err(CareerError::DuplicateApplication { .. })
    ));

    orch.run_season(&SeasonInput::new(2030, 1)).unwrap();
    assert_eq!(orch.market().application(app).unwrap().status, ApplicationStatus::Interviewing);
    orch.run_season(&SeasonInput::new(2031, 1)).unwrap();
    assert_eq!(orch.market().application(app).unwrap().status, ApplicationStatus::Offered);

    // users are never auto-accepted
    assert_eq!(orch.registry().get(ProfileId(1)).unwrap().role(), Role::Unemployed);
    orch.respond_to_offer(app, true).unwrap();
    let p = orch.registry().get(ProfileId(1)).unwrap();
    assert_eq!(p.role(), Role::AssistantCoach);
    assert_eq!(p.history().latest().unwrap().year, 2032);
    assert_eq!(orch.market_summary().open_positions, 0);
}

#[test]
fn test_seat_left_by_accepted_application_is_listed_next_tick() {
    let mut orch = LifecycleOrchestrator::new(quiet_config(), 2030).unwrap();
    let opening = orch.list_opening(TeamId(2), Role::AssistantCoach, 2).unwrap();
    orch.add_profile(staff(1, 1, Role::AssistantCoach, 1990, 60.0, 4, 3).as_user());
    let app = orch.submit_application(ProfileId(1), opening).unwrap();

    orch.run_season(&SeasonInput::new(2030, 1)).unwrap();
    orch.run_season(&SeasonInput::new(2031, 1)).unwrap();
    assert_eq!(orch.market().application(app).unwrap().status, ApplicationStatus::Offered);
    assert!(orch.pending_vacancies().is_empty());

    orch.respond_to_offer(app, true).unwrap();
    assert_eq!(orch.registry().get(ProfileId(1)).unwrap().team(), Some(TeamId(2)));
    assert_eq!(orch.pending_vacancies(), &[(TeamId(1), Role::AssistantCoach)]);
    assert!(orch.market().find_open(TeamId(1), Role::AssistantCoach).is_none());

    let report = orch.run_season(&SeasonInput::new(2032, 1)).unwrap();
    let listed = orch.market().find_open(TeamId(1), Role::AssistantCoach).unwrap();
    assert!(report.events.contains(&SeasonEvent::OpeningListed {
        opening: listed,
        team: TeamId(1),
        role: Role::AssistantCoach,
    }));
    assert!(orch.pending_vacancies().is_empty());
}

#[test]
fn test_seat_left_by_accepted_unsolicited_offer_promotes_from_within() {
    let mut cfg = quiet_config();
    cfg.market.unsolicited_chance = 1.0;
    let mut orch = LifecycleOrchestrator::new(cfg, 2030).unwrap();
    orch.list_opening(TeamId(2), Role::HeadCoach, 2).unwrap();
    orch.add_profile(staff(1, 1, Role::Coordinator, 1980, 70.0, 10, 3).as_user());
    orch.add_profile(staff(2, 1, Role::PositionCoach, 1985, 60.0, 10, 3));

    let report = orch.run_season(&SeasonInput::new(2030, 4)).unwrap();
    assert!(report.events.iter().any(|e| matches!(e, SeasonEvent::OfferMade { profile: ProfileId(1), .. })));
    // users answer their own offers
    assert_eq!(orch.registry().get(ProfileId(1)).unwrap().role(), Role::Coordinator);
    let offer = orch.market().offers_for(ProfileId(1))[0].id;

    assert_eq!(orch.respond_to_unsolicited_offer(offer, true).unwrap(), OfferStatus::Accepted);
    let user = orch.registry().get(ProfileId(1)).unwrap();
    assert_eq!(user.role(), Role::HeadCoach);
    assert_eq!(user.team(), Some(TeamId(2)));
    assert_eq!(orch.pending_vacancies(), &[(TeamId(1), Role::Coordinator)]);

    let report = orch.run_season(&SeasonInput::new(2031, 4)).unwrap();
    assert!(report.events.contains(&SeasonEvent::Promoted {
        profile: ProfileId(2),
        team: TeamId(1),
        role: Role::Coordinator,
    }));
    assert_eq!(orch.registry().get(ProfileId(2)).unwrap().role(), Role::Coordinator);
    let listed = orch.market().find_open(TeamId(1), Role::PositionCoach).unwrap();
    assert!(report.events.contains(&SeasonEvent::OpeningListed {
        opening: listed,
        team: TeamId(1),
        role: Role::PositionCoach,
    }));
    assert!(orch.market().find_open(TeamId(1), Role::Coordinator).is_none());
    assert!(orch.pending_vacancies().is_empty());
}

#[test]
fn test_same_seed_same_outcome() {
    fn run() -> (Vec<SeasonReport>, String) {
        let mut orch = LifecycleOrchestrator::new(LifecycleConfig::volatile(), 2030).unwrap();
        let mut id = 1;
        for team in 1..=4u32 {
            for (role, birth) in [(Role::HeadCoach, 1968), (Role::Coordinator, 1980), (Role::GeneralManager, 1965)] {
                orch.add_profile(staff(id, team, role, birth, 50.0 + team as f32 * 5.0, 10, 2));
                id += 1;
            }
        }
        for n in 0..4 {
            orch.add_profile(CareerProfile::new(ProfileId(100 + n), format!("Free Agent {}", n), 1985));
        }
        let mut reports = Vec::new();
        for (i, year) in (2030..2034).enumerate() {
            let mut input = SeasonInput::new(year, 77);
            for team in 1..=4u32 {
                let wins = ((team as usize * 3 + i * 5) % 14) as u8 + 2;
                input = input.with_team_season(TeamId(team), season(wins, 17 - wins));
            }
            reports.push(orch.run_season(&input).unwrap());
        }
        let registry = serde_json::to_string(orch.registry()).unwrap();
        (reports, registry)
    }
    let (a_reports, a_registry) = run();
    let (b_reports, b_registry) = run();
    assert_eq!(a_reports, b_reports);
    assert_eq!(a_registry, b_registry);
}

#[test]
fn test_processed_season_is_rejected() {
    let mut orch = LifecycleOrchestrator::new(quiet_config(), 2030).unwrap();
    orch.add_profile(staff(1, 1, Role::HeadCoach, 1975, 60.0, 12, 3));
    orch.run_season(&SeasonInput::new(2030, 1)).unwrap();
    let before = orch.registry().clone();
    let err = orch.run_season(&SeasonInput::new(2030, 1)).unwrap_err();
    assert_eq!(err, CareerError::StaleSeason { year: 2030, next: 2031 });
    assert_eq!(err.code(), "STALE_SEASON");
    assert_eq!(orch.registry(), &before);
    assert_eq!(orch.next_season(), 2031);
}

#[test]
fn test_malformed_weights_block_the_tick() {
    let mut cfg = LifecycleConfig::realistic();
    cfg.retirement.weights.age = 0.9;
    let err = LifecycleOrchestrator::new(cfg, 2030).err().unwrap();
    assert!(matches!(err, CareerError::MalformedContract(_)));
    assert!(!err.is_recoverable());
}

#[test]
fn test_unknown_profile_is_skipped_not_fatal() {
    let mut orch = LifecycleOrchestrator::new(quiet_config(), 2030).unwrap();
    orch.add_profile(staff(1, 1, Role::HeadCoach, 1975, 60.0, 12, 3));
    let input = SeasonInput::new(2030, 1)
        .with_team_season(TeamId(1), season(10, 7))
        .with_award(ProfileId(42), AwardKind::CoachOfTheYear);
    let report = orch.run_season(&input).unwrap();
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].code, "UNKNOWN_PROFILE");
    assert_eq!(report.skipped[0].step, TickStep::CloseSeason);
    assert!(report.events.iter().any(|e| matches!(e, SeasonEvent::SeasonClosed { profile: ProfileId(1), .. })));
}
