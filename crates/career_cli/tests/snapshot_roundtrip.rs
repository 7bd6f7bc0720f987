use career_cli::{build_league, inspect, load_snapshot, save_snapshot, simulate, synthetic_input};
use career_core::LifecycleConfig;
use tempfile::tempdir;

#[test]
fn test_simulation_is_reproducible() {
    let mut a = build_league(LifecycleConfig::realistic(), 6, 9, 2030).unwrap();
    let mut b = build_league(LifecycleConfig::realistic(), 6, 9, 2030).unwrap();
    let sa = simulate(&mut a, 6, 4, 9).unwrap();
    let sb = simulate(&mut b, 6, 4, 9).unwrap();
    assert_eq!(sa, sb);
    assert_eq!(a.registry(), b.registry());
    assert_eq!(a.next_season(), 2034);
}

#[test]
fn test_early_start_year_clamps_birth_years() {
    let orch = build_league(LifecycleConfig::realistic(), 2, 5, 10).unwrap();
    assert!(orch.registry().profiles().all(|p| p.birth_year <= 10));
    assert!(orch.registry().profiles().any(|p| p.birth_year == 0));
}

#[test]
fn test_snapshot_survives_disk_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("league.json");

    let mut orch = build_league(LifecycleConfig::volatile(), 4, 3, 2030).unwrap();
    simulate(&mut orch, 4, 3, 3).unwrap();
    save_snapshot(&orch, &path).unwrap();

    let mut restored = load_snapshot(&path).unwrap();
    assert_eq!(restored.registry(), orch.registry());
    assert_eq!(restored.market().state(), orch.market().state());

    // both copies keep evolving identically
    let next = orch.next_season();
    let r1 = orch.run_season(&synthetic_input(next, 3, 4)).unwrap();
    let r2 = restored.run_season(&synthetic_input(next, 3, 4)).unwrap();
    assert_eq!(r1, r2);
}

#[test]
fn test_inspect_prints_profile_and_summary() {
    let orch = build_league(LifecycleConfig::realistic(), 2, 1, 2030).unwrap();
    let card = inspect(&orch, Some(1)).unwrap();
    assert!(card.contains("\"role\": \"HeadCoach\""));
    let summary = inspect(&orch, None).unwrap();
    assert!(summary.contains("open_positions"));
    assert!(inspect(&orch, Some(999)).is_err());
}

#[test]
fn test_missing_snapshot_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(load_snapshot(&dir.path().join("nope.json")).is_err());
}
