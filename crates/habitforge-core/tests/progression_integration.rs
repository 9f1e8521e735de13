//! Integration tests for the habit progression workflow.
//!
//! These tests drive the [`Tracker`] facade the way a front end does and
//! check the resulting ledger and stored document.

use chrono::{NaiveDate, NaiveDateTime};
use habitforge_core::{
    CompletionKind, CoreError, Difficulty, Event, JsonFileStore, LedgerError, LedgerStore,
    MemoryStore, Periodicity, Progress, ProgressionLedger, ProgressionRules, Tracker,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn tracker_with(progress: Progress) -> Tracker<MemoryStore> {
    Tracker::with_ledger(ProgressionLedger::with_progress(progress), MemoryStore::new())
}

#[test]
fn test_daily_habit_first_days() {
    let mut tracker = Tracker::open(MemoryStore::new(), ProgressionRules::default());
    assert_eq!(tracker.level_and_exp(), (1, 0, 100));
    tracker.add_habit("Pushups", Periodicity::Daily).unwrap();

    let outcome = tracker.mark_habit_at("Pushups", at(2025, 3, 3, 7, 0)).unwrap();
    assert_eq!(outcome.completion.kind, CompletionKind::First);
    assert_eq!(outcome.completion.xp_gained, 10);
    assert_eq!(tracker.level_and_exp().1, 10);

    let outcome = tracker.mark_habit_at("Pushups", at(2025, 3, 3, 22, 0)).unwrap();
    assert!(!outcome.completion.was_completed);
    assert_eq!(tracker.level_and_exp().1, 10);

    let outcome = tracker.mark_habit_at("Pushups", at(2025, 3, 4, 6, 0)).unwrap();
    assert_eq!(outcome.completion.streak, 2);
    assert_eq!(tracker.level_and_exp().1, 20);
    assert_eq!(tracker.ledger().progress().coins, 20);
}

#[test]
fn test_streak_bonus_at_twenty_five() {
    let mut ledger = ProgressionLedger::new();
    ledger.add_habit("Pushups", Periodicity::Daily).unwrap();
    let start = at(2025, 1, 1, 8, 0);
    for day in 0..24 {
        ledger
            .mark_habit("Pushups", start + chrono::Duration::days(day))
            .unwrap();
    }
    assert_eq!(ledger.habit("Pushups").unwrap().current_streak(), 24);

    let outcome = ledger
        .mark_habit("Pushups", start + chrono::Duration::days(24))
        .unwrap();
    assert_eq!(outcome.completion.streak, 25);
    assert_eq!(outcome.completion.xp_gained, 15);
}

#[test]
fn test_level_up_at_threshold() {
    let mut tracker = tracker_with(Progress {
        total_xp: 90,
        ..Progress::default()
    });
    tracker.add_habit("Stretch", Periodicity::Daily).unwrap();

    let outcome = tracker.mark_habit_at("Stretch", at(2025, 5, 1, 9, 0)).unwrap();
    assert_eq!(outcome.levels_gained(), 1);
    assert!(matches!(
        outcome.events.last(),
        Some(Event::LeveledUp {
            level: 2,
            current_hp: 15,
            exp_needed: 150
        })
    ));

    let progress = tracker.ledger().progress();
    assert_eq!(progress.level, 2);
    assert_eq!(progress.total_xp, 0);
    assert_eq!(progress.exp_needed, 150);
    assert_eq!(progress.current_hp, 15);
}

#[test]
fn test_reward_exchange_success_and_shortfall() {
    let mut tracker = tracker_with(Progress {
        total_xp: 120,
        ..Progress::default()
    });
    tracker.create_reward("Movie Night", Difficulty::Medium).unwrap();

    let now = at(2025, 6, 1, 20, 0);
    let redemption = tracker.exchange_reward_at("Movie Night", now).unwrap();
    assert_eq!(redemption.remaining_xp, 20);
    assert_eq!(tracker.rewards()[0].last_exchanged, Some(now));

    let mut tracker = tracker_with(Progress {
        total_xp: 50,
        ..Progress::default()
    });
    tracker.create_reward("Movie Night", Difficulty::Medium).unwrap();
    let before = tracker.ledger().clone();
    let saves = tracker.store().saves();

    let err = tracker.exchange_reward_at("Movie Night", now).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Ledger(LedgerError::InsufficientXp {
            cost: 100,
            available: 50,
            ..
        })
    ));
    assert_eq!(tracker.ledger(), &before);
    assert_eq!(tracker.store().saves(), saves + 1);
}

#[test]
fn test_weekly_habit_continues_then_breaks() {
    let mut tracker = Tracker::open(MemoryStore::new(), ProgressionRules::default());
    tracker.add_habit("Reading", Periodicity::Weekly).unwrap();

    // Monday 2025-03-03
    tracker.mark_habit_at("Reading", at(2025, 3, 3, 21, 0)).unwrap();
    // Sunday 2025-03-16 is in the following calendar week
    let outcome = tracker.mark_habit_at("Reading", at(2025, 3, 16, 21, 0)).unwrap();
    assert_eq!(outcome.completion.kind, CompletionKind::Continued);
    assert_eq!(outcome.completion.xp_gained, 30);

    // Monday 2025-03-31, two weeks after the 2025-03-10 week
    let outcome = tracker.mark_habit_at("Reading", at(2025, 3, 31, 21, 0)).unwrap();
    assert_eq!(outcome.completion.kind, CompletionKind::Broken);
    assert_eq!(tracker.habits()[0].current_streak(), 1);
}

#[test]
fn test_json_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habits.json");

    let mut tracker = Tracker::open(JsonFileStore::new(&path), ProgressionRules::default());
    tracker.add_habit("Pushups", Periodicity::Daily).unwrap();
    tracker.add_habit("Reading", Periodicity::Weekly).unwrap();
    tracker.create_reward("Cake", Difficulty::Easy).unwrap();
    tracker.mark_habit_at("Pushups", at(2025, 2, 1, 8, 15)).unwrap();
    tracker.mark_habit_at("Reading", at(2025, 2, 1, 9, 45)).unwrap();
    let original = tracker.ledger().clone();

    let reloaded = JsonFileStore::new(&path).load().unwrap().unwrap();
    assert_eq!(reloaded, original);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["habits"][0]["last_completed"], "2025-02-01 08:15:00");
    assert_eq!(raw["rewards"][0]["last_exchanged"], serde_json::Value::Null);
    assert_eq!(raw["total_xp"], 40);
    assert_eq!(raw["coins"], 20);
}

#[test]
fn test_malformed_file_starts_fresh_and_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habits.json");
    std::fs::write(&path, "not json at all").unwrap();

    let mut tracker = Tracker::open(JsonFileStore::new(&path), ProgressionRules::default());
    assert!(tracker.habits().is_empty());
    tracker.add_habit("Walk", Periodicity::Daily).unwrap();

    let reloaded = JsonFileStore::new(&path).load().unwrap().unwrap();
    assert_eq!(reloaded.habits().len(), 1);
}

#[test]
fn test_configured_rules_apply_after_load() {
    let rules = ProgressionRules {
        coins_per_completion: 3,
        ..ProgressionRules::default()
    };
    let mut tracker = Tracker::open(MemoryStore::new(), rules);
    tracker.add_habit("Walk", Periodicity::Daily).unwrap();
    let outcome = tracker.mark_habit_at("Walk", at(2025, 2, 1, 8, 0)).unwrap();
    assert_eq!(outcome.coins_gained, 3);
    assert_eq!(tracker.view_statistics().coins, 3);
}
