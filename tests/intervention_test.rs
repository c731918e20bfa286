use chrono::{NaiveDate, NaiveDateTime};

use diet_balance_rs::intervention::{
    InterventionLevel, InterventionRecord, NotificationDispatcher,
};
use diet_balance_rs::models::{
    FoodCategory, FoodItem, FoodNutrientProfile, Nutrient, NutrientAmounts,
};
use diet_balance_rs::state::{load_state, save_state, TrackerState, UserRecord};
use tempfile::NamedTempFile;

struct Recording {
    calls: Vec<(u64, Nutrient)>,
    succeed: bool,
}

impl Recording {
    fn new() -> Self {
        Recording {
            calls: Vec::new(),
            succeed: true,
        }
    }
}

impl NotificationDispatcher for Recording {
    fn notify(&mut self, user_id: u64, record: &InterventionRecord) -> bool {
        self.calls.push((user_id, record.nutrient));
        self.succeed
    }
}

/// An apple covers almost nothing; protein stays severely deficient.
fn apple() -> FoodItem {
    let mut amounts = NutrientAmounts::new();
    amounts.set(Nutrient::Calories, 95.0);
    amounts.set(Nutrient::VitaminC, 8.4);
    FoodItem {
        id: 1,
        name: "Apple".to_string(),
        category: FoodCategory::Fruit,
        tags: Vec::new(),
        profile: FoodNutrientProfile {
            serving_size: 100.0,
            amounts,
        },
    }
}

/// Covers every nutrient at well over the daily target.
fn everything_bar() -> FoodItem {
    let mut amounts = NutrientAmounts::new();
    for nutrient in Nutrient::ALL {
        amounts.set(nutrient, 1e6);
    }
    FoodItem {
        id: 2,
        name: "Everything Bar".to_string(),
        category: FoodCategory::Other,
        tags: Vec::new(),
        profile: FoodNutrientProfile {
            serving_size: 100.0,
            amounts,
        },
    }
}

fn sample_state() -> TrackerState {
    let mut state = TrackerState::new();
    state.add_user(UserRecord {
        id: 1,
        name: "Ada".to_string(),
        body: None,
    });
    state.add_food(apple());
    state.add_food(everything_bar());
    state
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
}

fn noon(d: u32) -> NaiveDateTime {
    day(d).and_hms_opt(12, 0, 0).unwrap()
}

#[test]
fn test_streak_escalates_to_critical_and_notifies_once() {
    let mut state = sample_state();
    let mut dispatcher = Recording::new();

    for d in 1..=8 {
        state.log_entry(1, 1, 1.0, noon(d), None).unwrap();
        state.run_daily_batch(day(d), noon(d), &mut dispatcher);
    }

    let record = state.tracker().get(1, Nutrient::Protein).unwrap();
    assert_eq!(record.consecutive_days, 8);
    assert_eq!(record.level(), Some(InterventionLevel::Critical));
    assert!(record.notified);

    // One CRITICAL transition per deficient nutrient, never a repeat on day 8.
    let protein_calls = dispatcher
        .calls
        .iter()
        .filter(|(_, n)| *n == Nutrient::Protein)
        .count();
    assert_eq!(protein_calls, 1);
}

#[test]
fn test_nothing_surfaced_before_day_three() {
    let mut state = sample_state();
    let mut dispatcher = Recording::new();

    for d in 1..=2 {
        state.log_entry(1, 1, 1.0, noon(d), None).unwrap();
        let surfaced = state.run_daily_batch(day(d), noon(d), &mut dispatcher);
        assert!(surfaced.is_empty(), "day {} should surface nothing", d);
    }

    state.log_entry(1, 1, 1.0, noon(3), None).unwrap();
    let surfaced = state.run_daily_batch(day(3), noon(3), &mut dispatcher);
    assert!(!surfaced.is_empty());
    assert!(surfaced
        .iter()
        .all(|r| r.level() == Some(InterventionLevel::Normal)));
}

#[test]
fn test_good_intake_resolves_streak() {
    let mut state = sample_state();
    let mut dispatcher = Recording::new();

    for d in 1..=4 {
        state.log_entry(1, 1, 1.0, noon(d), None).unwrap();
        state.run_daily_batch(day(d), noon(d), &mut dispatcher);
    }
    assert!(state.tracker().get(1, Nutrient::Protein).is_some());

    state.log_entry(1, 2, 1.0, noon(5), None).unwrap();
    let surfaced = state.run_daily_batch(day(5), noon(5), &mut dispatcher);

    assert!(state.tracker().get(1, Nutrient::Protein).is_none());
    assert!(surfaced.is_empty());
    assert!(state
        .tracker()
        .resolved_history()
        .iter()
        .any(|r| r.record.nutrient == Nutrient::Protein && r.resolved_on == day(5)));
}

#[test]
fn test_rerun_same_date_changes_nothing() {
    let mut state = sample_state();
    let mut dispatcher = Recording::new();

    state.log_entry(1, 1, 1.0, noon(1), None).unwrap();
    state.run_daily_batch(day(1), noon(1), &mut dispatcher);
    let before = state.tracker().get(1, Nutrient::Protein).unwrap().clone();

    state.run_daily_batch(day(1), noon(1), &mut dispatcher);
    let after = state.tracker().get(1, Nutrient::Protein).unwrap();
    assert_eq!(after.consecutive_days, before.consecutive_days);
    assert_eq!(after.last_evaluated, before.last_evaluated);
}

#[test]
fn test_failed_notification_retries_next_run() {
    let mut state = sample_state();
    let mut failing = Recording::new();
    failing.succeed = false;

    for d in 1..=7 {
        state.log_entry(1, 1, 1.0, noon(d), None).unwrap();
        state.run_daily_batch(day(d), noon(d), &mut failing);
    }
    assert!(!state.tracker().get(1, Nutrient::Protein).unwrap().notified);

    let mut working = Recording::new();
    state.log_entry(1, 1, 1.0, noon(8), None).unwrap();
    state.run_daily_batch(day(8), noon(8), &mut working);
    assert!(state.tracker().get(1, Nutrient::Protein).unwrap().notified);
    assert_eq!(
        working
            .calls
            .iter()
            .filter(|(_, n)| *n == Nutrient::Protein)
            .count(),
        1
    );
}

#[test]
fn test_streak_survives_save_and_load() {
    let mut state = sample_state();
    let mut dispatcher = Recording::new();

    for d in 1..=3 {
        state.log_entry(1, 1, 1.0, noon(d), None).unwrap();
        state.run_daily_batch(day(d), noon(d), &mut dispatcher);
    }

    let file = NamedTempFile::new().unwrap();
    save_state(file.path(), &state).unwrap();
    let mut reloaded = load_state(file.path()).unwrap();

    // The streak continues seamlessly across a restart.
    reloaded.log_entry(1, 1, 1.0, noon(4), None).unwrap();
    reloaded.run_daily_batch(day(4), noon(4), &mut dispatcher);
    assert_eq!(
        reloaded
            .tracker()
            .get(1, Nutrient::Protein)
            .unwrap()
            .consecutive_days,
        4
    );
}

#[test]
fn test_users_tracked_independently() {
    let mut state = sample_state();
    state.add_user(UserRecord {
        id: 2,
        name: "Grace".to_string(),
        body: None,
    });
    let mut dispatcher = Recording::new();

    for d in 1..=3 {
        state.log_entry(1, 1, 1.0, noon(d), None).unwrap();
        state.log_entry(2, 2, 1.0, noon(d), None).unwrap();
        state.run_daily_batch(day(d), noon(d), &mut dispatcher);
    }

    assert!(state.tracker().get(1, Nutrient::Protein).is_some());
    assert!(state.tracker().get(2, Nutrient::Protein).is_none());
}
