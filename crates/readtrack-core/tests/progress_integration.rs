//! Integration tests for the progress store.
//!
//! Covers the toggle algebra, percentage bounds, persistence round-trips
//! through SQLite, and recovery from corrupt persisted data.

use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use readtrack_core::{
    derive_stats, BuiltinSchedule, Database, DerivedStats, KvStorage, MemoryStorage,
    ProgressError, ProgressState, ProgressStore, ReadingUnit, Schedule, ScheduleProvider,
};

const KEY: &str = "bibleProgress";

fn schedule_of(ids: &[&str]) -> Schedule {
    Schedule::new(
        ids.iter()
            .map(|id| ReadingUnit::new(*id, "Plan", *id, 1))
            .collect(),
    )
    .unwrap()
}

fn id_strategy() -> impl Strategy<Value = String> {
    "[A-Z0-9]{1,4}"
}

fn state_strategy() -> impl Strategy<Value = ProgressState> {
    btree_map(id_strategy(), any::<bool>(), 0..24).prop_map(ProgressState::from)
}

proptest! {
    #[test]
    fn double_toggle_is_identity(s in state_strategy(), id in id_strategy()) {
        prop_assert_eq!(s.toggled(&id).toggled(&id), s);
    }

    #[test]
    fn toggles_on_different_ids_commute(
        s in state_strategy(),
        i in id_strategy(),
        j in id_strategy(),
    ) {
        prop_assume!(i != j);
        let ij = s.toggled(&i).toggled(&j);
        let ji = s.toggled(&j).toggled(&i);
        prop_assert_eq!(ij.entries(), ji.entries());
        prop_assert_eq!(ij, ji);
    }

    #[test]
    fn percentage_bounds(
        ids in vec(id_strategy(), 1..300),
        s in state_strategy(),
    ) {
        let mut unique = ids;
        unique.sort();
        unique.dedup();
        let refs: Vec<&str> = unique.iter().map(String::as_str).collect();
        let schedule = schedule_of(&refs);

        let stats = derive_stats(&s, &schedule);
        prop_assert!(stats.percentage <= 100);
        prop_assert_eq!(stats.percentage == 0, stats.completed == 0);
        prop_assert_eq!(stats.percentage == 100, stats.completed == stats.total);
    }

    #[test]
    fn percentage_bounds_on_large_schedules(total in 1usize..5000, completed in 0usize..5000) {
        let completed = completed.min(total);
        let pct = readtrack_core::progress::percentage(completed, total);
        prop_assert!(pct <= 100);
        prop_assert_eq!(pct == 0, completed == 0);
        prop_assert_eq!(pct == 100, completed == total);
    }

    #[test]
    fn save_then_load_round_trips(s in state_strategy()) {
        let storage = MemoryStorage::new();
        readtrack_core::progress::store::save(&storage, KEY, &s).unwrap();
        let loaded = readtrack_core::progress::store::load(&storage, KEY);
        prop_assert!(loaded.recovered.is_none());
        prop_assert_eq!(loaded.state.entries(), s.entries());
    }

    #[test]
    fn arbitrary_text_never_escapes_load(raw in ".*") {
        let storage = MemoryStorage::with_value(KEY, raw);
        let outcome = readtrack_core::progress::store::load(&storage, KEY);
        if outcome.recovered.is_some() {
            prop_assert!(outcome.state.is_empty());
        }
    }
}

#[test]
fn three_unit_scenario() {
    let schedule = schedule_of(&["A", "B", "C"]);
    let (mut store, recovered) = ProgressStore::open(MemoryStorage::new(), KEY);
    assert!(recovered.is_none());

    assert_eq!(
        store.stats(&schedule),
        DerivedStats {
            total: 3,
            completed: 0,
            percentage: 0
        }
    );

    store.toggle("A");
    assert_eq!(store.export().unwrap(), r#"{"A":true}"#);
    assert_eq!(
        store.stats(&schedule),
        DerivedStats {
            total: 3,
            completed: 1,
            percentage: 33
        }
    );

    store.toggle("A");
    assert_eq!(store.export().unwrap(), r#"{"A":false}"#);
    assert_eq!(
        store.stats(&schedule),
        DerivedStats {
            total: 3,
            completed: 0,
            percentage: 0
        }
    );
}

#[test]
fn stale_ids_are_ignored_by_stats() {
    let schedule = schedule_of(&["A", "B", "C"]);
    let storage = MemoryStorage::with_value(KEY, r#"{"A": true, "Z": true}"#);
    let (store, recovered) = ProgressStore::open(storage, KEY);

    assert!(recovered.is_none());
    assert!(store.is_completed("Z"));
    let stats = store.stats(&schedule);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 1);
}

#[test]
fn malformed_text_loads_empty() {
    let storage = MemoryStorage::with_value(KEY, "this is not json");
    let (store, recovered) = ProgressStore::open(storage, KEY);

    assert!(store.state().is_empty());
    assert!(matches!(
        recovered,
        Some(ProgressError::CorruptPersistedState { .. })
    ));
}

#[test]
fn corrupt_record_is_overwritten_on_next_toggle() {
    let storage = MemoryStorage::with_value(KEY, r#"{"GEN": "yes"}"#);
    let (mut store, recovered) = ProgressStore::open(storage, KEY);
    assert!(recovered.is_some());

    store.toggle("GEN").saved.unwrap();
    assert_eq!(store.storage().get(KEY).as_deref(), Some(r#"{"GEN":true}"#));
}

#[test]
fn sqlite_progress_survives_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("readtrack.db");
    let schedule = BuiltinSchedule.load_schedule().unwrap();

    {
        let (mut store, recovered) = ProgressStore::open(Database::open(&path).unwrap(), KEY);
        assert!(recovered.is_none());
        for id in ["GEN", "EXO", "MAT"] {
            assert!(store.toggle(id).saved.is_ok());
        }
        store.toggle("EXO");
    }

    let (store, recovered) = ProgressStore::open(Database::open(&path).unwrap(), KEY);
    assert!(recovered.is_none());
    assert!(store.is_completed("GEN"));
    assert!(!store.is_completed("EXO"));
    assert_eq!(
        store.stats(&schedule),
        DerivedStats {
            total: 66,
            completed: 2,
            percentage: 3
        }
    );
}

#[test]
fn sqlite_corrupt_record_recovers() {
    let db = Database::open_memory().unwrap();
    db.write(KEY, "[true, false]").unwrap();

    let (store, recovered) = ProgressStore::open(db, KEY);
    assert!(store.state().is_empty());
    assert!(recovered.is_some());
}

#[test]
fn keys_are_independent() {
    let storage = MemoryStorage::new();
    {
        let (mut store, _) = ProgressStore::open(&storage, "planA");
        store.toggle("GEN");
    }
    let (store, _) = ProgressStore::open(&storage, "planB");
    assert!(store.state().is_empty());
}
