//! Testing utilities for the ChainReaction workspace
//!
//! Shared fixtures for chains, clocks and a seeded in-memory store.

#![allow(missing_docs)]

use chrono::NaiveDate;
use cr_core::{Chain, ManualClock, SharedClock};
use cr_store::{ChallengeId, Difficulty, MemoryStore, PuzzleSpec};
use std::sync::{Arc, Mutex};

/// Completion callbacks seen so far, as `(attempts, elapsed_secs)`
pub type Fired = Arc<Mutex<Vec<(u32, u64)>>>;

pub fn manual_clock() -> (Arc<ManualClock>, SharedClock) {
    let clock = Arc::new(ManualClock::new());
    let shared: SharedClock = clock.clone();
    (clock, shared)
}

/// CAT -> _ -> _ -> DOG on a manual clock
pub fn cat_dog_chain() -> (Chain, Arc<ManualClock>) {
    let (clock, shared) = manual_clock();
    let chain = Chain::with_clock("CAT", "DOG", 4, shared).unwrap();
    (chain, clock)
}

/// Callback for `on_complete` that records every invocation
pub fn completion_recorder() -> (Fired, impl FnMut(u32, u64) + Send + 'static) {
    let fired: Fired = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&fired);
    let callback = move |attempts, secs| sink.lock().unwrap().push((attempts, secs));
    (fired, callback)
}

pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

/// COLD -> CORD -> CARD -> WARD -> WARM
pub fn cold_warm() -> PuzzleSpec {
    PuzzleSpec::new("COLD", "WARM", 5, Difficulty::Medium)
}

pub fn cold_warm_solution() -> Vec<&'static str> {
    vec!["CORD", "CARD", "WARD"]
}

/// One puzzle per difficulty
pub fn sample_puzzles() -> Vec<PuzzleSpec> {
    vec![
        PuzzleSpec::new("CAT", "DOG", 4, Difficulty::Easy),
        cold_warm(),
        PuzzleSpec::new("SHIP", "DOCK", 6, Difficulty::Hard),
    ]
}

pub fn seeded_store() -> MemoryStore {
    MemoryStore::new().with_puzzles(sample_puzzles())
}

/// Seeded store with [`cold_warm`] scheduled on `date`
pub fn store_with_daily(date: NaiveDate) -> (MemoryStore, ChallengeId) {
    let store = seeded_store();
    let id = store.schedule_daily(date, cold_warm());
    (store, id)
}
