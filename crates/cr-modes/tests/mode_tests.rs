//! Game-mode tests against mocked collaborators
//!
//! The in-memory store covers the happy paths; mocks cover failures the
//! store cannot produce on demand.

use async_trait::async_trait;
use chrono::NaiveDate;
use cr_core::{ChainError, ManualClock};
use cr_modes::prelude::*;
use cr_store::{
    DailyChallenge, Difficulty, ModeScore, PuzzleSource, PuzzleSpec, ResultSink, SolutionRecord,
    StatsService, StoreError, UserId,
};
use cr_test_utils::{cold_warm, cold_warm_solution, fixed_date, store_with_daily};
use mockall::mock;
use mockall::predicate::always;
use pretty_assertions::assert_eq;
use std::sync::Arc;

mock! {
    pub Source {}

    #[async_trait]
    impl PuzzleSource for Source {
        async fn daily_challenge(&self, date: NaiveDate) -> Result<Option<DailyChallenge>, StoreError>;
        async fn random_puzzles(&self, difficulty: Difficulty, limit: usize) -> Result<Vec<PuzzleSpec>, StoreError>;
    }
}

mock! {
    pub Sink {}

    #[async_trait]
    impl ResultSink for Sink {
        async fn record_solution(&self, record: SolutionRecord) -> Result<(), StoreError>;
        async fn record_mode_score(&self, score: ModeScore) -> Result<(), StoreError>;
    }
}

fn manual_services(
    source: Arc<dyn PuzzleSource>,
    sink: Arc<dyn ResultSink>,
) -> (Services, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    (Services::new(source, sink).with_clock(clock.clone()), clock)
}

#[tokio::test]
async fn test_daily_run_saves_solution() {
    let (store, challenge) = store_with_daily(fixed_date());
    let store = Arc::new(store);
    let (services, clock) = manual_services(store.clone(), store.clone());
    let user = UserId::new();

    let mut run = DailyRun::start(services, user, fixed_date()).await.unwrap();
    assert_eq!(run.challenge().id, challenge);

    let words = cold_warm_solution();
    let mut saved = None;
    for (i, word) in words.iter().enumerate() {
        clock.advance_secs(5);
        let progress = run.submit(i + 1, word).await.unwrap();
        saved = progress.saved;
    }

    let saved = saved.expect("completion should save");
    assert!(saved.is_saved());
    assert_eq!(saved.record.time_to_complete, 15);
    assert_eq!(saved.record.attempts, 3);
    assert_eq!(saved.record.score, 200);
    assert_eq!(
        saved.record.solution,
        vec!["COLD", "CORD", "CARD", "WARD", "WARM"]
    );

    let stats = store.user_stats(user).await.unwrap();
    assert_eq!(stats.challenges_completed, 1);
    assert_eq!(stats.streak, 1);
}

#[tokio::test]
async fn test_daily_run_without_challenge() {
    let (store, _) = store_with_daily(fixed_date());
    let store = Arc::new(store);
    let other_day = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();

    let err = DailyRun::start(Services::from_store(store), UserId::new(), other_day)
        .await
        .unwrap_err();
    assert_eq!(err, ModeError::NoChallenge(other_day));
}

#[tokio::test]
async fn test_daily_sink_failure_keeps_completion() {
    let mut source = MockSource::new();
    source.expect_daily_challenge().returning(|date| {
        Ok(Some(DailyChallenge {
            id: cr_store::ChallengeId::new(),
            date,
            puzzle: cold_warm(),
        }))
    });

    let mut sink = MockSink::new();
    sink.expect_record_solution()
        .with(always())
        .times(1)
        .returning(|_| Err(StoreError::Unavailable("backend down".into())));

    let (services, _clock) = manual_services(Arc::new(source), Arc::new(sink));
    let mut run = DailyRun::start(services, UserId::new(), fixed_date())
        .await
        .unwrap();

    run.submit(1, "cord").await.unwrap();
    run.submit(2, "card").await.unwrap();
    let last = run.submit(3, "ward").await.unwrap();

    let saved = last.saved.expect("completion reported");
    assert_eq!(
        saved.save_error,
        Some(StoreError::Unavailable("backend down".into()))
    );
    assert!(run.chain().is_complete());

    // Already complete; the sink is not called again
    let err = run.submit(1, "CORD").await.unwrap_err();
    assert_eq!(err, ModeError::Chain(ChainError::AlreadyComplete));
}

#[tokio::test]
async fn test_rejected_daily_word_is_not_saved() {
    let (store, _) = store_with_daily(fixed_date());
    let store = Arc::new(store);
    let mut run = DailyRun::start(Services::from_store(store), UserId::new(), fixed_date())
        .await
        .unwrap();

    let err = run.submit(1, "WARM").await.unwrap_err();
    assert!(err.is_recoverable());
    assert_eq!(run.chain().attempts(), 1);
}

#[tokio::test]
async fn test_timed_source_failure_surfaces() {
    let mut source = MockSource::new();
    source
        .expect_random_puzzles()
        .returning(|_, _| Err(StoreError::Unavailable("timeout".into())));
    let sink = MockSink::new();

    let (services, _clock) = manual_services(Arc::new(source), Arc::new(sink));
    let err = TimedRun::start(services, UserId::new(), TimedConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ModeError::Store(StoreError::Unavailable(_))));
}

#[tokio::test]
async fn test_timed_run_uses_requested_difficulty() {
    let mut source = MockSource::new();
    source
        .expect_random_puzzles()
        .withf(|difficulty, limit| *difficulty == Difficulty::Easy && *limit == 1)
        .times(1)
        .returning(|_, _| Ok(vec![PuzzleSpec::new("CAT", "DOG", 4, Difficulty::Easy)]));

    let (services, _clock) = manual_services(Arc::new(source), Arc::new(MockSink::new()));
    let config = TimedConfig::default().with_starting_secs(60);
    let run = TimedRun::start(services, UserId::new(), config)
        .await
        .unwrap();
    assert_eq!(run.remaining_secs(), 60);
    assert_eq!(run.puzzle().unwrap().start_word, "CAT");
}

#[tokio::test]
async fn test_endless_sink_failure_is_reported() {
    let mut source = MockSource::new();
    source
        .expect_random_puzzles()
        .returning(|_, _| Ok(Vec::new()));
    let mut sink = MockSink::new();
    sink.expect_record_mode_score()
        .times(1)
        .returning(|_| Err(StoreError::Conflict("duplicate".into())));

    let (services, _clock) = manual_services(Arc::new(source), Arc::new(sink));
    let mut run = EndlessRun::start(services, UserId::new(), EndlessConfig::default())
        .await
        .unwrap();

    let ended = run.end().await.unwrap();
    assert!(!ended.is_saved());
    assert_eq!(ended.record.score, 0);
    assert!(run.is_ended());
}
