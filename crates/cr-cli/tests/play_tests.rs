//! Interactive loops driven from scripted input

use async_trait::async_trait;
use chrono::NaiveDate;
use cr_cli::play::{play_endless, play_timed};
use cr_modes::{EndlessConfig, EndlessRun, Services, TimedConfig, TimedRun};
use cr_store::{
    DailyChallenge, Difficulty, ModeScore, PuzzleSource, PuzzleSpec, ResultSink, SolutionRecord,
    StoreError, UserId,
};
use mockall::{mock, Sequence};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

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

fn cat_dog() -> PuzzleSpec {
    PuzzleSpec::new("CAT", "DOG", 4, Difficulty::Easy)
}

/// `results[i]` answers the i-th fetch; `true` serves CAT -> DOG, `false` fails
fn flaky_source(results: &[(bool, usize)]) -> MockSource {
    let mut seq = Sequence::new();
    let mut source = MockSource::new();
    for &(ok, times) in results {
        source
            .expect_random_puzzles()
            .times(times)
            .in_sequence(&mut seq)
            .returning(move |_, _| {
                if ok {
                    Ok(vec![cat_dog()])
                } else {
                    Err(StoreError::Unavailable("puzzle service down".into()))
                }
            });
    }
    source
}

#[tokio::test]
async fn test_timed_loop_refetches_after_failed_load() {
    // Fetch 2 fails after the first chain is cleared; fetch 3 runs at once
    let source = flaky_source(&[(true, 1), (false, 1), (true, 1)]);
    let services = Services::new(Arc::new(source), Arc::new(MockSink::new()));
    let run = TimedRun::start(services, UserId::new(), TimedConfig::default())
        .await
        .unwrap();

    let mut input = BufReader::new("COT\nCOG\nCOT\nquit\n".as_bytes()).lines();
    let result = play_timed(run, &mut input).await.unwrap();

    // Quit before time ran out records nothing
    assert!(result.is_none());
}

#[tokio::test]
async fn test_endless_loop_keeps_retrying_until_a_batch_arrives() {
    // Two failed fetches in a row: one right after clearing, one on the
    // immediate retry. The blank line retries again and succeeds.
    let source = flaky_source(&[(true, 1), (false, 2), (true, 2)]);
    let mut sink = MockSink::new();
    sink.expect_record_mode_score().times(1).returning(|_| Ok(()));

    let services = Services::new(Arc::new(source), Arc::new(sink));
    let config = EndlessConfig::default().with_batch_size(1);
    let run = EndlessRun::start(services, UserId::new(), config).await.unwrap();

    let mut input = BufReader::new("COT\nCOG\n\nCOT\nCOG\nquit\n".as_bytes()).lines();
    let saved = play_endless(run, &mut input).await.unwrap();

    assert!(saved.is_saved());
    assert_eq!(saved.record.chains_completed, 2);
}

#[tokio::test]
async fn test_quit_while_waiting_for_a_batch_still_records() {
    let source = flaky_source(&[(true, 1), (false, 3)]);
    let mut sink = MockSink::new();
    sink.expect_record_mode_score().times(1).returning(|_| Ok(()));

    let services = Services::new(Arc::new(source), Arc::new(sink));
    let config = EndlessConfig::default().with_batch_size(1);
    let run = EndlessRun::start(services, UserId::new(), config).await.unwrap();

    // The bare word after the failure is a retry, not a submission
    let mut input = BufReader::new("COT\nCOG\nCOT\nquit\n".as_bytes()).lines();
    let saved = play_endless(run, &mut input).await.unwrap();

    assert_eq!(saved.record.chains_completed, 1);
}
