//! Pieces shared by every mode
//!
//! [`Services`] bundles the injected collaborators and clock. Modes report
//! each submission as a [`RoundProgress`] and every write to the sink as a
//! [`RecordOutcome`], so a failed save never hides a finished chain.

use crate::error::ModeError;
use cr_core::{Accepted, Chain, Completion, SharedClock, SystemClock};
use cr_store::{
    ModeScore, PuzzleSource, PuzzleSpec, ResultSink, SharedPuzzleSource, SharedResultSink,
    StoreError,
};
use std::sync::Arc;

/// Collaborators a mode needs
#[derive(Clone)]
pub struct Services {
    /// Puzzle supply
    pub source: SharedPuzzleSource,
    /// Result persistence
    pub sink: SharedResultSink,
    /// Time source for chain timers
    pub clock: SharedClock,
}

impl Services {
    /// Create with the system clock
    #[must_use]
    pub fn new(source: SharedPuzzleSource, sink: SharedResultSink) -> Self {
        Self {
            source,
            sink,
            clock: SystemClock::shared(),
        }
    }

    /// Use one backend for both puzzles and results
    #[must_use]
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: PuzzleSource + ResultSink + 'static,
    {
        Self::new(store.clone(), store)
    }

    /// Replace the clock
    #[must_use]
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// Fresh chain for `puzzle`, timed by this clock
    ///
    /// # Errors
    /// [`ModeError::Chain`] if the puzzle is malformed.
    pub fn build_chain(&self, puzzle: &PuzzleSpec) -> Result<Chain, ModeError> {
        Ok(Chain::with_clock(
            &puzzle.start_word,
            &puzzle.end_word,
            puzzle.chain_length,
            self.clock.clone(),
        )?)
    }

    pub(crate) async fn record_mode_score(&self, score: ModeScore) -> RecordOutcome<ModeScore> {
        let result = self.sink.record_mode_score(score.clone()).await;
        RecordOutcome::from_result(score, result)
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

/// A record handed to the sink, with the save failure if there was one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome<T> {
    /// What was sent
    pub record: T,
    /// Why it was not stored
    pub save_error: Option<StoreError>,
}

impl<T> RecordOutcome<T> {
    pub(crate) fn from_result(record: T, result: Result<(), StoreError>) -> Self {
        let save_error = result.err();
        if let Some(error) = &save_error {
            tracing::warn!(%error, "failed to save result");
        }
        Self { record, save_error }
    }

    /// The sink accepted the record
    #[inline]
    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.save_error.is_none()
    }
}

/// Reward for a completed chain in a scoring mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cleared {
    /// Frozen chain metrics
    pub completion: Completion,
    /// Points added to the session score
    pub points: u32,
    /// Seconds added to the clock (timed mode only)
    pub bonus_secs: u64,
}

/// Result of one accepted submission in a scoring mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundProgress {
    /// Chain-level result
    pub step: Accepted,
    /// Set when this word completed the chain
    pub cleared: Option<Cleared>,
}
