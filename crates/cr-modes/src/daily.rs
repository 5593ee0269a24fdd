//! Daily challenge
//!
//! One scheduled puzzle per date. Completing it sends a [`SolutionRecord`]
//! to the sink exactly once; the player keeps the completion even if that
//! save fails.

use crate::error::ModeError;
use crate::scoring;
use crate::session::{RecordOutcome, Services};
use chrono::{NaiveDate, Utc};
use cr_core::{Accepted, Chain, ChainEvent, SubscriptionId};
use cr_store::{DailyChallenge, SolutionRecord, UserId};

/// Result of one accepted daily submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyProgress {
    /// Chain-level result
    pub step: Accepted,
    /// Present once, on the submission that completed the chain
    pub saved: Option<RecordOutcome<SolutionRecord>>,
}

/// A player's attempt at one day's challenge
#[derive(Debug)]
pub struct DailyRun {
    services: Services,
    user: UserId,
    challenge: DailyChallenge,
    chain: Chain,
}

impl DailyRun {
    /// Load the challenge for `date` and build its chain
    ///
    /// # Errors
    /// - [`ModeError::NoChallenge`] when nothing is scheduled
    /// - [`ModeError::Store`] when the source fails
    /// - [`ModeError::Chain`] when the scheduled puzzle is malformed
    pub async fn start(
        services: Services,
        user: UserId,
        date: NaiveDate,
    ) -> Result<Self, ModeError> {
        let challenge = services
            .source
            .daily_challenge(date)
            .await?
            .ok_or(ModeError::NoChallenge(date))?;
        let chain = services.build_chain(&challenge.puzzle)?;

        tracing::info!(
            %date,
            challenge = %challenge.id,
            start = %challenge.puzzle.start_word,
            end = %challenge.puzzle.end_word,
            "daily challenge started"
        );

        Ok(Self {
            services,
            user,
            challenge,
            chain,
        })
    }

    /// Submit `word` for `slot`
    ///
    /// # Errors
    /// [`ModeError::Chain`] for rejected words, including any submission
    /// after completion.
    pub async fn submit(&mut self, slot: usize, word: &str) -> Result<DailyProgress, ModeError> {
        let step = self.chain.submit(slot, word)?;
        let saved = match (step.completed, self.chain.completion()) {
            (true, Some(done)) => {
                let record = SolutionRecord {
                    user: self.user,
                    challenge_id: self.challenge.id,
                    time_to_complete: done.elapsed_secs,
                    attempts: done.attempts,
                    solution: self
                        .chain
                        .snapshot()
                        .words()
                        .into_iter()
                        .map(String::from)
                        .collect(),
                    score: scoring::points(self.challenge.puzzle.difficulty),
                    completed_at: Utc::now(),
                };
                let result = self.services.sink.record_solution(record.clone()).await;
                Some(RecordOutcome::from_result(record, result))
            }
            _ => None,
        };

        Ok(DailyProgress { step, saved })
    }

    /// Scheduled challenge
    #[must_use]
    pub fn challenge(&self) -> &DailyChallenge {
        &self.challenge
    }

    /// Chain being solved
    #[must_use]
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Observe the chain's events
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&ChainEvent) + Send + 'static,
    {
        self.chain.subscribe(observer)
    }

    /// Player
    #[must_use]
    pub fn user(&self) -> UserId {
        self.user
    }
}
