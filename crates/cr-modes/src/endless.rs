//! Endless mode
//!
//! Puzzles arrive in batches of one difficulty. When a batch runs out the
//! difficulty steps up if the completed-chain count is a multiple of
//! [`ESCALATE_EVERY`], then a fresh batch is fetched. The session lasts until
//! the player calls [`EndlessRun::end`].

use crate::error::ModeError;
use crate::provision;
use crate::scoring;
use crate::session::{Cleared, RecordOutcome, RoundProgress, Services};
use chrono::Utc;
use cr_core::Chain;
use cr_store::{Difficulty, GameMode, ModeScore, PuzzleSpec, UserId};
use serde::{Deserialize, Serialize};

/// Puzzles requested per batch
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Completed chains between difficulty steps
pub const ESCALATE_EVERY: u32 = 5;

/// Endless mode settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndlessConfig {
    /// Puzzles requested per batch
    pub batch_size: usize,
}

impl Default for EndlessConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl EndlessConfig {
    /// Set the batch size
    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }
}

/// One endless session
#[derive(Debug)]
pub struct EndlessRun {
    services: Services,
    user: UserId,
    config: EndlessConfig,
    difficulty: Difficulty,
    batch: Vec<PuzzleSpec>,
    index: usize,
    chain: Option<Chain>,
    score: u32,
    chains_completed: u32,
    ended: bool,
}

impl EndlessRun {
    /// Start on easy puzzles
    ///
    /// # Errors
    /// Fetch or chain construction failures for the first batch.
    pub async fn start(
        services: Services,
        user: UserId,
        config: EndlessConfig,
    ) -> Result<Self, ModeError> {
        let mut run = Self {
            services,
            user,
            config,
            difficulty: Difficulty::Easy,
            batch: Vec::new(),
            index: 0,
            chain: None,
            score: 0,
            chains_completed: 0,
            ended: false,
        };
        run.load_batch().await?;
        tracing::info!(user = %user, batch = run.batch.len(), "endless run started");
        Ok(run)
    }

    /// Fetch a new batch at the current difficulty and load its first puzzle
    ///
    /// # Errors
    /// [`ModeError::GameOver`] after [`EndlessRun::end`], otherwise fetch or
    /// chain construction failures.
    pub async fn load_batch(&mut self) -> Result<(), ModeError> {
        if self.ended {
            return Err(ModeError::GameOver);
        }

        self.chain = None;
        self.batch = provision::next_batch(
            self.services.source.as_ref(),
            self.difficulty,
            self.config.batch_size,
        )
        .await?;
        self.index = 0;
        self.load_current()
    }

    fn load_current(&mut self) -> Result<(), ModeError> {
        self.chain = None;
        let puzzle = self.batch.get(self.index).ok_or(ModeError::NoActiveChain)?;
        self.chain = Some(self.services.build_chain(puzzle)?);
        tracing::debug!(
            index = self.index,
            difficulty = %self.difficulty,
            start = %puzzle.start_word,
            end = %puzzle.end_word,
            "endless puzzle loaded"
        );
        Ok(())
    }

    /// Submit `word` for `slot` of the current chain
    ///
    /// # Errors
    /// - [`ModeError::GameOver`] after the session ended
    /// - [`ModeError::NoActiveChain`] when the last fetch failed
    /// - [`ModeError::Chain`] for rejected words
    /// - fetch failures for the next batch; the reward is already applied
    pub async fn submit(&mut self, slot: usize, word: &str) -> Result<RoundProgress, ModeError> {
        if self.ended {
            return Err(ModeError::GameOver);
        }
        let chain = self.chain.as_mut().ok_or(ModeError::NoActiveChain)?;
        let step = chain.submit(slot, word)?;

        let completion = match (step.completed, chain.completion()) {
            (true, Some(done)) => done,
            _ => return Ok(RoundProgress { step, cleared: None }),
        };

        let cleared = Cleared {
            completion,
            points: scoring::points(self.difficulty),
            bonus_secs: 0,
        };
        self.score = self.score.saturating_add(cleared.points);
        self.chains_completed += 1;

        if self.index + 1 < self.batch.len() {
            self.index += 1;
            self.load_current()?;
        } else {
            if self.chains_completed % ESCALATE_EVERY == 0 {
                let next = self.difficulty.harder();
                if next != self.difficulty {
                    tracing::info!(from = %self.difficulty, to = %next, "endless difficulty raised");
                }
                self.difficulty = next;
            }
            self.load_batch().await?;
        }

        Ok(RoundProgress {
            step,
            cleared: Some(cleared),
        })
    }

    /// Finish the session and send its score to the sink
    ///
    /// # Errors
    /// [`ModeError::GameOver`] if already ended.
    pub async fn end(&mut self) -> Result<RecordOutcome<ModeScore>, ModeError> {
        if self.ended {
            return Err(ModeError::GameOver);
        }
        self.ended = true;

        tracing::info!(
            score = self.score,
            chains = self.chains_completed,
            difficulty = %self.difficulty,
            "endless run ended"
        );
        let score = ModeScore {
            user: self.user,
            mode: GameMode::Endless,
            score: self.score,
            level_reached: None,
            chains_completed: self.chains_completed,
            max_difficulty: self.difficulty,
            created_at: Utc::now(),
        };
        Ok(self.services.record_mode_score(score).await)
    }

    /// Difficulty of the current batch
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Points so far
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Chains cleared this session
    #[must_use]
    pub fn chains_completed(&self) -> u32 {
        self.chains_completed
    }

    /// Session has been ended
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Puzzle being played
    #[must_use]
    pub fn puzzle(&self) -> Option<&PuzzleSpec> {
        self.chain.as_ref().and_then(|_| self.batch.get(self.index))
    }

    /// Chain being played
    #[must_use]
    pub fn chain(&self) -> Option<&Chain> {
        self.chain.as_ref()
    }

    /// Position in the current batch and its size
    #[must_use]
    pub fn batch_position(&self) -> (usize, usize) {
        (self.index, self.batch.len())
    }
}
