//! Timed mode
//!
//! The player races a countdown. Each cleared chain adds points and bonus
//! seconds and raises the level; the level picks the next puzzle's
//! difficulty. The countdown only moves through [`TimedRun::tick`], so the
//! caller owns the real-time loop.

use crate::error::ModeError;
use crate::provision;
use crate::scoring;
use crate::session::{Cleared, RecordOutcome, RoundProgress, Services};
use chrono::Utc;
use cr_core::Chain;
use cr_store::{Difficulty, GameMode, ModeScore, PuzzleSpec, UserId};
use serde::{Deserialize, Serialize};

/// Seconds on the clock when a run starts
pub const DEFAULT_STARTING_SECS: u64 = 180;

/// Timed mode settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimedConfig {
    /// Initial countdown in seconds
    pub starting_secs: u64,
}

impl Default for TimedConfig {
    fn default() -> Self {
        Self {
            starting_secs: DEFAULT_STARTING_SECS,
        }
    }
}

impl TimedConfig {
    /// Set the initial countdown
    #[must_use]
    pub fn with_starting_secs(mut self, secs: u64) -> Self {
        self.starting_secs = secs;
        self
    }
}

#[derive(Debug)]
struct Round {
    puzzle: PuzzleSpec,
    chain: Chain,
}

/// One timed session
#[derive(Debug)]
pub struct TimedRun {
    services: Services,
    user: UserId,
    config: TimedConfig,
    remaining_secs: u64,
    score: u32,
    level: u32,
    chains_completed: u32,
    max_difficulty: Difficulty,
    round: Option<Round>,
    over: bool,
}

impl TimedRun {
    /// Start at level 1 with a full clock
    ///
    /// # Errors
    /// [`ModeError::Store`] or [`ModeError::Chain`] if the first puzzle
    /// cannot be loaded.
    pub async fn start(
        services: Services,
        user: UserId,
        config: TimedConfig,
    ) -> Result<Self, ModeError> {
        let mut run = Self {
            services,
            user,
            config,
            remaining_secs: config.starting_secs,
            score: 0,
            level: 1,
            chains_completed: 0,
            max_difficulty: Difficulty::Easy,
            round: None,
            over: false,
        };
        run.load_round().await?;
        tracing::info!(user = %user, secs = config.starting_secs, "timed run started");
        Ok(run)
    }

    /// Fetch a puzzle for the current level
    ///
    /// Called automatically after each cleared chain; call it again to
    /// retry after a failed fetch.
    ///
    /// # Errors
    /// [`ModeError::GameOver`] once time has run out, otherwise fetch or
    /// chain construction failures.
    pub async fn load_round(&mut self) -> Result<(), ModeError> {
        if self.over {
            return Err(ModeError::GameOver);
        }

        self.round = None;
        let difficulty = scoring::difficulty_for_level(self.level);
        let puzzle = provision::next_puzzle(self.services.source.as_ref(), difficulty).await?;
        let chain = self.services.build_chain(&puzzle)?;

        tracing::debug!(
            level = self.level,
            %difficulty,
            start = %puzzle.start_word,
            end = %puzzle.end_word,
            "timed round loaded"
        );
        self.max_difficulty = self.max_difficulty.max(puzzle.difficulty);
        self.round = Some(Round { puzzle, chain });
        Ok(())
    }

    /// Submit `word` for `slot` of the current chain
    ///
    /// Clearing a chain applies its reward and loads the next puzzle.
    ///
    /// # Errors
    /// - [`ModeError::GameOver`] after time ran out
    /// - [`ModeError::NoActiveChain`] when the last fetch failed
    /// - [`ModeError::Chain`] for rejected words
    /// - fetch failures for the next puzzle; the reward is already applied
    pub async fn submit(&mut self, slot: usize, word: &str) -> Result<RoundProgress, ModeError> {
        if self.over {
            return Err(ModeError::GameOver);
        }
        let round = self.round.as_mut().ok_or(ModeError::NoActiveChain)?;
        let step = round.chain.submit(slot, word)?;

        let completion = match (step.completed, round.chain.completion()) {
            (true, Some(done)) => done,
            _ => return Ok(RoundProgress { step, cleared: None }),
        };

        let difficulty = round.puzzle.difficulty;
        let cleared = Cleared {
            completion,
            points: scoring::points(difficulty),
            bonus_secs: scoring::time_bonus_secs(difficulty),
        };

        self.score = self.score.saturating_add(cleared.points);
        self.remaining_secs = self.remaining_secs.saturating_add(cleared.bonus_secs);
        self.level += 1;
        self.chains_completed += 1;

        tracing::info!(
            level = self.level,
            score = self.score,
            remaining_secs = self.remaining_secs,
            "timed chain cleared"
        );

        self.load_round().await?;
        Ok(RoundProgress {
            step,
            cleared: Some(cleared),
        })
    }

    /// Count down `secs`
    ///
    /// Returns the final score on the tick that reaches zero, and `None`
    /// before and after that.
    pub fn tick(&mut self, secs: u64) -> Option<ModeScore> {
        if self.over {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(secs);
        if self.remaining_secs > 0 {
            return None;
        }

        self.over = true;
        tracing::info!(
            score = self.score,
            level = self.level,
            chains = self.chains_completed,
            "timed run over"
        );
        Some(ModeScore {
            user: self.user,
            mode: GameMode::Timed,
            score: self.score,
            level_reached: Some(self.level),
            chains_completed: self.chains_completed,
            max_difficulty: self.max_difficulty,
            created_at: Utc::now(),
        })
    }

    /// Send a final score to the sink
    pub async fn record(&self, score: ModeScore) -> RecordOutcome<ModeScore> {
        self.services.record_mode_score(score).await
    }

    /// Back to level 1 with a full clock and a new puzzle
    ///
    /// # Errors
    /// Fetch or chain construction failures for the first puzzle.
    pub async fn restart(&mut self) -> Result<(), ModeError> {
        self.remaining_secs = self.config.starting_secs;
        self.score = 0;
        self.level = 1;
        self.chains_completed = 0;
        self.max_difficulty = Difficulty::Easy;
        self.over = false;
        tracing::info!(user = %self.user, "timed run restarted");
        self.load_round().await
    }

    /// Seconds left on the clock
    #[must_use]
    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Points so far
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current level, starting at 1
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Chains cleared this run
    #[must_use]
    pub fn chains_completed(&self) -> u32 {
        self.chains_completed
    }

    /// Time has run out
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Puzzle being played
    #[must_use]
    pub fn puzzle(&self) -> Option<&PuzzleSpec> {
        self.round.as_ref().map(|r| &r.puzzle)
    }

    /// Chain being played
    #[must_use]
    pub fn chain(&self) -> Option<&Chain> {
        self.round.as_ref().map(|r| &r.chain)
    }
}
