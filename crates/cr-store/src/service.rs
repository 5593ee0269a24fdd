//! Collaborator interfaces
//!
//! Game code receives these as `Arc<dyn Trait>` instead of reaching for a
//! shared backend client. Every call is a single request/response that may
//! fail with [`StoreError`]; nothing here retries.

use crate::error::StoreError;
use crate::types::{
    Board, DailyChallenge, Difficulty, LeaderboardEntry, ModeScore, PuzzleSpec, SolutionRecord,
    UserId, UserStats,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

/// Supplies puzzles for every mode
#[async_trait]
pub trait PuzzleSource: Send + Sync {
    /// Challenge scheduled for `date`, if any
    async fn daily_challenge(&self, date: NaiveDate) -> Result<Option<DailyChallenge>, StoreError>;

    /// Up to `limit` puzzles of `difficulty` in random order
    async fn random_puzzles(
        &self,
        difficulty: Difficulty,
        limit: usize,
    ) -> Result<Vec<PuzzleSpec>, StoreError>;
}

/// Persists completion results
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Store a solved daily challenge and update the solver's stats
    async fn record_solution(&self, record: SolutionRecord) -> Result<(), StoreError>;

    /// Store a finished timed or endless session and update stats
    async fn record_mode_score(&self, score: ModeScore) -> Result<(), StoreError>;
}

/// Returns ranked completion records
#[async_trait]
pub trait LeaderboardService: Send + Sync {
    /// Top `limit` rows of `board`, best first
    async fn leaderboard(
        &self,
        board: Board,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, StoreError>;
}

/// Per-player statistics
#[async_trait]
pub trait StatsService: Send + Sync {
    /// Stats for `user`; zeroed when the player has none yet
    async fn user_stats(&self, user: UserId) -> Result<UserStats, StoreError>;
}

/// Shared puzzle source
pub type SharedPuzzleSource = Arc<dyn PuzzleSource>;
/// Shared result sink
pub type SharedResultSink = Arc<dyn ResultSink>;
/// Shared leaderboard service
pub type SharedLeaderboard = Arc<dyn LeaderboardService>;
/// Shared stats service
pub type SharedStats = Arc<dyn StatsService>;
