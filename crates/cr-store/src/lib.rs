//! ChainReaction Store
//!
//! Interfaces to everything outside the chain engine: puzzle supply, result
//! persistence, leaderboards and player stats.
//!
//! # Overview
//!
//! - **Traits**: [`PuzzleSource`], [`ResultSink`], [`LeaderboardService`],
//!   [`StatsService`]; injected as `Arc<dyn _>`
//! - **Records**: [`PuzzleSpec`], [`DailyChallenge`], [`SolutionRecord`],
//!   [`ModeScore`], [`LeaderboardEntry`], [`UserStats`]
//! - **Backend**: [`MemoryStore`] implements all four traits in process and
//!   round-trips its records through [`StoreSnapshot`]
//!
//! # Example
//!
//! ```rust,ignore
//! use cr_store::{Board, LeaderboardService, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let rows = store.leaderboard(Board::Timed, 10).await?;
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod memory;
pub mod service;
pub mod types;

// Re-exports
pub use error::StoreError;
pub use memory::MemoryStore;
pub use service::{
    LeaderboardService, PuzzleSource, ResultSink, SharedLeaderboard, SharedPuzzleSource,
    SharedResultSink, SharedStats, StatsService,
};
pub use types::{
    Board, ChallengeId, DailyChallenge, DailyEntry, Difficulty, EndlessEntry, GameMode,
    LeaderboardEntry, ModeScore, Player, PuzzleSpec, SolutionRecord, StoreSnapshot, TimedEntry,
    UserId, UserStats, WeeklyEntry,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
