//! Application configuration
//!
//! Loaded from a TOML file passed with `--config`; every section is
//! optional and falls back to its defaults.
//!
//! ```toml
//! [log]
//! filter = "info,cr_core=debug"
//! json = false
//!
//! [timed]
//! starting_secs = 180
//!
//! [endless]
//! batch_size = 5
//!
//! [leaderboard]
//! limit = 10
//!
//! [player]
//! username = "ana"
//!
//! [storage]
//! results = "chain-reaction.json"
//!
//! [[puzzles]]
//! start_word = "CAT"
//! end_word = "DOG"
//! chain_length = 4
//! difficulty = "easy"
//!
//! [[daily]]
//! date = "2026-10-19"
//! start_word = "COLD"
//! end_word = "WARM"
//! chain_length = 5
//! difficulty = "medium"
//! ```

use anyhow::Context;
use chrono::NaiveDate;
use cr_modes::{demo_puzzle, EndlessConfig, TimedConfig};
use crate::storage::{load_snapshot, save_snapshot};
use cr_store::{MemoryStore, PuzzleSpec, StoreSnapshot, UserId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Results file used when none is configured
pub const DEFAULT_RESULTS_FILE: &str = "chain-reaction.json";

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Leaderboard settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Rows shown per board
    pub limit: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

/// Local player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Name shown on leaderboards
    pub username: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            username: "player".to_string(),
        }
    }
}

/// Where results are kept between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON results file; `None` keeps everything in memory
    pub results: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            results: Some(PathBuf::from(DEFAULT_RESULTS_FILE)),
        }
    }
}

/// Puzzle pinned to a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledPuzzle {
    /// Day the puzzle is the daily challenge
    pub date: NaiveDate,
    /// The puzzle
    #[serde(flatten)]
    pub puzzle: PuzzleSpec,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging
    pub log: LogConfig,
    /// Timed mode
    pub timed: TimedConfig,
    /// Endless mode
    pub endless: EndlessConfig,
    /// Leaderboards
    pub leaderboard: LeaderboardConfig,
    /// Local player
    pub player: PlayerConfig,
    /// Results file
    pub storage: StorageConfig,
    /// Extra puzzles for the random pool
    pub puzzles: Vec<PuzzleSpec>,
    /// Daily challenges
    pub daily: Vec<ScheduledPuzzle>,
}

impl AppConfig {
    /// Read and parse a TOML file
    ///
    /// # Errors
    /// Unreadable file or invalid TOML.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// [`AppConfig::load`] when a path is given, defaults otherwise
    ///
    /// # Errors
    /// See [`AppConfig::load`].
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Set the log filter
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log.filter = filter.into();
        self
    }

    /// Set the player name
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.player.username = username.into();
        self
    }

    /// Set the results file, `None` for memory only
    #[must_use]
    pub fn with_results_file(mut self, path: Option<PathBuf>) -> Self {
        self.storage.results = path;
        self
    }

    /// Add a puzzle to the random pool
    #[must_use]
    pub fn with_puzzle(mut self, puzzle: PuzzleSpec) -> Self {
        self.puzzles.push(puzzle);
        self
    }

    /// Pin `puzzle` to `date`
    #[must_use]
    pub fn with_daily(mut self, date: NaiveDate, puzzle: PuzzleSpec) -> Self {
        self.daily.push(ScheduledPuzzle { date, puzzle });
        self
    }

    /// In-memory backend seeded from this configuration
    ///
    /// `today` gets the demo puzzle when no daily challenge is configured
    /// for it. Nothing is read from the results file.
    #[must_use]
    pub fn build_store(&self, today: NaiveDate) -> MemoryStore {
        self.seed(StoreSnapshot::default(), today)
    }

    /// [`AppConfig::build_store`] plus everything in the results file
    ///
    /// A date already scheduled in the file keeps its challenge, so
    /// recorded solutions stay attached to it.
    ///
    /// # Errors
    /// Unreadable or invalid results file.
    pub fn open_store(&self, today: NaiveDate) -> anyhow::Result<MemoryStore> {
        let snapshot = match &self.storage.results {
            Some(path) => load_snapshot(path)?,
            None => StoreSnapshot::default(),
        };
        Ok(self.seed(snapshot, today))
    }

    /// Write `store`'s records to the results file, if one is configured
    ///
    /// # Errors
    /// See [`save_snapshot`].
    pub fn save_store(&self, store: &MemoryStore) -> anyhow::Result<()> {
        match &self.storage.results {
            Some(path) => save_snapshot(path, store),
            None => Ok(()),
        }
    }

    /// ID of the configured player, registering a new one on first use
    #[must_use]
    pub fn player_id(&self, store: &MemoryStore) -> UserId {
        let username = &self.player.username;
        store.find_user(username).unwrap_or_else(|| {
            let user = UserId::new();
            store.register_user(user, username.clone());
            tracing::info!(%user, %username, "player registered");
            user
        })
    }

    fn seed(&self, snapshot: StoreSnapshot, today: NaiveDate) -> MemoryStore {
        let store = MemoryStore::new().with_puzzles(self.puzzles.iter().cloned());
        store.restore(snapshot);
        for scheduled in &self.daily {
            if !store.is_scheduled(scheduled.date) {
                store.schedule_daily(scheduled.date, scheduled.puzzle.clone());
            }
        }
        if !store.is_scheduled(today) {
            store.schedule_daily(today, demo_puzzle());
        }
        store
    }
}
