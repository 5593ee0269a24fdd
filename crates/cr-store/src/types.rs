//! Records exchanged with the backend
//!
//! - Puzzles and daily challenges
//! - Completion results (daily solutions, timed/endless scores)
//! - Leaderboard rows and per-user stats

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Player identifier, issued by the auth provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate new random user ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Fallback display name when no username is registered
    #[must_use]
    pub fn short_name(&self) -> String {
        let simple = self.0.simple().to_string();
        format!("player-{}", &simple[..8])
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Daily challenge identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChallengeId(pub Uuid);

impl ChallengeId {
    /// Generate new challenge ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChallengeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Puzzle difficulty
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Four-letter words
    #[default]
    Easy,
    /// Five-letter words
    Medium,
    /// Six-letter words
    Hard,
}

impl Difficulty {
    /// All difficulties, easiest first
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Score multiplier
    #[inline]
    #[must_use]
    pub fn multiplier(self) -> u32 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    /// Next harder difficulty; hard stays hard
    #[inline]
    #[must_use]
    pub fn harder(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium | Self::Hard => Self::Hard,
        }
    }

    /// Lowercase name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Start word, end word and slot count for one chain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PuzzleSpec {
    /// Fixed first word
    pub start_word: String,
    /// Fixed last word
    pub end_word: String,
    /// Number of slots including both ends
    pub chain_length: usize,
    /// Difficulty band
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl PuzzleSpec {
    /// Create puzzle spec
    #[must_use]
    pub fn new(
        start_word: impl Into<String>,
        end_word: impl Into<String>,
        chain_length: usize,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            start_word: start_word.into(),
            end_word: end_word.into(),
            chain_length,
            difficulty,
        }
    }
}

/// Puzzle scheduled for a calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyChallenge {
    /// Challenge ID
    pub id: ChallengeId,
    /// Date the challenge is live
    pub date: NaiveDate,
    /// Puzzle to solve
    pub puzzle: PuzzleSpec,
}

/// A completed daily challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionRecord {
    /// Solver
    pub user: UserId,
    /// Challenge solved
    pub challenge_id: ChallengeId,
    /// Whole seconds from start to completion
    pub time_to_complete: u64,
    /// Submissions made
    pub attempts: u32,
    /// Full chain, start and end words included
    pub solution: Vec<String>,
    /// Points awarded
    pub score: u32,
    /// Completion timestamp
    pub completed_at: DateTime<Utc>,
}

/// Session-based game modes that produce a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Race the clock, earning time per chain
    Timed,
    /// Unlimited chains with rising difficulty
    Endless,
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timed => f.write_str("timed"),
            Self::Endless => f.write_str("endless"),
        }
    }
}

/// Final score of a timed or endless session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeScore {
    /// Player
    pub user: UserId,
    /// Mode played
    pub mode: GameMode,
    /// Points earned
    pub score: u32,
    /// Level reached (timed mode)
    pub level_reached: Option<u32>,
    /// Chains finished in the session
    pub chains_completed: u32,
    /// Hardest difficulty reached
    pub max_difficulty: Difficulty,
    /// When the session ended
    pub created_at: DateTime<Utc>,
}

/// Which leaderboard to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "board", content = "date", rename_all = "lowercase")]
pub enum Board {
    /// Fastest solvers of the given day's challenge
    Daily(NaiveDate),
    /// Highest summed daily scores over the seven days ending on the date
    Weekly(NaiveDate),
    /// Best timed-mode scores
    Timed,
    /// Best endless-mode scores
    Endless,
}

/// Daily leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// Display name
    pub username: String,
    /// Player
    pub user_id: UserId,
    /// Seconds to complete
    pub completion_time: u64,
    /// Completion timestamp
    pub completed_at: DateTime<Utc>,
    /// Submissions made
    pub attempts: u32,
}

/// Weekly leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyEntry {
    /// Display name
    pub username: String,
    /// Player
    pub user_id: UserId,
    /// Summed daily scores
    pub total_score: u32,
    /// Daily challenges solved in the window
    pub challenges_completed: u32,
}

/// Timed leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEntry {
    /// Display name
    pub username: String,
    /// Player
    pub user_id: UserId,
    /// Best session score
    pub high_score: u32,
    /// Highest level reached
    pub best_level: u32,
    /// Sessions played
    pub games_played: u32,
}

/// Endless leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndlessEntry {
    /// Display name
    pub username: String,
    /// Player
    pub user_id: UserId,
    /// Best session score
    pub high_score: u32,
    /// Chains finished across sessions
    pub chains_completed: u32,
    /// Hardest difficulty reached
    pub max_difficulty: Difficulty,
}

/// Ranked row of any leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "board", rename_all = "lowercase")]
pub enum LeaderboardEntry {
    /// See [`DailyEntry`]
    Daily(DailyEntry),
    /// See [`WeeklyEntry`]
    Weekly(WeeklyEntry),
    /// See [`TimedEntry`]
    Timed(TimedEntry),
    /// See [`EndlessEntry`]
    Endless(EndlessEntry),
}

impl LeaderboardEntry {
    /// Display name of the row's player
    #[must_use]
    pub fn username(&self) -> &str {
        match self {
            Self::Daily(e) => &e.username,
            Self::Weekly(e) => &e.username,
            Self::Timed(e) => &e.username,
            Self::Endless(e) => &e.username,
        }
    }

    /// Player of the row
    #[must_use]
    pub fn user_id(&self) -> UserId {
        match self {
            Self::Daily(e) => e.user_id,
            Self::Weekly(e) => e.user_id,
            Self::Timed(e) => e.user_id,
            Self::Endless(e) => e.user_id,
        }
    }
}

/// Aggregated per-player statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    /// Daily challenges solved
    pub challenges_completed: u32,
    /// Summed daily scores
    pub total_score: u32,
    /// Consecutive days with a solved daily challenge
    pub streak: u32,
    /// Most recent solved daily challenge
    pub last_completed_date: Option<NaiveDate>,
    /// Timed sessions played
    pub timed_games_played: u32,
    /// Chains finished in timed sessions
    pub timed_chains_completed: u32,
    /// Best timed score
    pub timed_high_score: u32,
    /// Highest timed level
    pub timed_best_level: u32,
    /// Endless sessions played
    pub endless_games_played: u32,
    /// Chains finished in endless sessions
    pub endless_chains_completed: u32,
    /// Best endless score
    pub endless_high_score: u32,
    /// Hardest endless difficulty reached
    pub endless_max_difficulty: Option<Difficulty>,
}

/// Display name registered for a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player ID
    pub user: UserId,
    /// Name shown on leaderboards
    pub username: String,
}

/// Everything players have produced, in a form that outlives the process
///
/// Stats are not stored; they are rebuilt from the records on restore.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSnapshot {
    /// Scheduled daily challenges, by date
    pub daily: Vec<DailyChallenge>,
    /// Daily solutions, oldest first
    pub solutions: Vec<SolutionRecord>,
    /// Finished timed and endless sessions, in recording order
    pub scores: Vec<ModeScore>,
    /// Registered display names
    pub players: Vec<Player>,
}

impl StoreSnapshot {
    /// Nothing recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
            && self.solutions.is_empty()
            && self.scores.is_empty()
            && self.players.is_empty()
    }
}
