//! In-memory backend
//!
//! Implements every collaborator trait over concurrent maps. Used by the CLI
//! and by tests; leaderboard ordering follows the hosted backend's queries.

use crate::error::StoreError;
use crate::service::{LeaderboardService, PuzzleSource, ResultSink, StatsService};
use crate::types::{
    Board, ChallengeId, DailyChallenge, DailyEntry, Difficulty, EndlessEntry, GameMode,
    LeaderboardEntry, ModeScore, Player, PuzzleSpec, SolutionRecord, StoreSnapshot, TimedEntry,
    UserId, UserStats, WeeklyEntry,
};
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Days covered by the weekly board, end date included
const WEEKLY_WINDOW_DAYS: u64 = 7;

/// Process-local backend
#[derive(Debug, Default)]
pub struct MemoryStore {
    puzzles: RwLock<Vec<PuzzleSpec>>,
    daily: DashMap<NaiveDate, DailyChallenge>,
    solutions: DashMap<(UserId, ChallengeId), SolutionRecord>,
    scores: RwLock<Vec<ModeScore>>,
    stats: DashMap<UserId, UserStats>,
    usernames: DashMap<UserId, String>,
    offline: AtomicBool,
}

impl MemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with puzzles
    #[must_use]
    pub fn with_puzzles(self, puzzles: impl IntoIterator<Item = PuzzleSpec>) -> Self {
        self.puzzles.write().extend(puzzles);
        self
    }

    /// Add one puzzle to the random pool
    pub fn add_puzzle(&self, puzzle: PuzzleSpec) {
        self.puzzles.write().push(puzzle);
    }

    /// Schedule `puzzle` as the challenge for `date`, replacing any existing one
    pub fn schedule_daily(&self, date: NaiveDate, puzzle: PuzzleSpec) -> ChallengeId {
        let id = ChallengeId::new();
        self.daily.insert(date, DailyChallenge { id, date, puzzle });
        tracing::debug!(%date, challenge = %id, "daily challenge scheduled");
        id
    }

    /// Set the display name for `user`
    pub fn register_user(&self, user: UserId, username: impl Into<String>) {
        self.usernames.insert(user, username.into());
    }

    /// Whether a challenge is scheduled for `date`
    #[inline]
    #[must_use]
    pub fn is_scheduled(&self, date: NaiveDate) -> bool {
        self.daily.contains_key(&date)
    }

    /// Player registered under `username`
    #[must_use]
    pub fn find_user(&self, username: &str) -> Option<UserId> {
        self.usernames
            .iter()
            .filter(|entry| entry.value() == username)
            .map(|entry| *entry.key())
            .min()
    }

    /// Copy out schedule, results and names
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        let mut daily: Vec<DailyChallenge> = self.daily.iter().map(|c| c.value().clone()).collect();
        daily.sort_by_key(|c| c.date);

        let mut solutions: Vec<SolutionRecord> =
            self.solutions.iter().map(|s| s.value().clone()).collect();
        solutions.sort_by(|a, b| a.completed_at.cmp(&b.completed_at).then(a.user.cmp(&b.user)));

        let mut players: Vec<Player> = self
            .usernames
            .iter()
            .map(|entry| Player {
                user: *entry.key(),
                username: entry.value().clone(),
            })
            .collect();
        players.sort_by_key(|p| p.user);

        StoreSnapshot {
            daily,
            solutions,
            scores: self.scores.read().clone(),
            players,
        }
    }

    /// Load a snapshot, rebuilding stats from its records
    ///
    /// Challenges and names replace what is already stored for the same key.
    /// A solution already present for its `(user, challenge)` is skipped, so
    /// restoring twice does not double the stats. Scores carry no key and are
    /// always appended.
    pub fn restore(&self, snapshot: StoreSnapshot) {
        let StoreSnapshot {
            daily,
            mut solutions,
            scores,
            players,
        } = snapshot;

        for challenge in daily {
            self.daily.insert(challenge.date, challenge);
        }
        for player in players {
            self.usernames.insert(player.user, player.username);
        }

        solutions.sort_by_key(|s| s.completed_at);
        let mut restored = 0usize;
        for record in solutions {
            if let Entry::Vacant(slot) = self.solutions.entry((record.user, record.challenge_id)) {
                self.apply_solution_stats(&record);
                slot.insert(record);
                restored += 1;
            }
        }

        for score in &scores {
            self.apply_mode_stats(score);
        }
        let score_count = scores.len();
        self.scores.write().extend(scores);

        tracing::debug!(solutions = restored, scores = score_count, "store restored");
    }

    /// Make every call fail with [`StoreError::Unavailable`]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(())
    }

    fn username(&self, user: UserId) -> String {
        self.usernames
            .get(&user)
            .map_or_else(|| user.short_name(), |name| name.value().clone())
    }

    fn daily_board(&self, date: NaiveDate, limit: usize) -> Vec<LeaderboardEntry> {
        let Some(challenge) = self.daily.get(&date).map(|c| c.id) else {
            return Vec::new();
        };

        let mut rows: Vec<SolutionRecord> = self
            .solutions
            .iter()
            .filter(|entry| entry.challenge_id == challenge)
            .map(|entry| entry.value().clone())
            .collect();

        rows.sort_by(|a, b| {
            a.time_to_complete
                .cmp(&b.time_to_complete)
                .then(a.attempts.cmp(&b.attempts))
                .then(a.completed_at.cmp(&b.completed_at))
        });

        rows.into_iter()
            .take(limit)
            .map(|r| {
                LeaderboardEntry::Daily(DailyEntry {
                    username: self.username(r.user),
                    user_id: r.user,
                    completion_time: r.time_to_complete,
                    completed_at: r.completed_at,
                    attempts: r.attempts,
                })
            })
            .collect()
    }

    fn weekly_board(&self, end: NaiveDate, limit: usize) -> Vec<LeaderboardEntry> {
        let start = end - Days::new(WEEKLY_WINDOW_DAYS - 1);
        let mut totals: BTreeMap<UserId, (u32, u32)> = BTreeMap::new();

        for entry in &self.solutions {
            let day = entry.completed_at.date_naive();
            if day < start || day > end {
                continue;
            }
            let total = totals.entry(entry.user).or_default();
            total.0 = total.0.saturating_add(entry.score);
            total.1 += 1;
        }

        let mut rows: Vec<_> = totals.into_iter().collect();
        rows.sort_by(|(ua, a), (ub, b)| b.0.cmp(&a.0).then(b.1.cmp(&a.1)).then(ua.cmp(ub)));

        rows.into_iter()
            .take(limit)
            .map(|(user, (total_score, challenges_completed))| {
                LeaderboardEntry::Weekly(WeeklyEntry {
                    username: self.username(user),
                    user_id: user,
                    total_score,
                    challenges_completed,
                })
            })
            .collect()
    }

    fn timed_board(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let mut best: BTreeMap<UserId, (u32, u32, u32)> = BTreeMap::new();
        for score in self.scores.read().iter().filter(|s| s.mode == GameMode::Timed) {
            let row = best.entry(score.user).or_default();
            row.0 = row.0.max(score.score);
            row.1 = row.1.max(score.level_reached.unwrap_or_default());
            row.2 += 1;
        }

        let mut rows: Vec<_> = best.into_iter().collect();
        rows.sort_by(|(ua, a), (ub, b)| b.0.cmp(&a.0).then(b.1.cmp(&a.1)).then(ua.cmp(ub)));

        rows.into_iter()
            .take(limit)
            .map(|(user, (high_score, best_level, games_played))| {
                LeaderboardEntry::Timed(TimedEntry {
                    username: self.username(user),
                    user_id: user,
                    high_score,
                    best_level,
                    games_played,
                })
            })
            .collect()
    }

    fn endless_board(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let mut best: BTreeMap<UserId, (u32, u32, Difficulty)> = BTreeMap::new();
        for score in self.scores.read().iter().filter(|s| s.mode == GameMode::Endless) {
            let row = best.entry(score.user).or_default();
            row.0 = row.0.max(score.score);
            row.1 = row.1.saturating_add(score.chains_completed);
            row.2 = row.2.max(score.max_difficulty);
        }

        let mut rows: Vec<_> = best.into_iter().collect();
        rows.sort_by(|(ua, a), (ub, b)| b.0.cmp(&a.0).then(b.1.cmp(&a.1)).then(ua.cmp(ub)));

        rows.into_iter()
            .take(limit)
            .map(|(user, (high_score, chains_completed, max_difficulty))| {
                LeaderboardEntry::Endless(EndlessEntry {
                    username: self.username(user),
                    user_id: user,
                    high_score,
                    chains_completed,
                    max_difficulty,
                })
            })
            .collect()
    }

    fn apply_solution_stats(&self, record: &SolutionRecord) {
        let day = record.completed_at.date_naive();
        let mut stats = self.stats.entry(record.user).or_default();

        stats.challenges_completed += 1;
        stats.total_score = stats.total_score.saturating_add(record.score);

        match stats.last_completed_date {
            Some(last) if last >= day => {}
            Some(last) if last.succ_opt() == Some(day) => {
                stats.streak += 1;
                stats.last_completed_date = Some(day);
            }
            _ => {
                stats.streak = 1;
                stats.last_completed_date = Some(day);
            }
        }
    }

    fn apply_mode_stats(&self, score: &ModeScore) {
        let mut stats = self.stats.entry(score.user).or_default();
        match score.mode {
            GameMode::Timed => {
                stats.timed_games_played += 1;
                stats.timed_chains_completed += score.chains_completed;
                stats.timed_high_score = stats.timed_high_score.max(score.score);
                stats.timed_best_level = stats
                    .timed_best_level
                    .max(score.level_reached.unwrap_or_default());
            }
            GameMode::Endless => {
                stats.endless_games_played += 1;
                stats.endless_chains_completed += score.chains_completed;
                stats.endless_high_score = stats.endless_high_score.max(score.score);
                stats.endless_max_difficulty = Some(
                    stats
                        .endless_max_difficulty
                        .map_or(score.max_difficulty, |d| d.max(score.max_difficulty)),
                );
            }
        }
    }
}

#[async_trait]
impl PuzzleSource for MemoryStore {
    async fn daily_challenge(&self, date: NaiveDate) -> Result<Option<DailyChallenge>, StoreError> {
        self.ensure_online()?;
        Ok(self.daily.get(&date).map(|c| c.value().clone()))
    }

    async fn random_puzzles(
        &self,
        difficulty: Difficulty,
        limit: usize,
    ) -> Result<Vec<PuzzleSpec>, StoreError> {
        self.ensure_online()?;
        let mut matching: Vec<PuzzleSpec> = self
            .puzzles
            .read()
            .iter()
            .filter(|p| p.difficulty == difficulty)
            .cloned()
            .collect();

        matching.shuffle(&mut rand::rng());
        matching.truncate(limit);
        Ok(matching)
    }
}

#[async_trait]
impl ResultSink for MemoryStore {
    async fn record_solution(&self, record: SolutionRecord) -> Result<(), StoreError> {
        self.ensure_online()?;

        if record.solution.is_empty() {
            return Err(StoreError::InvalidRecord("solution is empty".into()));
        }
        if !self.daily.iter().any(|c| c.id == record.challenge_id) {
            return Err(StoreError::NotFound(format!(
                "challenge {}",
                record.challenge_id
            )));
        }

        match self.solutions.entry((record.user, record.challenge_id)) {
            Entry::Occupied(_) => {
                return Err(StoreError::Conflict(format!(
                    "user {} already solved challenge {}",
                    record.user, record.challenge_id
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
            }
        }

        self.apply_solution_stats(&record);
        tracing::debug!(
            user = %record.user,
            challenge = %record.challenge_id,
            secs = record.time_to_complete,
            "solution recorded"
        );
        Ok(())
    }

    async fn record_mode_score(&self, score: ModeScore) -> Result<(), StoreError> {
        self.ensure_online()?;
        self.apply_mode_stats(&score);
        tracing::debug!(user = %score.user, mode = %score.mode, score = score.score, "mode score recorded");
        self.scores.write().push(score);
        Ok(())
    }
}

#[async_trait]
impl LeaderboardService for MemoryStore {
    async fn leaderboard(
        &self,
        board: Board,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, StoreError> {
        self.ensure_online()?;
        Ok(match board {
            Board::Daily(date) => self.daily_board(date, limit),
            Board::Weekly(end) => self.weekly_board(end, limit),
            Board::Timed => self.timed_board(limit),
            Board::Endless => self.endless_board(limit),
        })
    }
}

#[async_trait]
impl StatsService for MemoryStore {
    async fn user_stats(&self, user: UserId) -> Result<UserStats, StoreError> {
        self.ensure_online()?;
        Ok(self
            .stats
            .get(&user)
            .map(|s| s.value().clone())
            .unwrap_or_default())
    }
}
