//! Leaderboard ordering tests for the in-memory backend

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use cr_store::{
    Board, ChallengeId, Difficulty, GameMode, LeaderboardEntry, LeaderboardService, MemoryStore,
    ModeScore, PuzzleSpec, ResultSink, SolutionRecord, StatsService, UserId,
};
use pretty_assertions::assert_eq;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

fn at(d: u32, hour: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day(d).and_hms_opt(hour, 0, 0).unwrap())
}

fn puzzle() -> PuzzleSpec {
    PuzzleSpec::new("COLD", "WARM", 5, Difficulty::Medium)
}

fn solution(
    user: UserId,
    challenge: ChallengeId,
    secs: u64,
    attempts: u32,
    completed_at: DateTime<Utc>,
) -> SolutionRecord {
    SolutionRecord {
        user,
        challenge_id: challenge,
        time_to_complete: secs,
        attempts,
        solution: ["COLD", "CORD", "CARD", "WARD", "WARM"]
            .map(String::from)
            .to_vec(),
        score: 200,
        completed_at,
    }
}

fn mode_score(user: UserId, mode: GameMode, score: u32, chains: u32) -> ModeScore {
    ModeScore {
        user,
        mode,
        score,
        level_reached: (mode == GameMode::Timed).then_some(chains + 1),
        chains_completed: chains,
        max_difficulty: if score >= 600 {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        },
        created_at: at(19, 9),
    }
}

#[tokio::test]
async fn test_daily_board_orders_by_time_then_attempts() {
    let store = MemoryStore::new();
    let challenge = store.schedule_daily(day(19), puzzle());

    let (ana, bo, cy) = (UserId::new(), UserId::new(), UserId::new());
    store.register_user(ana, "ana");
    store.register_user(bo, "bo");
    store.register_user(cy, "cy");

    store.record_solution(solution(ana, challenge, 90, 4, at(19, 8))).await.unwrap();
    store.record_solution(solution(bo, challenge, 45, 9, at(19, 9))).await.unwrap();
    store.record_solution(solution(cy, challenge, 45, 5, at(19, 10))).await.unwrap();

    let rows = store.leaderboard(Board::Daily(day(19)), 10).await.unwrap();
    let names: Vec<_> = rows.iter().map(LeaderboardEntry::username).collect();
    assert_eq!(names, vec!["cy", "bo", "ana"]);

    let top = store.leaderboard(Board::Daily(day(19)), 1).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].user_id(), cy);
}

#[tokio::test]
async fn test_daily_board_for_unscheduled_date_is_empty() {
    let store = MemoryStore::new();
    let rows = store.leaderboard(Board::Daily(day(1)), 10).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_weekly_board_sums_scores_inside_window() {
    let store = MemoryStore::new();
    let (ana, bo) = (UserId::new(), UserId::new());
    store.register_user(ana, "ana");
    store.register_user(bo, "bo");

    for d in [10, 14, 15, 19] {
        let id = store.schedule_daily(day(d), puzzle());
        store.record_solution(solution(ana, id, 60, 5, at(d, 12))).await.unwrap();
        if d >= 15 {
            store.record_solution(solution(bo, id, 30, 5, at(d, 12))).await.unwrap();
        }
    }

    let rows = store.leaderboard(Board::Weekly(day(19)), 10).await.unwrap();
    let summary: Vec<_> = rows
        .iter()
        .map(|row| match row {
            LeaderboardEntry::Weekly(w) => (w.username.clone(), w.total_score, w.challenges_completed),
            other => panic!("unexpected row {other:?}"),
        })
        .collect();

    // Day 10 falls outside the 13..=19 window
    assert_eq!(
        summary,
        vec![("ana".to_string(), 600, 3), ("bo".to_string(), 400, 2)]
    );
}

#[tokio::test]
async fn test_mode_boards_keep_best_score() {
    let store = MemoryStore::new();
    let (ana, bo) = (UserId::new(), UserId::new());
    store.register_user(ana, "ana");

    store.record_mode_score(mode_score(ana, GameMode::Timed, 300, 3)).await.unwrap();
    store.record_mode_score(mode_score(ana, GameMode::Timed, 700, 6)).await.unwrap();
    store.record_mode_score(mode_score(bo, GameMode::Timed, 500, 4)).await.unwrap();
    store.record_mode_score(mode_score(bo, GameMode::Endless, 800, 7)).await.unwrap();

    let timed = store.leaderboard(Board::Timed, 10).await.unwrap();
    match &timed[..] {
        [LeaderboardEntry::Timed(first), LeaderboardEntry::Timed(second)] => {
            assert_eq!(first.username, "ana");
            assert_eq!(first.high_score, 700);
            assert_eq!(first.best_level, 7);
            assert_eq!(first.games_played, 2);
            assert_eq!(second.user_id, bo);
            assert_eq!(second.username, bo.short_name());
        }
        other => panic!("unexpected timed board {other:?}"),
    }

    let endless = store.leaderboard(Board::Endless, 10).await.unwrap();
    assert_eq!(endless.len(), 1);
    assert!(matches!(
        &endless[0],
        LeaderboardEntry::Endless(e) if e.high_score == 800 && e.max_difficulty == Difficulty::Medium
    ));

    let stats = store.user_stats(ana).await.unwrap();
    assert_eq!(stats.timed_games_played, 2);
    assert_eq!(stats.timed_chains_completed, 9);
    assert_eq!(stats.timed_high_score, 700);
    assert_eq!(stats.endless_games_played, 0);
}

#[tokio::test]
async fn test_leaderboard_rows_serialize_with_board_tag() {
    let store = MemoryStore::new();
    let user = UserId::new();
    store.register_user(user, "ana");
    store.record_mode_score(mode_score(user, GameMode::Endless, 100, 1)).await.unwrap();

    let rows = store.leaderboard(Board::Endless, 5).await.unwrap();
    let json = serde_json::to_value(&rows).unwrap();
    assert_eq!(json[0]["board"], "endless");
    assert_eq!(json[0]["username"], "ana");
    assert_eq!(json[0]["max_difficulty"], "easy");
}
