//! Plain-text rendering for the terminal

use cr_core::{ChainSnapshot, SubmitOutcome};
use cr_modes::ReplayStep;
use cr_store::LeaderboardEntry;

/// `COLD -> CORD -> [2] -> [3] -> WARM`, empty slots shown by index
#[must_use]
pub fn render_chain(snapshot: &ChainSnapshot) -> String {
    snapshot
        .slots
        .iter()
        .enumerate()
        .map(|(i, slot)| slot.clone().unwrap_or_else(|| format!("[{i}]")))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Seconds as `MM:SS`
#[must_use]
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// One line for a submission result
#[must_use]
pub fn render_outcome(slot: usize, word: &str, outcome: &SubmitOutcome) -> String {
    match (outcome.accepted, outcome.error_kind) {
        (true, _) => format!("  ok   slot {slot}: {word}"),
        (false, Some(kind)) => format!("  fail slot {slot}: {word} ({kind:?})"),
        (false, None) => format!("  fail slot {slot}: {word}"),
    }
}

/// [`render_outcome`] for a replayed step
#[must_use]
pub fn render_step(step: &ReplayStep) -> String {
    render_outcome(step.slot, &step.word, &step.outcome)
}

/// Numbered rows, best first
#[must_use]
pub fn render_leaderboard(rows: &[LeaderboardEntry]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["  (no entries yet)".to_string()];
    }

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let detail = match row {
                LeaderboardEntry::Daily(e) => {
                    format!("{} ({} attempts)", format_clock(e.completion_time), e.attempts)
                }
                LeaderboardEntry::Weekly(e) => {
                    format!("{} pts over {} challenges", e.total_score, e.challenges_completed)
                }
                LeaderboardEntry::Timed(e) => {
                    format!("{} pts, level {}", e.high_score, e.best_level)
                }
                LeaderboardEntry::Endless(e) => format!(
                    "{} pts, {} chains, {}",
                    e.high_score, e.chains_completed, e.max_difficulty
                ),
            };
            format!("{:>3}. {:<16} {detail}", i + 1, row.username())
        })
        .collect()
}
