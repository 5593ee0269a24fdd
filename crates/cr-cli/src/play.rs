//! Interactive sessions
//!
//! Each loop reads one command per line: `WORD` fills the next empty slot,
//! `SLOT WORD` targets a slot, `help` and `quit` do what they say. Timed
//! runs also tick a one-second countdown alongside the input. When a puzzle
//! fetch fails between chains the loops refetch right away and again on
//! each following line until a chain is loaded.

use crate::render::{format_clock, render_chain, render_outcome};
use cr_core::{SharedClock, SubmitOutcome};
use cr_modes::{DailyRun, ElapsedTicker, EndlessRun, ModeError, RecordOutcome, TimedRun};
use cr_store::ModeScore;
use std::time::Duration;
use tokio::io::{AsyncBufRead, Lines};
use tokio::time::{interval, MissedTickBehavior};

const HELP: &str = "enter WORD for the next slot, SLOT WORD for a specific one, or quit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Submit `word` to `slot`
    Move {
        /// Target slot
        slot: usize,
        /// Candidate word
        word: String,
    },
    /// Show usage
    Help,
    /// Leave the session
    Quit,
}

/// Parse a line; `next_slot` is used when no slot is given
///
/// Returns `None` for blank lines and for a bare word when no slot is free.
#[must_use]
pub fn parse_input(line: &str, next_slot: Option<usize>) -> Option<Input> {
    let mut parts = line.split_whitespace();
    let first = parts.next()?;

    match first.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => return Some(Input::Quit),
        "help" | "?" => return Some(Input::Help),
        _ => {}
    }

    match (first.parse::<usize>(), parts.next()) {
        (Ok(slot), Some(word)) => Some(Input::Move {
            slot,
            word: word.to_string(),
        }),
        (Ok(_), None) => Some(Input::Help),
        (Err(_), _) => next_slot.map(|slot| Input::Move {
            slot,
            word: first.to_string(),
        }),
    }
}

fn report(slot: usize, word: &str, result: &Result<(), &ModeError>) {
    let outcome = SubmitOutcome {
        accepted: result.is_ok(),
        next_slot: None,
        error_kind: match result {
            Err(ModeError::Chain(e)) => Some(e.kind()),
            _ => None,
        },
    };
    println!("{}", render_outcome(slot, word, &outcome));
    if let Err(err) = result {
        println!("       {err}");
    }
}

fn report_save<T>(saved: &RecordOutcome<T>) {
    match &saved.save_error {
        None => println!("Result saved."),
        Some(err) => println!("Result not saved: {err}"),
    }
}

/// Play a daily challenge until solved or quit
///
/// # Errors
/// Input failures and unrecoverable mode errors.
pub async fn play_daily<R>(
    mut run: DailyRun,
    clock: SharedClock,
    input: &mut Lines<R>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let ticker = ElapsedTicker::spawn(clock, run.chain().tracker().started_at());
    let puzzle = &run.challenge().puzzle;
    println!(
        "Daily challenge {}: {} -> {} ({})",
        run.challenge().date,
        puzzle.start_word,
        puzzle.end_word,
        puzzle.difficulty
    );
    println!("{}", render_chain(&run.chain().snapshot()));

    while let Some(line) = input.next_line().await? {
        let Some(cmd) = parse_input(&line, run.chain().next_slot()) else {
            continue;
        };
        let (slot, word) = match cmd {
            Input::Quit => break,
            Input::Help => {
                println!("{HELP}");
                continue;
            }
            Input::Move { slot, word } => (slot, word),
        };

        match run.submit(slot, &word).await {
            Ok(progress) => {
                report(slot, &word, &Ok(()));
                println!("{}", render_chain(&run.chain().snapshot()));
                if let Some(saved) = progress.saved {
                    println!(
                        "Solved in {} with {} attempts for {} points.",
                        format_clock(saved.record.time_to_complete),
                        saved.record.attempts,
                        saved.record.score
                    );
                    report_save(&saved);
                    break;
                }
            }
            Err(err) if err.is_recoverable() => report(slot, &word, &Err(&err)),
            Err(err) => return Err(err.into()),
        }
        println!("elapsed {}", format_clock(ticker.current()));
    }

    ticker.stop();
    Ok(())
}

fn announce_timed(run: &TimedRun) {
    if let (Some(puzzle), Some(chain)) = (run.puzzle(), run.chain()) {
        println!(
            "Level {} ({}) | score {} | {} left",
            run.level(),
            puzzle.difficulty,
            run.score(),
            format_clock(run.remaining_secs())
        );
        println!("{}", render_chain(&chain.snapshot()));
    }
}

/// Refetch after a failed puzzle load
///
/// A retryable failure is shown and left for the next input line to retry.
async fn resume_timed(run: &mut TimedRun) -> anyhow::Result<()> {
    if run.chain().is_some() {
        return Ok(());
    }
    println!("Fetching the next puzzle...");
    match run.load_round().await {
        Ok(()) => {
            announce_timed(run);
            Ok(())
        }
        Err(err) if err.is_recoverable() => {
            tracing::warn!(error = %err, "timed puzzle fetch failed");
            println!("No puzzle yet ({err}). Press enter to retry or quit to stop.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Play a timed run until time runs out or quit
///
/// Returns the saved score when the clock reached zero.
///
/// # Errors
/// Input failures and unrecoverable mode errors.
pub async fn play_timed<R>(
    mut run: TimedRun,
    input: &mut Lines<R>,
) -> anyhow::Result<Option<RecordOutcome<ModeScore>>>
where
    R: AsyncBufRead + Unpin,
{
    let mut countdown = interval(Duration::from_secs(1));
    countdown.set_missed_tick_behavior(MissedTickBehavior::Delay);
    countdown.tick().await;
    announce_timed(&run);

    loop {
        tokio::select! {
            _ = countdown.tick() => {
                if let Some(score) = run.tick(1) {
                    println!("Time's up! Level {} with {} points.", run.level(), run.score());
                    let saved = run.record(score).await;
                    report_save(&saved);
                    return Ok(Some(saved));
                }
            }
            line = input.next_line() => {
                let Some(line) = line? else { break };
                if run.chain().is_none() {
                    if parse_input(&line, None) == Some(Input::Quit) {
                        break;
                    }
                    resume_timed(&mut run).await?;
                    continue;
                }
                let next = run.chain().and_then(cr_core::Chain::next_slot);
                match parse_input(&line, next) {
                    None => {}
                    Some(Input::Quit) => break,
                    Some(Input::Help) => println!("{HELP}"),
                    Some(Input::Move { slot, word }) => {
                        match run.submit(slot, &word).await {
                            Ok(progress) => {
                                report(slot, &word, &Ok(()));
                                if let Some(cleared) = progress.cleared {
                                    println!("+{} points, +{}s", cleared.points, cleared.bonus_secs);
                                }
                                announce_timed(&run);
                            }
                            Err(err) if err.is_recoverable() => report(slot, &word, &Err(&err)),
                            Err(err) => return Err(err.into()),
                        }
                        resume_timed(&mut run).await?;
                    }
                }
            }
        }
    }

    Ok(None)
}

fn announce_endless(run: &EndlessRun) {
    if let Some(chain) = run.chain() {
        let (index, size) = run.batch_position();
        println!(
            "Puzzle {}/{} ({}) | score {} | chains {}",
            index + 1,
            size,
            run.difficulty(),
            run.score(),
            run.chains_completed()
        );
        println!("{}", render_chain(&chain.snapshot()));
    }
}

/// Endless counterpart of [`resume_timed`]
async fn resume_endless(run: &mut EndlessRun) -> anyhow::Result<()> {
    if run.chain().is_some() {
        return Ok(());
    }
    println!("Fetching the next batch...");
    match run.load_batch().await {
        Ok(()) => {
            announce_endless(run);
            Ok(())
        }
        Err(err) if err.is_recoverable() => {
            tracing::warn!(error = %err, "endless batch fetch failed");
            println!("No puzzles yet ({err}). Press enter to retry or quit to stop.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Play endless puzzles until quit, then save the score
///
/// # Errors
/// Input failures and unrecoverable mode errors.
pub async fn play_endless<R>(
    mut run: EndlessRun,
    input: &mut Lines<R>,
) -> anyhow::Result<RecordOutcome<ModeScore>>
where
    R: AsyncBufRead + Unpin,
{
    announce_endless(&run);

    while let Some(line) = input.next_line().await? {
        if run.chain().is_none() {
            if parse_input(&line, None) == Some(Input::Quit) {
                break;
            }
            resume_endless(&mut run).await?;
            continue;
        }
        let next = run.chain().and_then(cr_core::Chain::next_slot);
        match parse_input(&line, next) {
            None => {}
            Some(Input::Quit) => break,
            Some(Input::Help) => println!("{HELP}"),
            Some(Input::Move { slot, word }) => {
                match run.submit(slot, &word).await {
                    Ok(progress) => {
                        report(slot, &word, &Ok(()));
                        if let Some(cleared) = progress.cleared {
                            println!("+{} points", cleared.points);
                        }
                        announce_endless(&run);
                    }
                    Err(err) if err.is_recoverable() => report(slot, &word, &Err(&err)),
                    Err(err) => return Err(err.into()),
                }
                resume_endless(&mut run).await?;
            }
        }
    }

    let saved = run.end().await?;
    println!(
        "Finished with {} points over {} chains.",
        saved.record.score, saved.record.chains_completed
    );
    report_save(&saved);
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_word_targets_next_slot() {
        assert_eq!(
            parse_input("cot", Some(1)),
            Some(Input::Move {
                slot: 1,
                word: "cot".into()
            })
        );
        assert_eq!(parse_input("cot", None), None);
    }

    #[test]
    fn explicit_slot_wins() {
        assert_eq!(
            parse_input(" 2  COG ", Some(1)),
            Some(Input::Move {
                slot: 2,
                word: "COG".into()
            })
        );
    }

    #[test]
    fn commands_and_blanks() {
        assert_eq!(parse_input("QUIT", Some(1)), Some(Input::Quit));
        assert_eq!(parse_input("help", None), Some(Input::Help));
        assert_eq!(parse_input("3", Some(1)), Some(Input::Help));
        assert_eq!(parse_input("   ", Some(1)), None);
    }
}
