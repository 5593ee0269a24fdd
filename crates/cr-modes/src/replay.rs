//! Scripted solutions

use crate::error::ModeError;
use cr_core::{Chain, ChainSnapshot, Completion, SubmitOutcome};
use cr_store::{Difficulty, PuzzleSpec};
use serde::Serialize;

/// Interior words of the demo puzzle
pub const DEMO_SOLUTION: [&str; 3] = ["CORD", "CARD", "WARD"];

/// COLD -> WARM over five slots
#[must_use]
pub fn demo_puzzle() -> PuzzleSpec {
    PuzzleSpec::new("COLD", "WARM", 5, Difficulty::Medium)
}

/// One scripted submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayStep {
    /// Slot submitted to
    pub slot: usize,
    /// Word as given
    pub word: String,
    /// Chain response
    pub outcome: SubmitOutcome,
}

/// Full replay result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replay {
    /// Steps in submission order
    pub steps: Vec<ReplayStep>,
    /// Frozen metrics if the script completed the chain
    pub completion: Option<Completion>,
    /// Final chain state
    pub chain: ChainSnapshot,
}

/// Feed `words` into slots 1, 2, ... of a fresh chain for `puzzle`
///
/// Rejected words are recorded and the script moves on to the next slot.
///
/// # Errors
/// [`ModeError::Chain`] if the puzzle itself is malformed.
pub fn replay(puzzle: &PuzzleSpec, words: &[&str]) -> Result<Replay, ModeError> {
    let mut chain = Chain::new(&puzzle.start_word, &puzzle.end_word, puzzle.chain_length)?;

    let steps = words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let slot = i + 1;
            let result = chain.submit(slot, word);
            ReplayStep {
                slot,
                word: (*word).to_string(),
                outcome: SubmitOutcome::from_result(&result),
            }
        })
        .collect();

    Ok(Replay {
        steps,
        completion: chain.completion(),
        chain: chain.snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cr_core::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn demo_solution_completes() {
        let result = replay(&demo_puzzle(), &DEMO_SOLUTION).unwrap();
        assert!(result.steps.iter().all(|s| s.outcome.accepted));
        assert_eq!(result.completion.map(|c| c.attempts), Some(3));
        assert_eq!(
            result.chain.words(),
            vec!["COLD", "CORD", "CARD", "WARD", "WARM"]
        );
    }

    #[test]
    fn bad_step_is_recorded_and_script_continues() {
        let result = replay(&demo_puzzle(), &["CORD", "WARM", "WARD"]).unwrap();
        assert_eq!(
            result.steps[1].outcome.error_kind,
            Some(ErrorKind::InvalidTransition)
        );
        assert!(result.completion.is_none());
        assert_eq!(result.chain.attempts, 3);
        assert_eq!(result.chain.next_slot, Some(2));
    }

    #[test]
    fn malformed_puzzle_is_an_error() {
        let puzzle = PuzzleSpec::new("COLD", "HEAT", 2, Difficulty::Easy);
        assert!(matches!(replay(&puzzle, &[]), Err(ModeError::Chain(_))));
    }
}
