//! Built-in puzzles used when the source has none

use cr_store::{Difficulty, PuzzleSpec};
use rand::seq::SliceRandom;
use rand::Rng;

const EASY: [(&str, &str); 5] = [
    ("WORD", "GAME"),
    ("HEAT", "COLD"),
    ("SHIP", "DOCK"),
    ("LAMP", "DARK"),
    ("TREE", "LEAF"),
];

const MEDIUM: [(&str, &str); 5] = [
    ("CHAIN", "LINKS"),
    ("BREAD", "TOAST"),
    ("STONE", "BRICK"),
    ("LIGHT", "SHADE"),
    ("WATER", "STEAM"),
];

const HARD: [(&str, &str); 5] = [
    ("FRIEND", "FAMILY"),
    ("PLANET", "GALAXY"),
    ("SUMMER", "WINTER"),
    ("CASTLE", "PALACE"),
    ("FOREST", "JUNGLE"),
];

/// Catalog puzzles for `difficulty`, in catalog order
#[must_use]
pub fn fallback_puzzles(difficulty: Difficulty) -> Vec<PuzzleSpec> {
    let (pairs, chain_length) = match difficulty {
        Difficulty::Easy => (&EASY, 4),
        Difficulty::Medium => (&MEDIUM, 5),
        Difficulty::Hard => (&HARD, 6),
    };

    pairs
        .iter()
        .map(|(start, end)| PuzzleSpec::new(*start, *end, chain_length, difficulty))
        .collect()
}

/// One catalog puzzle picked at random
#[must_use]
pub fn random_fallback(difficulty: Difficulty) -> PuzzleSpec {
    let mut puzzles = fallback_puzzles(difficulty);
    let index = rand::rng().random_range(0..puzzles.len());
    puzzles.swap_remove(index)
}

/// Catalog puzzles in random order
#[must_use]
pub fn shuffled_fallback(difficulty: Difficulty) -> Vec<PuzzleSpec> {
    let mut puzzles = fallback_puzzles(difficulty);
    puzzles.shuffle(&mut rand::rng());
    puzzles
}
