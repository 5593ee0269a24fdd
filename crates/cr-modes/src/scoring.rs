//! Points and time bonuses

use cr_store::Difficulty;

/// Base points for one completed chain, before the difficulty multiplier
pub const BASE_POINTS: u32 = 100;

/// Levels above this play medium puzzles in timed mode
pub const MEDIUM_FROM_LEVEL: u32 = 5;

/// Levels above this play hard puzzles in timed mode
pub const HARD_FROM_LEVEL: u32 = 10;

/// Points for completing one chain of `difficulty`
#[inline]
#[must_use]
pub fn points(difficulty: Difficulty) -> u32 {
    BASE_POINTS * difficulty.multiplier()
}

/// Seconds added to the timed-mode clock per completed chain
#[inline]
#[must_use]
pub fn time_bonus_secs(difficulty: Difficulty) -> u64 {
    match difficulty {
        Difficulty::Easy => 30,
        Difficulty::Medium => 45,
        Difficulty::Hard => 60,
    }
}

/// Puzzle difficulty for a timed-mode level (levels start at 1)
#[must_use]
pub fn difficulty_for_level(level: u32) -> Difficulty {
    if level > HARD_FROM_LEVEL {
        Difficulty::Hard
    } else if level > MEDIUM_FROM_LEVEL {
        Difficulty::Medium
    } else {
        Difficulty::Easy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_scale_with_difficulty() {
        assert_eq!(points(Difficulty::Easy), 100);
        assert_eq!(points(Difficulty::Medium), 200);
        assert_eq!(points(Difficulty::Hard), 300);
    }

    #[test]
    fn bonus_scales_with_difficulty() {
        assert_eq!(time_bonus_secs(Difficulty::Easy), 30);
        assert_eq!(time_bonus_secs(Difficulty::Medium), 45);
        assert_eq!(time_bonus_secs(Difficulty::Hard), 60);
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(difficulty_for_level(1), Difficulty::Easy);
        assert_eq!(difficulty_for_level(5), Difficulty::Easy);
        assert_eq!(difficulty_for_level(6), Difficulty::Medium);
        assert_eq!(difficulty_for_level(10), Difficulty::Medium);
        assert_eq!(difficulty_for_level(11), Difficulty::Hard);
    }
}
