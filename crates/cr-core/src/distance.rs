//! Letter-distance comparison between words
//!
//! Words are compared position by position over `char`s. Nothing here
//! normalises case: callers upper-case both sides first (see
//! [`normalize_word`](crate::types::normalize_word)).

/// Number of positions at which two words differ
///
/// Returns `None` when the words have different lengths.
#[must_use]
pub fn letter_distance(a: &str, b: &str) -> Option<usize> {
    if a.chars().count() != b.chars().count() {
        return None;
    }

    Some(a.chars().zip(b.chars()).filter(|(x, y)| x != y).count())
}

/// True iff `a` and `b` have equal length and differ in exactly one position
#[inline]
#[must_use]
pub fn differs_by_exactly_one(a: &str, b: &str) -> bool {
    letter_distance(a, b) == Some(1)
}
