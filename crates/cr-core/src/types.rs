//! Core types for the chain engine
//!
//! - Chain identifiers and handles
//! - Submission outcomes and completion metrics
//! - Serializable chain snapshots

use crate::error::{ChainError, ErrorKind};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Minimum number of slots in a chain (start, one blank, end)
pub const MIN_CHAIN_LENGTH: usize = 3;

/// Unique chain identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChainId(pub Ulid);

impl ChainId {
    /// Generate new chain ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for ChainId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle to a chain owned by a [`ChainEngine`](crate::engine::ChainEngine)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainHandle(pub(crate) ChainId);

impl ChainHandle {
    /// Chain this handle refers to
    #[inline]
    #[must_use]
    pub fn id(&self) -> ChainId {
        self.0
    }
}

impl std::fmt::Display for ChainHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "chain:{}", self.0)
    }
}

/// Successful submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accepted {
    /// Slot that was written
    pub slot: usize,
    /// Lowest still-empty interior slot, if any
    pub next_slot: Option<usize>,
    /// Whether this submission completed the chain
    pub completed: bool,
}

/// Flattened result of a word submission
///
/// Mirrors `{ accepted, nextSlotIndex?, errorKind? }` for callers that want a
/// plain record instead of a `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    /// Whether the word was written into the slot
    pub accepted: bool,
    /// Next slot to prompt for (only set when accepted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_slot: Option<usize>,
    /// Rejection kind (only set when not accepted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl SubmitOutcome {
    /// Build from a chain submission result
    #[must_use]
    pub fn from_result(result: &Result<Accepted, ChainError>) -> Self {
        match result {
            Ok(accepted) => Self {
                accepted: true,
                next_slot: accepted.next_slot,
                error_kind: None,
            },
            Err(err) => Self {
                accepted: false,
                next_slot: None,
                error_kind: Some(err.kind()),
            },
        }
    }
}

/// Metrics frozen at the moment a chain completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Submissions counted, valid or not
    pub attempts: u32,
    /// Whole seconds between initialisation and completion
    pub elapsed_secs: u64,
}

/// Point-in-time view of a chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    /// Slot contents; empty interior slots are `None`
    pub slots: Vec<Option<String>>,
    /// Attempts so far
    pub attempts: u32,
    /// Lowest empty interior slot
    pub next_slot: Option<usize>,
    /// Frozen metrics once complete
    pub completion: Option<Completion>,
}

impl ChainSnapshot {
    /// Whether every slot is filled
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completion.is_some()
    }

    /// Filled words in slot order
    #[must_use]
    pub fn words(&self) -> Vec<&str> {
        self.slots.iter().flatten().map(String::as_str).collect()
    }
}

/// Upper-case a word before it reaches the comparator
#[inline]
#[must_use]
pub fn normalize_word(word: &str) -> String {
    word.to_uppercase()
}

/// Length of a word in chars
#[inline]
#[must_use]
pub fn word_len(word: &str) -> usize {
    word.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_ids_are_unique() {
        assert_ne!(ChainId::new(), ChainId::new());
    }

    #[test]
    fn outcome_from_accepted() {
        let result = Ok(Accepted {
            slot: 1,
            next_slot: Some(2),
            completed: false,
        });
        let outcome = SubmitOutcome::from_result(&result);
        assert!(outcome.accepted);
        assert_eq!(outcome.next_slot, Some(2));
        assert_eq!(outcome.error_kind, None);
    }

    #[test]
    fn outcome_from_rejection() {
        let result = Err(ChainError::LengthMismatch {
            expected: 3,
            actual: 2,
        });
        let outcome = SubmitOutcome::from_result(&result);
        assert!(!outcome.accepted);
        assert_eq!(outcome.next_slot, None);
        assert_eq!(outcome.error_kind, Some(ErrorKind::LengthMismatch));
    }

    #[test]
    fn normalize_upper_cases() {
        assert_eq!(normalize_word("cOt"), "COT");
        assert_eq!(word_len("été"), 3);
    }
}
