//! Error types for the chain engine
//!
//! Two layers:
//! - [`ChainError`]: everything a single chain can reject
//! - [`EngineError`]: addressing failures on top of that (stale handles)

use crate::types::ChainId;
use serde::{Deserialize, Serialize};

/// Errors raised by a single chain
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// Malformed chain setup, fatal to creation
    #[error("invalid chain configuration: {reason}")]
    InvalidConfiguration {
        /// What is wrong with the setup
        reason: String,
    },

    /// Candidate does not have the start word's length
    #[error("word must be {expected} letters long, got {actual}")]
    LengthMismatch {
        /// Letters in the start word
        expected: usize,
        /// Letters in the candidate
        actual: usize,
    },

    /// Candidate is not a one-letter transition from a filled neighbour
    #[error("slot {slot}: word must differ by exactly one letter from '{neighbour}'")]
    InvalidTransition {
        /// Slot the candidate was sent to
        slot: usize,
        /// Filled neighbour it failed against
        neighbour: String,
    },

    /// Target index is a fixed slot or out of range
    #[error("slot {slot} is not an open slot (chain length {len})")]
    InvalidSlot {
        /// Requested slot
        slot: usize,
        /// Chain length, end words included
        len: usize,
    },

    /// Chain already completed; metrics are frozen
    #[error("chain is already complete")]
    AlreadyComplete,
}

impl ChainError {
    /// Flat discriminant for this error
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfiguration { .. } => ErrorKind::InvalidConfiguration,
            Self::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::InvalidSlot { .. } => ErrorKind::InvalidSlot,
            Self::AlreadyComplete => ErrorKind::AlreadyComplete,
        }
    }

    /// Caller may re-prompt and submit again
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::LengthMismatch { .. } | Self::InvalidTransition { .. } | Self::InvalidSlot { .. }
        )
    }

    /// Whether the rejected submission still counted as an attempt
    #[inline]
    #[must_use]
    pub fn counts_as_attempt(&self) -> bool {
        matches!(
            self,
            Self::LengthMismatch { .. } | Self::InvalidTransition { .. }
        )
    }

    pub(crate) fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

/// Error discriminant reported in submission outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`ChainError::InvalidConfiguration`]
    InvalidConfiguration,
    /// See [`ChainError::LengthMismatch`]
    LengthMismatch,
    /// See [`ChainError::InvalidTransition`]
    InvalidTransition,
    /// See [`ChainError::InvalidSlot`]
    InvalidSlot,
    /// See [`ChainError::AlreadyComplete`]
    AlreadyComplete,
}

/// Errors raised by the chain registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Handle refers to a chain that was removed or never existed
    #[error("unknown chain: {0}")]
    UnknownChain(ChainId),

    /// Underlying chain rejected the operation
    #[error(transparent)]
    Chain(#[from] ChainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_error_display() {
        let err = ChainError::LengthMismatch {
            expected: 3,
            actual: 5,
        };
        assert!(err.to_string().contains("3 letters"));

        let err = ChainError::InvalidTransition {
            slot: 2,
            neighbour: "DOG".to_string(),
        };
        assert!(err.to_string().contains("'DOG'"));
    }

    #[test]
    fn recoverable_kinds() {
        assert!(ChainError::LengthMismatch {
            expected: 3,
            actual: 4
        }
        .is_recoverable());
        assert!(!ChainError::AlreadyComplete.is_recoverable());
        assert!(!ChainError::invalid_configuration("bad").is_recoverable());
    }

    #[test]
    fn attempt_accounting_by_kind() {
        assert!(ChainError::InvalidTransition {
            slot: 1,
            neighbour: "CAT".into()
        }
        .counts_as_attempt());
        assert!(!ChainError::InvalidSlot { slot: 0, len: 4 }.counts_as_attempt());
        assert!(!ChainError::AlreadyComplete.counts_as_attempt());
    }

    #[test]
    fn error_kind_matches_variant() {
        let kind = ChainError::LengthMismatch {
            expected: 1,
            actual: 2,
        }
        .kind();
        assert_eq!(kind, ErrorKind::LengthMismatch);
    }
}
