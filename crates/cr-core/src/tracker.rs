//! Chain state tracker
//!
//! Owns the slot sequence and the attempt counter. Slot 0 holds the start
//! word and slot N-1 the end word; both are fixed. Interior slots start empty
//! and are written only through [`ChainTracker::submit`].
//!
//! # Neighbour checks
//!
//! A candidate is compared against the slots immediately before and after
//! its target. An empty adjacent slot is skipped, so two interior words
//! filled out of order are never compared with each other once the gap
//! between them closes. This matches the behaviour players already rely on.

use crate::distance::differs_by_exactly_one;
use crate::error::ChainError;
use crate::types::{normalize_word, word_len, Accepted, MIN_CHAIN_LENGTH};
use std::time::Instant;

/// Slot sequence and attempt counter for one chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainTracker {
    slots: Vec<Option<String>>,
    word_len: usize,
    attempts: u32,
    started_at: Instant,
}

impl ChainTracker {
    /// Build a chain of `length` slots from `start` to `end`
    ///
    /// Both words are upper-cased.
    ///
    /// # Errors
    /// [`ChainError::InvalidConfiguration`] if `length < 3`, the start word is
    /// empty, or the two words differ in length.
    pub fn initialize(
        start: &str,
        end: &str,
        length: usize,
        now: Instant,
    ) -> Result<Self, ChainError> {
        if length < MIN_CHAIN_LENGTH {
            return Err(ChainError::invalid_configuration(format!(
                "chain length must be at least {MIN_CHAIN_LENGTH}, got {length}"
            )));
        }

        let start = normalize_word(start);
        let end = normalize_word(end);
        let start_len = word_len(&start);

        if start_len == 0 {
            return Err(ChainError::invalid_configuration("start word is empty"));
        }
        if start_len != word_len(&end) {
            return Err(ChainError::invalid_configuration(format!(
                "start word '{start}' and end word '{end}' differ in length"
            )));
        }

        let mut slots = vec![None; length];
        slots[0] = Some(start);
        slots[length - 1] = Some(end);

        Ok(Self {
            slots,
            word_len: start_len,
            attempts: 0,
            started_at: now,
        })
    }

    /// Clear interior slots, attempts and timer; keep start and end words
    pub fn restart(&mut self, now: Instant) {
        let last = self.slots.len() - 1;
        for slot in &mut self.slots[1..last] {
            *slot = None;
        }
        self.attempts = 0;
        self.started_at = now;
    }

    /// Submit `candidate` for interior slot `slot`
    ///
    /// Every submission that reaches validation counts as an attempt, whether
    /// it is accepted or not.
    ///
    /// # Errors
    /// - [`ChainError::AlreadyComplete`]: chain is full (not counted)
    /// - [`ChainError::InvalidSlot`]: `slot` is fixed or out of range (not counted)
    /// - [`ChainError::LengthMismatch`]: wrong word length (counted)
    /// - [`ChainError::InvalidTransition`]: not one letter away from a filled
    ///   neighbour (counted)
    pub fn submit(&mut self, candidate: &str, slot: usize) -> Result<Accepted, ChainError> {
        if self.is_complete() {
            return Err(ChainError::AlreadyComplete);
        }
        if !self.is_interior(slot) {
            return Err(ChainError::InvalidSlot {
                slot,
                len: self.slots.len(),
            });
        }

        self.attempts = self.attempts.saturating_add(1);

        let candidate = normalize_word(candidate);
        let actual = word_len(&candidate);
        if actual != self.word_len {
            return Err(ChainError::LengthMismatch {
                expected: self.word_len,
                actual,
            });
        }

        for neighbour in [slot - 1, slot + 1] {
            if let Some(word) = &self.slots[neighbour] {
                if !differs_by_exactly_one(&candidate, word) {
                    return Err(ChainError::InvalidTransition {
                        slot,
                        neighbour: word.clone(),
                    });
                }
            }
        }

        self.slots[slot] = Some(candidate);

        Ok(Accepted {
            slot,
            next_slot: self.next_empty_slot(),
            completed: self.is_complete(),
        })
    }

    /// Every slot is filled
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Lowest empty slot strictly between the fixed ends
    #[must_use]
    pub fn next_empty_slot(&self) -> Option<usize> {
        let last = self.slots.len() - 1;
        (1..last).find(|&i| self.slots[i].is_none())
    }

    /// Slot contents in order
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    /// Word in `slot`, if filled
    #[inline]
    #[must_use]
    pub fn word(&self, slot: usize) -> Option<&str> {
        self.slots.get(slot).and_then(|w| w.as_deref())
    }

    /// Start word
    #[must_use]
    pub fn start_word(&self) -> &str {
        self.word(0).unwrap_or_default()
    }

    /// End word
    #[must_use]
    pub fn end_word(&self) -> &str {
        self.word(self.slots.len() - 1).unwrap_or_default()
    }

    /// Number of slots, fixed ends included
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false; chains have at least three slots
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Required length of every word
    #[inline]
    #[must_use]
    pub fn word_len(&self) -> usize {
        self.word_len
    }

    /// Attempts counted since initialisation or restart
    #[inline]
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Instant the timer started
    #[inline]
    #[must_use]
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    #[inline]
    fn is_interior(&self, slot: usize) -> bool {
        slot > 0 && slot < self.slots.len() - 1
    }
}
