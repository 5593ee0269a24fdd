//! One-shot completion detection
//!
//! The detector is checked after every accepted word. The first time it sees
//! a full tracker it freezes attempts and elapsed seconds; every later check
//! returns nothing until it is re-armed by a reset.

use crate::clock::elapsed_secs;
use crate::tracker::ChainTracker;
use crate::types::Completion;
use std::time::Instant;

/// Watches a tracker for its first complete state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionDetector {
    frozen: Option<Completion>,
}

impl CompletionDetector {
    /// Create armed detector
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `tracker`; yields the completion only on the first full observation
    pub fn observe(&mut self, tracker: &ChainTracker, now: Instant) -> Option<Completion> {
        if self.frozen.is_some() || !tracker.is_complete() {
            return None;
        }

        let completion = Completion {
            attempts: tracker.attempts(),
            elapsed_secs: elapsed_secs(tracker.started_at(), now),
        };
        self.frozen = Some(completion);
        Some(completion)
    }

    /// Frozen metrics, once fired
    #[inline]
    #[must_use]
    pub fn completion(&self) -> Option<Completion> {
        self.frozen
    }

    /// Whether the completion signal has fired
    #[inline]
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.frozen.is_some()
    }

    /// Elapsed seconds: frozen after completion, live before
    #[must_use]
    pub fn elapsed_secs(&self, tracker: &ChainTracker, now: Instant) -> u64 {
        match self.frozen {
            Some(done) => done.elapsed_secs,
            None => elapsed_secs(tracker.started_at(), now),
        }
    }

    /// Forget the frozen metrics so the next completion fires again
    #[inline]
    pub fn rearm(&mut self) {
        self.frozen = None;
    }
}
