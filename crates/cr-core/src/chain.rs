//! A playable word chain
//!
//! [`Chain`] ties together:
//! - the [`ChainTracker`] holding slots and attempts
//! - the [`CompletionDetector`] freezing final metrics
//! - the [`EventBus`] that front-ends subscribe to
//! - an injected [`Clock`](crate::clock::Clock)

use crate::clock::{SharedClock, SystemClock};
use crate::completion::CompletionDetector;
use crate::error::ChainError;
use crate::events::{ChainEvent, EventBus, SubscriptionId};
use crate::tracker::ChainTracker;
use crate::types::{Accepted, ChainSnapshot, Completion};

/// Word chain with timer and observers
#[derive(Debug)]
pub struct Chain {
    tracker: ChainTracker,
    detector: CompletionDetector,
    events: EventBus,
    clock: SharedClock,
}

impl Chain {
    /// Create chain timed by the system clock
    ///
    /// # Errors
    /// [`ChainError::InvalidConfiguration`] for malformed setups.
    pub fn new(start: &str, end: &str, length: usize) -> Result<Self, ChainError> {
        Self::with_clock(start, end, length, SystemClock::shared())
    }

    /// Create chain timed by `clock`
    ///
    /// # Errors
    /// [`ChainError::InvalidConfiguration`] for malformed setups.
    pub fn with_clock(
        start: &str,
        end: &str,
        length: usize,
        clock: SharedClock,
    ) -> Result<Self, ChainError> {
        let tracker = ChainTracker::initialize(start, end, length, clock.now())?;
        tracing::debug!(
            start = tracker.start_word(),
            end = tracker.end_word(),
            length,
            "chain initialised"
        );

        Ok(Self {
            tracker,
            detector: CompletionDetector::new(),
            events: EventBus::new(),
            clock,
        })
    }

    /// Submit `candidate` for `slot`
    ///
    /// Emits [`ChainEvent::SlotFilled`] or [`ChainEvent::SubmissionRejected`],
    /// followed by [`ChainEvent::Completed`] when this word fills the chain.
    ///
    /// # Errors
    /// See [`ChainTracker::submit`].
    pub fn submit(&mut self, slot: usize, candidate: &str) -> Result<Accepted, ChainError> {
        match self.tracker.submit(candidate, slot) {
            Ok(accepted) => {
                let word = self.tracker.word(slot).unwrap_or_default().to_string();
                tracing::debug!(slot, word = %word, next = ?accepted.next_slot, "word accepted");
                self.events.emit(&ChainEvent::SlotFilled {
                    slot,
                    word,
                    next_slot: accepted.next_slot,
                });
                self.check_completion();
                Ok(accepted)
            }
            Err(error) => {
                tracing::debug!(slot, %error, attempts = self.tracker.attempts(), "word rejected");
                self.events.emit(&ChainEvent::SubmissionRejected {
                    slot,
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    /// Every slot is filled
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.tracker.is_complete()
    }

    /// Register an observer for all chain events
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&ChainEvent) + Send + 'static,
    {
        self.events.subscribe(observer)
    }

    /// Register a callback for completion `(attempts, elapsed_secs)`
    ///
    /// Completion fires once per lifecycle; registering after it fired does
    /// not replay it.
    pub fn on_complete<F>(&mut self, mut callback: F) -> SubscriptionId
    where
        F: FnMut(u32, u64) + Send + 'static,
    {
        self.events.subscribe(move |event| {
            if let ChainEvent::Completed(done) = event {
                callback(done.attempts, done.elapsed_secs);
            }
        })
    }

    /// Remove an observer
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Clear progress, zero attempts and restart the timer
    pub fn reset(&mut self) {
        self.tracker.restart(self.clock.now());
        self.detector.rearm();
        tracing::debug!(start = self.tracker.start_word(), "chain reset");
        self.events.emit(&ChainEvent::Reset);
    }

    /// Frozen metrics, once complete
    #[inline]
    #[must_use]
    pub fn completion(&self) -> Option<Completion> {
        self.detector.completion()
    }

    /// Seconds since start, frozen at completion
    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.detector.elapsed_secs(&self.tracker, self.clock.now())
    }

    /// Attempts counted so far
    #[inline]
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.tracker.attempts()
    }

    /// Lowest empty interior slot
    #[inline]
    #[must_use]
    pub fn next_slot(&self) -> Option<usize> {
        self.tracker.next_empty_slot()
    }

    /// Underlying slot state
    #[inline]
    #[must_use]
    pub fn tracker(&self) -> &ChainTracker {
        &self.tracker
    }

    /// Serializable view of current progress
    #[must_use]
    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot {
            slots: self.tracker.slots().to_vec(),
            attempts: self.tracker.attempts(),
            next_slot: self.tracker.next_empty_slot(),
            completion: self.detector.completion(),
        }
    }

    fn check_completion(&mut self) {
        if let Some(done) = self.detector.observe(&self.tracker, self.clock.now()) {
            tracing::info!(
                attempts = done.attempts,
                elapsed_secs = done.elapsed_secs,
                "chain complete"
            );
            self.events.emit(&ChainEvent::Completed(done));
        }
    }
}
