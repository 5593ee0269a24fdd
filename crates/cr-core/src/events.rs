//! Chain events and observer registry
//!
//! Observers are plain closures run synchronously, in subscription order, on
//! the thread that mutated the chain.

use crate::error::ChainError;
use crate::types::Completion;
use serde::{Deserialize, Serialize};

/// Something that happened to a chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEvent {
    /// A word was accepted into a slot
    SlotFilled {
        /// Slot written
        slot: usize,
        /// Normalised word
        word: String,
        /// Next slot to prompt for
        next_slot: Option<usize>,
    },
    /// A submission was rejected
    SubmissionRejected {
        /// Target slot of the submission
        slot: usize,
        /// Why it was rejected
        error: ChainError,
    },
    /// Every slot is filled; fired once per lifecycle
    Completed(Completion),
    /// Progress was cleared and the timer restarted
    Reset,
}

/// Token returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&ChainEvent) + Send>;

/// Ordered list of observers
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl EventBus {
    /// Create empty bus
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for every event
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&ChainEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Deliver `event` to every observer
    pub fn emit(&mut self, event: &ChainEvent) {
        for (_, observer) in &mut self.observers {
            observer(event);
        }
    }

    /// Number of registered observers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// No observers registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .finish()
    }
}
