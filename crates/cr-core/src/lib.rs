//! ChainReaction Core - word chain validation engine
//!
//! A chain runs from a fixed start word to a fixed end word through a number
//! of blank slots. Each word placed in a blank must differ from its filled
//! neighbours by exactly one letter at the same position.
//!
//! # Overview
//!
//! - **Comparator**: [`differs_by_exactly_one`]
//! - **Tracker**: [`ChainTracker`] owns slots and the attempt counter
//! - **Detector**: [`CompletionDetector`] freezes attempts and time once
//! - **Chain**: [`Chain`] combines them with a clock and an [`EventBus`]
//! - **Engine**: [`ChainEngine`] addresses chains by [`ChainHandle`]
//!
//! # Example
//!
//! ```rust
//! use cr_core::Chain;
//!
//! let mut chain = Chain::new("CAT", "DOG", 4).unwrap();
//! chain.on_complete(|attempts, secs| println!("done in {attempts} tries, {secs}s"));
//!
//! let step = chain.submit(1, "cot").unwrap();
//! assert_eq!(step.next_slot, Some(2));
//!
//! chain.submit(2, "COG").unwrap();
//! assert!(chain.is_complete());
//! assert_eq!(chain.attempts(), 2);
//! ```

#![warn(unreachable_pub)]

pub mod chain;
pub mod clock;
pub mod completion;
pub mod distance;
pub mod engine;
pub mod error;
pub mod events;
pub mod tracker;
pub mod types;

// Re-exports
pub use chain::Chain;
pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use completion::CompletionDetector;
pub use distance::{differs_by_exactly_one, letter_distance};
pub use engine::ChainEngine;
pub use error::{ChainError, EngineError, ErrorKind};
pub use events::{ChainEvent, EventBus, SubscriptionId};
pub use tracker::ChainTracker;
pub use types::{
    normalize_word, word_len, Accepted, ChainHandle, ChainId, ChainSnapshot, Completion,
    SubmitOutcome, MIN_CHAIN_LENGTH,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving chains
    pub use crate::{
        Accepted, Chain, ChainEngine, ChainError, ChainEvent, ChainHandle, Completion,
        SubmitOutcome,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
