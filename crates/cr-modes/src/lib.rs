//! ChainReaction Modes
//!
//! Game sessions layered on [`cr_core::Chain`]: the daily challenge, timed
//! runs against a countdown, and endless runs with rising difficulty.
//!
//! # Overview
//!
//! - **Daily**: [`DailyRun`] solves one scheduled puzzle and saves the result
//! - **Timed**: [`TimedRun`] levels up per cleared chain until time runs out
//! - **Endless**: [`EndlessRun`] plays batches until the player stops
//! - **Provisioning**: [`provision`] falls back to the built-in [`catalog`]
//! - **Readout**: [`ElapsedTicker`] publishes elapsed seconds
//!
//! Collaborators are injected through [`Services`].

#![warn(unreachable_pub)]

pub mod catalog;
pub mod daily;
pub mod endless;
pub mod error;
pub mod provision;
pub mod replay;
pub mod scoring;
pub mod session;
pub mod ticker;
pub mod timed;

// Re-exports
pub use daily::{DailyProgress, DailyRun};
pub use endless::{EndlessConfig, EndlessRun};
pub use error::ModeError;
pub use replay::{demo_puzzle, replay, Replay, ReplayStep, DEMO_SOLUTION};
pub use session::{Cleared, RecordOutcome, RoundProgress, Services};
pub use ticker::ElapsedTicker;
pub use timed::{TimedConfig, TimedRun};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running game modes
    pub use crate::{
        DailyRun, EndlessConfig, EndlessRun, ModeError, RoundProgress, Services, TimedConfig,
        TimedRun,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
