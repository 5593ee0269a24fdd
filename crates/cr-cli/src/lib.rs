//! ChainReaction CLI
//!
//! Terminal front end for the chain engine and game modes, backed by the
//! in-memory store and a JSON results file.

#![warn(unreachable_pub)]

pub mod cli;
pub mod config;
pub mod logging;
pub mod play;
pub mod render;
pub mod storage;

pub use config::AppConfig;
pub use logging::init_tracing;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
