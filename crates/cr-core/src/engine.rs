//! Chain registry addressed by handles
//!
//! Front-ends that cannot hold a [`Chain`] directly keep a [`ChainHandle`]
//! and go through the engine. The engine is owned by a single logical caller;
//! every mutating operation takes `&mut self`.

use crate::chain::Chain;
use crate::clock::{SharedClock, SystemClock};
use crate::error::{ChainError, EngineError};
use crate::events::{ChainEvent, SubscriptionId};
use crate::types::{ChainHandle, ChainId, ChainSnapshot, SubmitOutcome};
use std::collections::HashMap;

/// Owns active chains
#[derive(Debug)]
pub struct ChainEngine {
    chains: HashMap<ChainId, Chain>,
    clock: SharedClock,
}

impl ChainEngine {
    /// Create engine using the system clock
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock::shared())
    }

    /// Create engine whose chains read `clock`
    #[must_use]
    pub fn with_clock(clock: SharedClock) -> Self {
        Self {
            chains: HashMap::new(),
            clock,
        }
    }

    /// Create a chain and return its handle
    ///
    /// # Errors
    /// [`ChainError::InvalidConfiguration`] for malformed setups.
    pub fn create_chain(
        &mut self,
        start: &str,
        end: &str,
        length: usize,
    ) -> Result<ChainHandle, ChainError> {
        let chain = Chain::with_clock(start, end, length, self.clock.clone())?;
        let id = ChainId::new();
        self.chains.insert(id, chain);
        tracing::debug!(chain = %id, "chain registered");
        Ok(ChainHandle(id))
    }

    /// Submit a word, flattening rejections into the outcome
    ///
    /// Every submission to an open slot of an unfinished chain counts as an
    /// attempt, wrong-length words included. `InvalidSlot` and
    /// `AlreadyComplete` rejections leave the attempt count unchanged; see
    /// [`ChainError::counts_as_attempt`].
    ///
    /// # Errors
    /// [`EngineError::UnknownChain`] for stale handles; chain rejections are
    /// reported in [`SubmitOutcome::error_kind`].
    pub fn submit_word(
        &mut self,
        handle: ChainHandle,
        slot: usize,
        candidate: &str,
    ) -> Result<SubmitOutcome, EngineError> {
        let chain = self.chain_mut(handle)?;
        Ok(SubmitOutcome::from_result(&chain.submit(slot, candidate)))
    }

    /// Whether the chain is complete
    ///
    /// # Errors
    /// [`EngineError::UnknownChain`] for stale handles.
    pub fn is_complete(&self, handle: ChainHandle) -> Result<bool, EngineError> {
        Ok(self.chain(handle)?.is_complete())
    }

    /// Register a completion callback `(attempts, elapsed_secs)`
    ///
    /// # Errors
    /// [`EngineError::UnknownChain`] for stale handles.
    pub fn on_complete<F>(
        &mut self,
        handle: ChainHandle,
        callback: F,
    ) -> Result<SubscriptionId, EngineError>
    where
        F: FnMut(u32, u64) + Send + 'static,
    {
        Ok(self.chain_mut(handle)?.on_complete(callback))
    }

    /// Register an observer for every event of the chain
    ///
    /// # Errors
    /// [`EngineError::UnknownChain`] for stale handles.
    pub fn subscribe<F>(
        &mut self,
        handle: ChainHandle,
        observer: F,
    ) -> Result<SubscriptionId, EngineError>
    where
        F: FnMut(&ChainEvent) + Send + 'static,
    {
        Ok(self.chain_mut(handle)?.subscribe(observer))
    }

    /// Restart the chain with the same words
    ///
    /// # Errors
    /// [`EngineError::UnknownChain`] for stale handles.
    pub fn reset_chain(&mut self, handle: ChainHandle) -> Result<(), EngineError> {
        self.chain_mut(handle)?.reset();
        Ok(())
    }

    /// Drop the chain; the handle becomes stale
    pub fn remove_chain(&mut self, handle: ChainHandle) -> Option<Chain> {
        self.chains.remove(&handle.0)
    }

    /// Current progress
    ///
    /// # Errors
    /// [`EngineError::UnknownChain`] for stale handles.
    pub fn snapshot(&self, handle: ChainHandle) -> Result<ChainSnapshot, EngineError> {
        Ok(self.chain(handle)?.snapshot())
    }

    /// Borrow the chain behind a handle
    ///
    /// # Errors
    /// [`EngineError::UnknownChain`] for stale handles.
    pub fn chain(&self, handle: ChainHandle) -> Result<&Chain, EngineError> {
        self.chains
            .get(&handle.0)
            .ok_or(EngineError::UnknownChain(handle.0))
    }

    fn chain_mut(&mut self, handle: ChainHandle) -> Result<&mut Chain, EngineError> {
        self.chains
            .get_mut(&handle.0)
            .ok_or(EngineError::UnknownChain(handle.0))
    }

    /// Number of live chains
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// No live chains
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl Default for ChainEngine {
    fn default() -> Self {
        Self::new()
    }
}
