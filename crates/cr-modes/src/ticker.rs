//! Elapsed-seconds readout
//!
//! A background task samples the clock once a second and publishes the
//! whole seconds since `start` on a watch channel. Stopping it never touches
//! the chain, so frozen completion metrics stay as they are.

use cr_core::clock::elapsed_secs;
use cr_core::{Clock, SharedClock};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

const TICK: Duration = Duration::from_secs(1);

/// Running elapsed-time publisher; aborted on drop
#[derive(Debug)]
pub struct ElapsedTicker {
    rx: watch::Receiver<u64>,
    task: JoinHandle<()>,
}

impl ElapsedTicker {
    /// Start publishing seconds elapsed since `start`
    ///
    /// Must be called inside a tokio runtime.
    #[must_use]
    pub fn spawn(clock: SharedClock, start: Instant) -> Self {
        let (tx, rx) = watch::channel(elapsed_secs(start, clock.now()));

        let task = tokio::spawn(async move {
            let mut ticker = interval(TICK);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let secs = elapsed_secs(start, clock.now());
                tx.send_if_modified(|current| {
                    let changed = *current != secs;
                    *current = secs;
                    changed
                });
                if tx.is_closed() {
                    break;
                }
            }
        });

        Self { rx, task }
    }

    /// New receiver for the readout
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.rx.clone()
    }

    /// Last published value
    #[must_use]
    pub fn current(&self) -> u64 {
        *self.rx.borrow()
    }

    /// Stop publishing
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for ElapsedTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cr_core::{Chain, ManualClock};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn publishes_clock_seconds() {
        let clock = Arc::new(ManualClock::new());
        let ticker = ElapsedTicker::spawn(clock.clone(), clock.now());
        assert_eq!(ticker.current(), 0);

        clock.advance_secs(3);
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        assert_eq!(ticker.current(), 3);

        clock.advance_secs(2);
        tokio::time::sleep(TICK).await;
        assert_eq!(ticker.current(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn stopping_closes_receivers() {
        let clock = Arc::new(ManualClock::new());
        let ticker = ElapsedTicker::spawn(clock.clone(), clock.now());
        let mut rx = ticker.subscribe();

        ticker.stop();
        clock.advance_secs(10);
        assert!(rx.changed().await.is_err());
        assert_eq!(*rx.borrow(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stopping_leaves_completion_frozen() {
        let clock = Arc::new(ManualClock::new());
        let mut chain = Chain::with_clock("CAT", "DOG", 4, clock.clone()).unwrap();
        let ticker = ElapsedTicker::spawn(clock.clone(), chain.tracker().started_at());

        clock.advance_secs(4);
        chain.submit(1, "COT").unwrap();
        chain.submit(2, "COG").unwrap();
        tokio::time::sleep(TICK).await;
        ticker.stop();

        clock.advance_secs(30);
        assert_eq!(chain.elapsed_secs(), 4);
        assert_eq!(chain.completion().unwrap().elapsed_secs, 4);
    }
}
