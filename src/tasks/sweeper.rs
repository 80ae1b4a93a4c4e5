//! Expired Entry Sweeper
//!
//! Background task that periodically purges expired cache entries.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::runtime::Builder;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::cache::CacheStore;

/// Lifecycle state of a [`Sweeper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperState {
    /// Never started, stopped, or the task has exited
    Stopped,
    /// Purging on every tick
    Running,
}

// == Sweeper ==
/// Handle to the background purge task.
///
/// Stopping is a one-shot broadcast: it never blocks and may be repeated.
/// Dropping the handle also stops the task.
#[derive(Debug)]
pub struct Sweeper {
    /// Shutdown signal, None if no task was started
    shutdown_tx: Option<watch::Sender<bool>>,
}

impl Sweeper {
    /// Returns a sweeper that was never started.
    pub fn stopped() -> Self {
        Self { shutdown_tx: None }
    }

    /// Starts purging `store` every `interval`.
    ///
    /// A zero interval starts nothing. The task runs on a dedicated thread
    /// driving its own current-thread runtime.
    pub fn start(store: Arc<CacheStore>, interval: Duration) -> Self {
        if interval.is_zero() {
            debug!("Cleanup interval is zero, sweeper disabled");
            return Self::stopped();
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        // Own thread and runtime, so the task neither dies with nor waits on
        // whatever runtime the caller happens to be in.
        let spawned = thread::Builder::new()
            .name("cache-sweeper".to_string())
            .spawn(move || match Builder::new_current_thread().enable_time().build() {
                Ok(runtime) => runtime.block_on(run(store, interval, shutdown_rx)),
                Err(e) => error!("Failed to build sweeper runtime: {}", e),
            });

        if let Err(e) = spawned {
            error!("Failed to spawn sweeper thread: {}", e);
            return Self::stopped();
        }

        Self {
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Signals the task to stop. Safe to call any number of times.
    pub fn stop(&self) {
        if let Some(tx) = &self.shutdown_tx {
            if !tx.send_replace(true) {
                debug!("Sweeper stop requested");
            }
        }
    }

    /// Returns whether the task is still purging.
    pub fn state(&self) -> SweeperState {
        match &self.shutdown_tx {
            Some(tx) if !*tx.borrow() && !tx.is_closed() => SweeperState::Running,
            _ => SweeperState::Stopped,
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Purge loop. Exits once the shutdown flag is set or its sender is gone.
async fn run(store: Arc<CacheStore>, interval: Duration, mut shutdown_rx: watch::Receiver<bool>) {
    info!("Starting sweeper with interval of {:?}", interval);

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            biased;

            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                let removed = store.delete_expired();
                if removed > 0 {
                    info!("Sweeper: removed {} expired entries", removed);
                } else {
                    debug!("Sweeper: no expired entries found");
                }
            }
        }
    }

    info!("Sweeper stopped");
}
