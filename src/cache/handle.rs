//! Cache Handle Module
//!
//! The public entry point tying a store to its background sweeper.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheStore, Decode, Encode, Ttl};
use crate::config::Config;
use crate::error::Result;
use crate::tasks::{Sweeper, SweeperState};

// == Cache ==
/// An in-process key-value cache with optional per-entry expiration.
///
/// Each `Cache` is independent; share one between threads by wrapping it in an
/// `Arc`. Call [`Cache::stop_sweeper`] (or drop the cache) when done so the
/// background sweeper does not outlive it.
#[derive(Debug)]
pub struct Cache {
    store: Arc<CacheStore>,
    sweeper: Sweeper,
}

impl Cache {
    // == Constructor ==
    /// Creates a cache whose sweeper runs every `cleanup_interval`.
    ///
    /// A zero interval disables the sweeper; per-key TTLs are then only
    /// enforced lazily on read.
    pub fn new(cleanup_interval: Duration) -> Self {
        let store = Arc::new(CacheStore::new());
        let sweeper = Sweeper::start(Arc::clone(&store), cleanup_interval);

        Self { store, sweeper }
    }

    /// Creates a cache from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cleanup_interval)
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Stores a value that never expires.
    pub fn set<V: Encode + ?Sized>(&self, key: impl Into<String>, value: &V) -> Result<()> {
        self.store.set(key, value)
    }

    /// Stores a value that expires after `ttl`. A zero `ttl` never expires.
    pub fn set_with_expiration<V: Encode + ?Sized>(
        &self,
        key: impl Into<String>,
        value: &V,
        ttl: Duration,
    ) -> Result<()> {
        self.store.set_with_expiration(key, value, ttl)
    }

    /// Retrieves and decodes a value; see [`CacheStore::get`].
    pub fn get<T: Decode>(&self, key: &str) -> Result<Option<T>> {
        self.store.get(key)
    }

    /// Returns the raw stored bytes of a live entry.
    pub fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        self.store.get_raw(key)
    }

    /// Returns a live entry's bytes as text.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.store.get_text(key)
    }

    /// Returns true if the key is present and not expired.
    pub fn exists(&self, key: &str) -> bool {
        self.store.exists(key)
    }

    /// Removes a key; absent keys are ignored.
    pub fn delete(&self, key: &str) {
        self.store.delete(key)
    }

    /// Removes every entry.
    pub fn flush(&self) {
        self.store.flush()
    }

    /// Number of entries held, expired-but-unpurged ones included.
    pub fn count(&self) -> usize {
        self.store.count()
    }

    /// Purges expired entries now, returning how many were removed.
    pub fn delete_expired(&self) -> usize {
        self.store.delete_expired()
    }

    /// Remaining lifetime of a key; see [`CacheStore::ttl`].
    pub fn ttl(&self, key: &str) -> Result<Ttl> {
        self.store.ttl(key)
    }

    // == Sweeper Control ==
    /// Stops the background sweeper. Never blocks; repeated calls and calls on a
    /// cache built with a zero interval are no-ops.
    pub fn stop_sweeper(&self) {
        self.sweeper.stop()
    }

    /// Returns the background sweeper's state.
    pub fn sweeper_state(&self) -> SweeperState {
        self.sweeper.state()
    }
}
