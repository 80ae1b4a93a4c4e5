//! Cache Store Module
//!
//! Main cache engine: a HashMap of entries behind a single reader/writer lock,
//! with lazy expiration on reads and bulk purging of expired entries.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::cache::{CacheEntry, Decode, Encode, Ttl};
use crate::error::{CacheError, Result};

/// TTL value meaning "never expires".
pub const NO_EXPIRATION: Duration = Duration::ZERO;

// == Cache Store ==
/// Thread-safe key-value storage with per-entry expiration.
///
/// Mutations take the write lock, reads take the read lock. Encoding happens
/// before the write lock is taken and decoding after the read lock is released,
/// so the lock only ever guards the map itself.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // The map is only changed through single HashMap calls, so a guard
    // recovered from a poisoned lock still sees a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    // == Set ==
    /// Stores a value that never expires.
    pub fn set<V>(&self, key: impl Into<String>, value: &V) -> Result<()>
    where
        V: Encode + ?Sized,
    {
        self.set_with_expiration(key, value, NO_EXPIRATION)
    }

    /// Stores a value with a time-to-live.
    ///
    /// A zero `ttl` means no expiration. An existing entry under the same key is
    /// replaced wholesale. If encoding fails the map is left untouched.
    pub fn set_with_expiration<V>(
        &self,
        key: impl Into<String>,
        value: &V,
        ttl: Duration,
    ) -> Result<()>
    where
        V: Encode + ?Sized,
    {
        let bytes = value.encode()?;
        let key = key.into();
        let entry = CacheEntry::new(bytes, ttl);

        trace!(key = %key, ttl = ?ttl, "set");
        self.write().insert(key, entry);

        Ok(())
    }

    // == Get ==
    /// Looks up the live value's shared bytes, copying nothing under the lock.
    fn lookup(&self, key: &str) -> Option<Arc<[u8]>> {
        let now = Instant::now();
        self.read()
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(CacheEntry::value_shared)
    }

    /// Returns the raw stored bytes of a live entry.
    pub fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        self.lookup(key).map(|bytes| bytes.to_vec())
    }

    /// Returns the stored bytes reinterpreted as text, bypassing decoding.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.lookup(key)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Retrieves and decodes a value into the requested shape.
    ///
    /// Returns `Ok(None)` when the key is absent or expired. A
    /// [`CacheError::Decode`] means the key was found but its bytes could not
    /// be turned into `T`.
    pub fn get<T: Decode>(&self, key: &str) -> Result<Option<T>> {
        match self.lookup(key) {
            Some(bytes) => T::decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    // == Exists ==
    /// Returns true if the key is present and not expired.
    pub fn exists(&self, key: &str) -> bool {
        let now = Instant::now();
        self.read()
            .get(key)
            .is_some_and(|entry| !entry.is_expired_at(now))
    }

    // == Delete ==
    /// Removes an entry by key. Deleting an absent key is a no-op.
    pub fn delete(&self, key: &str) {
        let removed = self.write().remove(key);
        if let Some(entry) = removed {
            trace!(key = %key, created_at = %entry.created_at(), "deleted");
        }
    }

    // == Flush ==
    /// Removes every entry.
    pub fn flush(&self) {
        let old = std::mem::take(&mut *self.write());
        debug!("Flushed {} entries", old.len());
    }

    // == Count ==
    /// Returns the number of entries held, including expired entries that
    /// have not been purged yet.
    pub fn count(&self) -> usize {
        self.read().len()
    }

    // == Delete Expired ==
    /// Removes all entries that have expired as of now.
    ///
    /// Returns the number of entries removed.
    pub fn delete_expired(&self) -> usize {
        self.delete_expired_at(Instant::now())
    }

    /// Removes all entries whose expiration is at or before `now`.
    ///
    /// Returns the number of entries removed. Never-expiring entries are kept.
    pub fn delete_expired_at(&self, now: Instant) -> usize {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_purgeable_at(now));
        before - entries.len()
    }

    // == Time To Live ==
    /// Returns the remaining lifetime of a key.
    ///
    /// Fails with [`CacheError::KeyNotFound`] if the key is absent and
    /// [`CacheError::KeyExpired`] if it lapsed but has not been purged yet.
    pub fn ttl(&self, key: &str) -> Result<Ttl> {
        let now = Instant::now();
        let entries = self.read();
        let entry = entries
            .get(key)
            .ok_or_else(|| CacheError::KeyNotFound(key.to_string()))?;

        entry
            .ttl_at(now)
            .ok_or_else(|| CacheError::KeyExpired(key.to_string()))
    }
}
