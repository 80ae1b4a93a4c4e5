//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

// == Time To Live ==
/// Remaining lifetime of a live entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// The entry never expires
    Infinite,
    /// Time left until the entry expires
    Remaining(Duration),
}

// == Cache Entry ==
/// A stored key's encoded value plus its expiration and creation timestamps.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
    /// The encoded value, shared so reads can copy it out after releasing the lock
    value: Arc<[u8]>,
    /// Expiration instant, None = no expiration
    expires_at: Option<Instant>,
    /// Wall-clock creation time, informational only
    created_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// A zero `ttl` means the entry never expires; there is no way to ask for
    /// immediate expiration through this parameter.
    pub fn new(value: Vec<u8>, ttl: Duration) -> Self {
        let expires_at = if ttl.is_zero() {
            None
        } else {
            Instant::now().checked_add(ttl)
        };

        Self {
            value: value.into(),
            expires_at,
            created_at: Utc::now(),
        }
    }

    /// Returns a shared handle to the stored bytes.
    pub fn value_shared(&self) -> Arc<[u8]> {
        Arc::clone(&self.value)
    }

    /// Returns when the entry was written.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // == Is Expired ==
    /// Checks whether the entry is logically expired at `now`.
    ///
    /// The expiration instant itself still counts as live.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(expires) if now > expires)
    }

    /// Whether a purge running at `now` should remove this entry.
    pub(crate) fn is_purgeable_at(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(expires) if expires <= now)
    }

    // == Time To Live ==
    /// Returns the remaining TTL at `now`, or None if the entry has expired.
    pub fn ttl_at(&self, now: Instant) -> Option<Ttl> {
        match self.expires_at {
            None => Some(Ttl::Infinite),
            Some(expires) if now > expires => None,
            Some(expires) => Some(Ttl::Remaining(expires - now)),
        }
    }
}
