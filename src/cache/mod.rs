//! Cache Module
//!
//! Provides in-process caching with per-entry TTL expiration and a background
//! sweeper for expired entries.

mod codec;
mod entry;
mod handle;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use codec::{Decode, Encode, Json};
pub(crate) use entry::CacheEntry;
pub use entry::Ttl;
pub use handle::Cache;
pub use store::{CacheStore, NO_EXPIRATION};
