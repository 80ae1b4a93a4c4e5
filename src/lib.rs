//! Mini Cache - A lightweight in-process key-value cache
//!
//! Stores arbitrary values as bytes with optional per-entry expiration. Expired
//! entries are hidden on read and purged periodically by a background sweeper.
//!
//! ```
//! use mini_cache::Cache;
//! use std::time::Duration;
//!
//! let cache = Cache::new(Duration::ZERO);
//! cache.set("greeting", "Hello, world!").unwrap();
//! assert_eq!(cache.get_text("greeting").as_deref(), Some("Hello, world!"));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Cache, Json, Ttl};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::SweeperState;
