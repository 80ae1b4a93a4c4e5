//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

/// Boxed error produced by the value codec.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Only (de)serialization and TTL queries can fail; every other operation is
/// infallible.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Value could not be serialized on write
    #[error("Encoding error: {0}")]
    Encoding(#[source] BoxError),

    /// Stored bytes could not be reconstructed into the requested shape
    #[error("Decode error: {0}")]
    Decode(#[source] BoxError),

    /// Key not found in cache
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Key is present but its expiration has lapsed
    #[error("Key expired: {0}")]
    KeyExpired(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CacheError::KeyNotFound("a".to_string()).to_string(),
            "Key not found: a"
        );
        assert_eq!(
            CacheError::KeyExpired("b".to_string()).to_string(),
            "Key expired: b"
        );
    }

    #[test]
    fn test_codec_errors_keep_source() {
        let inner = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = CacheError::Decode(Box::new(inner));

        assert!(err.to_string().starts_with("Decode error: "));
        assert!(err.source().is_some());
    }
}
