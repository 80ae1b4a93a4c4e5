//! Value Codec Module
//!
//! Converts caller values to and from the byte form kept in the store.
//!
//! The set of shapes is closed: raw bytes and text pass through verbatim,
//! anything else goes through serde_json when wrapped in [`Json`]. The shape is
//! picked by the type the caller names, never by inspecting values at runtime.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CacheError, Result};

mod sealed {
    pub trait Sealed {}

    impl Sealed for [u8] {}
    impl Sealed for Vec<u8> {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T> Sealed for super::Json<T> {}
}

// == Structured Wrapper ==
/// Marks a value as structured data, encoded as JSON.
///
/// ```
/// use mini_cache::cache::Json;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct User {
///     name: String,
/// }
///
/// let wrapped = Json(User { name: "Ada".into() });
/// assert_eq!(wrapped.into_inner().name, "Ada");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Unwraps the structured value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

// == Encode ==
/// Values that can be written into the cache.
pub trait Encode: sealed::Sealed {
    /// Produces the stored byte form of the value.
    fn encode(&self) -> Result<Vec<u8>>;
}

impl Encode for [u8] {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

impl Encode for Vec<u8> {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.clone())
    }
}

impl Encode for str {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }
}

impl Encode for String {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }
}

impl<T: Serialize> Encode for Json<T> {
    fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.0).map_err(|e| CacheError::Encoding(Box::new(e)))
    }
}

// == Decode ==
/// Shapes a stored value can be read back into.
pub trait Decode: sealed::Sealed + Sized {
    /// Reconstructs the value from its stored bytes.
    fn decode(bytes: &[u8]) -> Result<Self>;
}

impl Decode for Vec<u8> {
    fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bytes.to_vec())
    }
}

impl Decode for String {
    /// Reinterprets the bytes as text; invalid UTF-8 is replaced, never rejected.
    fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

impl<T: DeserializeOwned> Decode for Json<T> {
    fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map(Json)
            .map_err(|e| CacheError::Decode(Box::new(e)))
    }
}
