//! Cache Entry Codec
//!
//! The cached payload is an opaque JSON blob: the service never interprets
//! individual records, it only checks that a blob is well-formed before
//! serving or storing it. Bytes are preserved exactly through a
//! write-then-read cycle.

use serde_json::Value;

use crate::error::CodecError;

/// A validated cached payload.
///
/// Holds the exact bytes fetched from upstream or read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPayload {
    bytes: Vec<u8>,
}

impl CachedPayload {
    /// Validates that `bytes` is well-formed JSON and wraps it.
    ///
    /// A blob that fails validation is unusable as a cache entry; callers
    /// treat that the same as the entry being absent.
    pub fn decode(bytes: Vec<u8>) -> Result<Self, CodecError> {
        serde_json::from_slice::<Value>(&bytes)?;
        Ok(Self { bytes })
    }

    /// The payload bytes, exactly as fetched.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the payload, yielding the bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Parses the payload into a JSON value.
    pub fn to_value(&self) -> Result<Value, CodecError> {
        Ok(serde_json::from_slice(&self.bytes)?)
    }
}
