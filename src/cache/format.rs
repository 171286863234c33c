//! Verification store format.
//!
//! The whole store is one JSON document:
//! ```text
//! {
//!   "verifications": { "<download_key>": true, ... },
//!   "metadata":      { "<download_key>": { ...response fields, "timestamp": <unix> }, ... }
//! }
//! ```
//! Only verified keys carry metadata.

use crate::protocol::models::JsonObject;
use crate::ItchError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Metadata key holding the unix time a record was written.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// The persisted unit of the verification cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationStore {
    /// Verified flag per download key.
    #[serde(default)]
    pub verifications: BTreeMap<String, bool>,

    /// Response metadata per verified download key.
    #[serde(default)]
    pub metadata: BTreeMap<String, JsonObject>,
}

/// A single download key's cached verification.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRecord {
    /// The itch.io download key.
    pub download_key: String,

    /// Whether the key was confirmed as a valid purchase.
    pub verified: bool,

    /// Response metadata, without the timestamp.
    pub metadata: JsonObject,

    /// Unix seconds when the record was written (0 if never verified).
    pub timestamp: i64,
}

impl VerificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the store to JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>, ItchError> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| ItchError::StorageError(format!("Failed to serialize store: {}", e)))
    }

    /// Deserialize a store from JSON bytes.
    pub fn from_json(json: &[u8]) -> Result<Self, ItchError> {
        serde_json::from_slice(json)
            .map_err(|e| ItchError::StorageError(format!("Failed to deserialize store: {}", e)))
    }

    /// Whether `download_key` is recorded as verified.
    pub fn is_verified(&self, download_key: &str) -> bool {
        self.verifications.get(download_key).copied().unwrap_or(false)
    }

    /// Record a verification outcome.
    ///
    /// Verified keys get `metadata` plus `timestamp`, replacing any previous
    /// metadata. Unverified keys lose their metadata.
    pub fn set(&mut self, download_key: &str, verified: bool, metadata: &JsonObject, timestamp: i64) {
        self.verifications.insert(download_key.to_string(), verified);

        if verified {
            let mut entry = metadata.clone();
            entry.insert(TIMESTAMP_KEY.to_string(), Value::from(timestamp));
            self.metadata.insert(download_key.to_string(), entry);
        } else {
            self.metadata.remove(download_key);
        }
    }

    /// Stored metadata for `download_key`, timestamp included.
    pub fn metadata_for(&self, download_key: &str) -> Option<&JsonObject> {
        self.metadata.get(download_key)
    }

    /// Structured view of one key, if it has ever been recorded.
    pub fn record(&self, download_key: &str) -> Option<VerificationRecord> {
        let verified = *self.verifications.get(download_key)?;
        let mut metadata = self.metadata.get(download_key).cloned().unwrap_or_default();
        let timestamp = metadata
            .remove(TIMESTAMP_KEY)
            .and_then(|v| v.as_i64())
            .unwrap_or(0);

        Some(VerificationRecord {
            download_key: download_key.to_string(),
            verified,
            metadata,
            timestamp,
        })
    }

    /// Forget everything about `download_key`. Returns whether anything was removed.
    pub fn remove(&mut self, download_key: &str) -> bool {
        let had_flag = self.verifications.remove(download_key).is_some();
        let had_meta = self.metadata.remove(download_key).is_some();
        had_flag || had_meta
    }

    /// Drop both maps.
    pub fn clear(&mut self) {
        self.verifications.clear();
        self.metadata.clear();
    }

    /// Number of download keys with a recorded outcome.
    pub fn len(&self) -> usize {
        self.verifications.len()
    }

    /// Whether no outcome is recorded.
    pub fn is_empty(&self) -> bool {
        self.verifications.is_empty() && self.metadata.is_empty()
    }
}
