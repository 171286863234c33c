//! Encrypted cache of purchase verifications.
//!
//! The store is loaded lazily on first access and rewritten in full after
//! every mutation. Failures never propagate out of the read/mutate API:
//! - load failure (I/O, decryption, JSON) falls back to an empty store
//! - save failure is logged and the in-memory state stays authoritative

use crate::cache::file::{FileStore, KeyValueStore};
use crate::cache::format::{VerificationRecord, VerificationStore};
use crate::clock::{Clock, SystemClock};
use crate::config::ItchConfig;
use crate::crypto::{Cipher, PassphraseCipher};
use crate::protocol::models::JsonObject;
use crate::ItchError;
use std::sync::Arc;

/// Download-key verification cache, encrypted at rest.
pub struct VerificationCache {
    store: Box<dyn KeyValueStore>,
    cipher: Arc<dyn Cipher>,
    clock: Arc<dyn Clock>,
    storage_key: String,
    data: VerificationStore,
    loaded: bool,
}

impl VerificationCache {
    /// Create a cache over `store`, persisting under `storage_key`.
    ///
    /// Nothing is read until the first access.
    pub fn new(
        store: impl KeyValueStore + 'static,
        cipher: Arc<dyn Cipher>,
        storage_key: impl Into<String>,
    ) -> Self {
        Self::with_clock(store, cipher, storage_key, Arc::new(SystemClock))
    }

    /// Create a cache with a custom clock for record timestamps.
    pub fn with_clock(
        store: impl KeyValueStore + 'static,
        cipher: Arc<dyn Cipher>,
        storage_key: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store: Box::new(store),
            cipher,
            clock,
            storage_key: storage_key.into(),
            data: VerificationStore::new(),
            loaded: false,
        }
    }

    /// Open the per-user cache under `dirs::data_dir()/<namespace>/`,
    /// encrypted with the configured passphrase.
    pub fn open(namespace: &str, config: &ItchConfig) -> Result<Self, ItchError> {
        let store = FileStore::new(namespace)?;
        let cipher = PassphraseCipher::new(&config.cache_passphrase)?;
        Ok(Self::new(store, Arc::new(cipher), config.storage_key.clone()))
    }

    /// Load the store from durable storage if not already loaded.
    ///
    /// Idempotent: once loaded, later calls do nothing.
    pub fn load(&mut self) {
        if self.loaded {
            return;
        }

        self.data = match self.read_store() {
            Ok(Some(data)) => {
                tracing::debug!(entries = data.len(), "Loaded verification store");
                data
            }
            Ok(None) => {
                tracing::debug!("No verification store found, starting fresh");
                VerificationStore::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load verification store, starting fresh");
                VerificationStore::new()
            }
        };
        self.loaded = true;
    }

    /// Whether the store has been read from durable storage.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether `download_key` is recorded as verified. Unknown keys are not.
    pub fn is_verified(&mut self, download_key: &str) -> bool {
        self.load();
        self.data.is_verified(download_key)
    }

    /// Record a verification outcome and persist.
    ///
    /// `verified == true` stores `metadata` plus a timestamp, replacing any
    /// earlier record. `verified == false` deletes the key's metadata but
    /// keeps the `false` flag.
    pub fn set_verified(&mut self, download_key: &str, verified: bool, metadata: &JsonObject) {
        self.load();
        let timestamp = self.clock.unix_seconds();
        self.data.set(download_key, verified, metadata, timestamp);
        self.persist();
    }

    /// Cached metadata for `download_key` (timestamp included), or an empty object.
    pub fn get_verification_data(&mut self, download_key: &str) -> JsonObject {
        self.load();
        self.data.metadata_for(download_key).cloned().unwrap_or_default()
    }

    /// Structured record for `download_key`, if one exists.
    pub fn get_record(&mut self, download_key: &str) -> Option<VerificationRecord> {
        self.load();
        self.data.record(download_key)
    }

    /// Forget `download_key` and persist.
    pub fn clear_verification(&mut self, download_key: &str) {
        self.load();
        self.data.remove(download_key);
        self.persist();
    }

    /// Discard every record and persist the empty store.
    pub fn clear_all_data(&mut self) {
        self.load();
        self.data.clear();
        self.persist();
    }

    /// Write the in-memory store and flush the backend.
    ///
    /// A cache that was never loaded has nothing to write.
    pub fn flush(&mut self) -> Result<(), ItchError> {
        if !self.loaded {
            return Ok(());
        }
        self.save()?;
        self.store.flush()
    }

    fn read_store(&self) -> Result<Option<VerificationStore>, ItchError> {
        let Some(sealed) = self.store.get(&self.storage_key)? else {
            return Ok(None);
        };
        let json = self.cipher.decrypt(&sealed)?;
        VerificationStore::from_json(&json).map(Some)
    }

    fn save(&mut self) -> Result<(), ItchError> {
        let json = self.data.to_json()?;
        let sealed = self.cipher.encrypt(&json)?;
        self.store.set(&self.storage_key, &sealed)
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            tracing::error!(error = %e, "Failed to save verification store");
        }
    }
}

impl std::fmt::Debug for VerificationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationCache")
            .field("storage_key", &self.storage_key)
            .field("loaded", &self.loaded)
            .field("entries", &self.data.len())
            .finish()
    }
}
