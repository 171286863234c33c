//! Encryption at rest for the verification store.
//!
//! The default strategy is AES-256-GCM keyed by the SHA-256 of a passphrase.
//! Sealed payloads are laid out as:
//! ```text
//! nonce (12 bytes) || ciphertext+tag
//! ```

use crate::ItchError;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use sha2::{Digest, Sha256};

/// Length of the AES-GCM nonce prefix.
pub const NONCE_LEN: usize = 12;

/// Swappable encryption strategy for persisted bytes.
pub trait Cipher: Send + Sync {
    /// Encrypt a plaintext payload.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, ItchError>;

    /// Decrypt a payload produced by [`Cipher::encrypt`].
    fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>, ItchError>;
}

/// AES-256-GCM cipher with a key derived from a passphrase.
pub struct PassphraseCipher {
    cipher: Aes256Gcm,
}

impl PassphraseCipher {
    /// Derive the key from `passphrase` and build the cipher.
    pub fn new(passphrase: &str) -> Result<Self, ItchError> {
        let key = derive_key(passphrase);
        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| ItchError::CipherError(format!("Invalid key length: {}", e)))?;
        Ok(Self { cipher })
    }
}

impl std::fmt::Debug for PassphraseCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassphraseCipher").finish_non_exhaustive()
    }
}

impl Cipher for PassphraseCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, ItchError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| ItchError::CipherError(format!("Encryption failed: {}", e)))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>, ItchError> {
        if sealed.len() < NONCE_LEN {
            return Err(ItchError::CipherError(format!(
                "Payload too short: {} bytes",
                sealed.len()
            )));
        }
        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| ItchError::CipherError("Decryption failed (wrong key or tampered data)".to_string()))
    }
}

/// Derive a 256-bit key from a passphrase.
pub fn derive_key(passphrase: &str) -> [u8; 32] {
    Sha256::digest(passphrase.as_bytes()).into()
}
