//! Cryptographic primitives for the verification store.

pub mod cipher;

pub use cipher::{Cipher, PassphraseCipher};
