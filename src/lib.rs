//! # Itchwarden
//!
//! **[itch.io](https://itch.io) server-side API client with an encrypted
//! purchase-verification cache.**
//!
//! Itchwarden wraps the itch.io `api/1/{key}` endpoints, classifies every
//! response into a uniform [`ApiResult`], and remembers verified download keys
//! locally so purchase checks keep working without a network round trip.
//!
//! ## Features
//!
//! - **Async API calls** — `me`, `my-games`, game purchases, uploads, download keys
//! - **Purchase verification** — download keys checked once, then answered from cache
//! - **Encrypted cache** — AES-256-GCM at rest, atomic writes, lazy load
//! - **Event channel** — every result is also broadcast as an [`ItchEvent`]
//! - **OAuth helpers** — build or open the `profile:me` authorization URL
//!
//! ## Quickstart
//!
//! ```no_run
//! use itchwarden::{Credentials, ItchClient, ItchConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), itchwarden::ItchError> {
//!     let config = ItchConfig::new(Credentials::new("your-api-key", "123456"));
//!     let client = ItchClient::new(config)?;
//!
//!     let check = client.verify_purchase("DOWNLOAD-KEY-HERE").await?;
//!     if check.verified {
//!         println!("Purchase verified! (cached: {})", check.from_cache);
//!     }
//!
//!     client.shutdown().await
//! }
//! ```
//!
//! ## Errors
//!
//! Operations fail with `Err(ItchError)` only for preconditions detected
//! before any I/O (missing API key or parameter, client shut down). Everything
//! that happens after dispatch, including HTTP errors, timeouts and malformed
//! bodies, is reported as [`ApiResult::Error`].
//!
//! ## Security
//!
//! The default cache passphrase ships with the binary. It keeps casual users
//! from editing the cache file, nothing more. Supply your own passphrase via
//! [`ItchConfig::cache_passphrase`] or a custom [`crypto::Cipher`].

#![deny(missing_docs)]
#![doc(html_root_url = "https://docs.rs/itchwarden/0.1.0")]

// Core modules
pub mod clock;
pub mod config;
pub mod errors;

// Crypto layer
pub mod crypto;

// Protocol layer
pub mod protocol;

// Client layer
pub mod client;

// Cache layer
pub mod cache;

// Notifications
pub mod events;

// OAuth helpers
pub mod oauth;

// Manager (main public API)
pub mod manager;

// Re-exports for public API
pub use cache::{FileStore, KeyValueStore, MemoryStore, VerificationCache};
pub use client::{HttpResponse, HttpTransport, ReqwestTransport};
pub use clock::{Clock, SystemClock};
pub use config::{Credentials, ItchConfig};
pub use errors::ItchError;
pub use events::ItchEvent;
pub use manager::ItchClient;
pub use protocol::{ApiResult, JsonObject, PendingRequest, PurchaseCheck, RequestType};

#[cfg(any(test, feature = "test-seams"))]
pub use client::http::MockTransport;
#[cfg(any(test, feature = "test-seams"))]
pub use clock::MockClock;
