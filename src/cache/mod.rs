//! Local verification cache: store format, persistence backends and the
//! encrypted cache itself.

pub mod file;
pub mod format;
pub mod verification;

pub use file::{FileStore, KeyValueStore, MemoryStore};
pub use format::{VerificationRecord, VerificationStore};
pub use verification::VerificationCache;
