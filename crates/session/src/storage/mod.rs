//! Persistent key-value storage abstraction.
//!
//! The session only ever needs one string entry, but the store is modelled
//! as a general string map so the same backend can hold the rest of the
//! client's small persisted state.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::{InMemoryStore, UnavailableStore};

/// Storage error.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Storage is disabled or cannot be reached at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    /// The backing data exists but cannot be decoded.
    #[error("storage corrupt: {0}")]
    Corrupt(String),
}

/// String-keyed durable store (think browser `localStorage`).
///
/// Implementations must be cheap and non-blocking from the caller's point of
/// view; the session calls them inline.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` means the key has never been written (or was removed).
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
