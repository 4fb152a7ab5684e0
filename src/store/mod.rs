//! Client-side persistence.
//!
//! Everything the client keeps between runs goes through [`KeyValueStore`],
//! a get/set capability over opaque blobs. [`EntryCache`] layers the RSVP
//! list, the undo slot and the admin flag on top of it under fixed keys.

mod cache;
mod file;
mod memory;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use cache::{EntryCache, ADMIN_MODE_KEY, ENTRIES_KEY, UNDO_KEY};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Opaque blob storage keyed by name.
pub trait KeyValueStore {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replaces whatever is stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Errors that can occur while reading or writing the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
