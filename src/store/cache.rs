use serde::de::DeserializeOwned;

use super::{KeyValueStore, StoreError};
use crate::models::Entry;

/// Key holding the serialized entry list, newest first.
pub const ENTRIES_KEY: &str = "wedding_rsvp_entries_v1";
/// Key holding the admin mode flag as `"1"` or `"0"`.
pub const ADMIN_MODE_KEY: &str = "wedding_rsvp_admin_mode";
/// Key holding the most recently deleted entry, or `null`.
pub const UNDO_KEY: &str = "wedding_rsvp_undo_v1";

/// Typed view of the client store.
///
/// Reads never fail: missing or unreadable data is treated as empty.
/// Writes replace the whole value.
#[derive(Clone, Debug)]
pub struct EntryCache<S> {
    store: S,
}

impl<S: KeyValueStore> EntryCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load(&self) -> Vec<Entry> {
        self.read_json(ENTRIES_KEY).unwrap_or_default()
    }

    pub fn save(&self, entries: &[Entry]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(entries).map_err(|source| StoreError::Encode {
            key: ENTRIES_KEY,
            source,
        })?;
        self.store.set(ENTRIES_KEY, &bytes)
    }

    pub fn load_undo(&self) -> Option<Entry> {
        self.read_json::<Option<Entry>>(UNDO_KEY).flatten()
    }

    pub fn save_undo(&self, entry: Option<&Entry>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(&entry).map_err(|source| StoreError::Encode {
            key: UNDO_KEY,
            source,
        })?;
        self.store.set(UNDO_KEY, &bytes)
    }

    pub fn admin_mode(&self) -> bool {
        matches!(self.store.get(ADMIN_MODE_KEY), Ok(Some(v)) if v == b"1")
    }

    pub fn set_admin_mode(&self, enabled: bool) -> Result<(), StoreError> {
        let value: &[u8] = if enabled { b"1" } else { b"0" };
        self.store.set(ADMIN_MODE_KEY, value)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.store.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read {}, treating as empty: {}", key, e);
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Discarding corrupt data under {}: {}", key, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attendance, MealPref, Side};
    use crate::store::{FileStore, MemoryStore};
    use tempfile::TempDir;

    fn entry(name: &str) -> Entry {
        Entry::new(name, Side::Groom, Attendance::Yes).with_party(1, MealPref::Meat, 1, 0)
    }

    #[test]
    fn test_load_empty_store() {
        let cache = EntryCache::new(MemoryStore::new());
        assert!(cache.load().is_empty());
        assert!(cache.load_undo().is_none());
        assert!(!cache.admin_mode());
    }

    #[test]
    fn test_save_and_load_keeps_order() {
        let cache = EntryCache::new(MemoryStore::new());
        let entries = vec![entry("newest"), entry("older")];

        cache.save(&entries).unwrap();

        assert_eq!(cache.load(), entries);
    }

    #[test]
    fn test_corrupt_entries_load_as_empty() {
        let store = MemoryStore::new();
        store.set(ENTRIES_KEY, b"{not json").unwrap();

        let cache = EntryCache::new(store);
        assert!(cache.load().is_empty());
    }

    #[test]
    fn test_wrong_shape_loads_as_empty() {
        let store = MemoryStore::new();
        store.set(ENTRIES_KEY, br#"{"name": "Tom"}"#).unwrap();

        assert!(EntryCache::new(store).load().is_empty());
    }

    #[test]
    fn test_undo_slot_roundtrip() {
        let cache = EntryCache::new(MemoryStore::new());
        let deleted = entry("gone");

        cache.save_undo(Some(&deleted)).unwrap();
        assert_eq!(cache.load_undo(), Some(deleted));

        cache.save_undo(None).unwrap();
        assert!(cache.load_undo().is_none());
    }

    #[test]
    fn test_admin_mode_flag() {
        let store = MemoryStore::new();
        let cache = EntryCache::new(store.clone());

        cache.set_admin_mode(true).unwrap();
        assert!(cache.admin_mode());
        assert_eq!(store.get(ADMIN_MODE_KEY).unwrap(), Some(b"1".to_vec()));

        cache.set_admin_mode(false).unwrap();
        assert!(!cache.admin_mode());
    }

    #[test]
    fn test_file_backed_survives_reload() {
        let temp_dir = TempDir::new().unwrap();
        let entries = vec![entry("Tom")];

        EntryCache::new(FileStore::new(temp_dir.path()))
            .save(&entries)
            .unwrap();

        let reloaded = EntryCache::new(FileStore::new(temp_dir.path()));
        assert_eq!(reloaded.load(), entries);
    }
}
