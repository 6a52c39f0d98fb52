//! Durable key-value storage for the selection.
//!
//! Values are JSON text under fixed keys (see [`crate::constants::PERSISTED_KEYS`]).
//! Backends never fail loudly: a value that is missing or cannot be decoded
//! reads as "nothing saved", and write failures are logged.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

/// Synchronous text key-value store.
pub trait KeyValueStore {
    /// Reads a value; `None` when the key is absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;
    /// Writes a value.
    fn set(&mut self, key: &str, value: String);
    /// Deletes a key. Deleting an absent key is a no-op.
    fn remove(&mut self, key: &str);
}

/// Reads and decodes a JSON value. Malformed data is logged and treated as absent.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("discarding malformed saved value for {key}: {err}");
            None
        }
    }
}

/// Encodes and writes a JSON value.
pub fn save_json<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => store.set(key, json),
        Err(err) => log::error!("failed to serialize {key}: {err}"),
    }
}

/// Logs a failed backend write or removal. Returns whether `result` succeeded.
fn report<E: std::fmt::Debug>(result: Result<(), E>, action: &str, target: &str) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            log::warn!("storage {action} of {target} failed: {err:?}");
            false
        }
    }
}

/// In-memory store, used by tests and as a fallback when no durable backend is available.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` currently holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Shares one store between the application and an observer (tests, debug views).
impl<S: KeyValueStore> KeyValueStore for std::rc::Rc<std::cell::RefCell<S>> {
    fn get(&self, key: &str) -> Option<String> {
        self.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: String) {
        self.borrow_mut().set(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.borrow_mut().remove(key);
    }
}

/// Native store: a single JSON object file, written through on every change.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileStorage {
    path: std::path::PathBuf,
    entries: BTreeMap<String, String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStorage {
    /// File name used inside the application storage directory.
    pub const FILE_NAME: &'static str = "selection.json";

    /// Opens (or lazily creates) the store at `path`. An unreadable or
    /// malformed file starts out empty.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                log::warn!("ignoring malformed storage file {}: {err}", path.display());
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    /// Opens the store in the per-user eframe storage directory of `app_id`.
    pub fn in_app_dir(app_id: &str) -> Option<Self> {
        let dir = eframe::storage_dir(app_id)?;
        if let Err(err) = std::fs::create_dir_all(&dir) {
            log::warn!("cannot create storage dir {}: {err}", dir.display());
            return None;
        }
        Some(Self::open(dir.join(Self::FILE_NAME)))
    }

    fn flush(&self) {
        let json = match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => json,
            Err(err) => {
                log::error!("failed to serialize storage: {err}");
                return;
            }
        };
        report(std::fs::write(&self.path, json), "write", &self.path.display().to_string());
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.flush();
        }
    }
}

/// Browser `localStorage`.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// Opens the window's local storage, if the browser allows it.
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: String) {
        report(self.storage.set_item(key, &value), "write", key);
    }

    fn remove(&mut self, key: &str) {
        report(self.storage.remove_item(key), "removal", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Offset;

    #[test]
    fn json_round_trip_through_memory_storage() {
        let mut store = MemoryStorage::new();
        save_json(&mut store, "offset", &Offset::new(3.5, -2.0));
        assert_eq!(load_json::<Offset>(&store, "offset"), Some(Offset::new(3.5, -2.0)));
    }

    #[test]
    fn missing_and_malformed_values_read_as_absent() {
        let mut store = MemoryStorage::new();
        assert_eq!(load_json::<Offset>(&store, "offset"), None);
        store.set("offset", "{\"x\": oops".into());
        assert_eq!(load_json::<Offset>(&store, "offset"), None);
    }

    #[test]
    fn file_storage_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        {
            let mut store = FileStorage::open(&path);
            store.set("a", "1".into());
            store.set("b", "2".into());
            store.remove("a");
        }
        let store = FileStorage::open(&path);
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some("2".into()));
    }

    #[test]
    fn failed_writes_and_removals_are_reported() {
        assert!(report(Ok::<(), String>(()), "removal", "cartItems"));
        assert!(!report(Err("QuotaExceededError"), "removal", "cartItems"));
    }

    #[test]
    fn unwritable_file_keeps_working_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be written as a file
        let mut store = FileStorage::open(dir.path());
        store.set("a", "1".into());
        assert_eq!(store.get("a"), Some("1".into()));
        store.remove("a");
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn malformed_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let store = FileStorage::open(&path);
        assert_eq!(store.get("anything"), None);
    }
}
