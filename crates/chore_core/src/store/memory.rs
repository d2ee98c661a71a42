//! In-memory storage backend.

use super::{StorageBackend, StoreError, StoreResult};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Process-local key/value map.
///
/// Screens can share one instance by reference to model several views over
/// the same storage namespace.
#[derive(Debug)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    writable: Cell<bool>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            writable: Cell::new(true),
        }
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles write availability, e.g. to emulate an exhausted quota.
    pub fn set_writable(&self, writable: bool) {
        self.writable.set(writable);
    }

    /// Stores a raw value, bypassing the writable flag.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        if !self.writable.get() {
            return Err(StoreError::Unavailable("memory storage is read-only".to_string()));
        }
        self.insert_raw(key, value);
        Ok(())
    }
}
