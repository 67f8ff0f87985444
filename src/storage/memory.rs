//! In-memory storage for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{StorageAdapter, StorageError};

/// HashMap-backed slots. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load a slot, e.g. to simulate a previous session in tests.
    pub fn with_slot(self, key: &str, payload: &str) -> Self {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(key.to_string(), payload.to_string());
        }
        self
    }
}

impl StorageAdapter for MemoryStorage {
    fn read_slot(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .slots
            .lock()
            .ok()
            .and_then(|slots| slots.get(key).cloned()))
    }

    fn write_slot(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(key.to_string(), payload.to_string());
        }
        Ok(())
    }
}
