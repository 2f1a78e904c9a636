//! Process-local store.

use std::collections::HashMap;

use tracing::{debug, instrument};

use super::{KeyValueStore, StoreError};

/// In-memory store; contents live as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        debug!("Value stored");
        Ok(())
    }

    #[instrument(skip(self))]
    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        let existed = self.entries.remove(key).is_some();
        debug!(existed, "Key deleted");
        Ok(())
    }
}
