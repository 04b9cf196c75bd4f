use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::errors::DomainError;
use crate::domain::ports::KeyValueStore;

/// Slots kept in a shared map. Clones see the same slots; nothing survives the
/// process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let slots = self
            .slots
            .read()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut slots = self
            .slots
            .write()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_slot_reads_as_none() {
        assert_eq!(MemoryStorage::new().get("laundryOrders").unwrap(), None);
    }

    #[test]
    fn set_replaces_and_clones_share_slots() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        storage.set("k", "[1]").unwrap();
        storage.set("k", "[2]").unwrap();
        assert_eq!(handle.get("k").unwrap().as_deref(), Some("[2]"));
    }
}
