use chrono::{DateTime, Local};

use super::errors::DomainError;

/// A named persistent slot holding serialized text, in the manner of a
/// browser's local storage.
pub trait KeyValueStore: Send + Sync + 'static {
    /// `Ok(None)` when the slot has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
    /// Replaces the whole contents of the slot.
    fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
}

pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Local>;
}
