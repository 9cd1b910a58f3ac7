//! In-memory storage for session-only progress and tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;

use super::KvStorage;

/// Key-value storage that lives only as long as the process.
///
/// Used when the database cannot be opened, so progress still works for the
/// current session.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a single value, e.g. a previously exported progress record.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.values.borrow_mut().insert(key.into(), value.into());
        storage
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KvStorage for MemoryStorage {
    type Error = Infallible;

    fn read(&self, key: &str) -> Result<Option<String>, Infallible> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Infallible> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
