//! In-memory settings store

use crate::error::Result;
use crate::traits::SettingsStore;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// `SettingsStore` backed by a map, for tests and embedders without persistence
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySettings {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one value
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
        store
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let store = MemorySettings::new();
        assert_eq!(store.get("customSounds").unwrap(), None);

        store.set("customSounds", "{}".to_string()).unwrap();
        assert_eq!(store.get("customSounds").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn prepopulated_value() {
        let store = MemorySettings::with_value("a", "1");
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }
}
