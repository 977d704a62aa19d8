//! User sound overrides persisted as one JSON object in the host settings

use crate::error::Result;
use sonar_core::SettingsStore;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

/// Settings key holding the serialized `{controlKey: soundPath}` object
pub const OVERRIDES_KEY: &str = "customSounds";

type OverrideMap = BTreeMap<String, String>;

/// Parsed overrides together with the raw string they came from
struct Parsed {
    raw: Option<String>,
    map: Arc<OverrideMap>,
}

/// Override store with a parse cache keyed on the raw settings value
///
/// Lookups happen on every navigation event, so the JSON is parsed only when the
/// stored string actually changed. Writes always replace the whole object.
pub struct OverrideStore {
    settings: Arc<dyn SettingsStore>,
    cache: Mutex<Option<Parsed>>,
    // Held across read-modify-write so concurrent edits are not lost
    edit: Mutex<()>,
    parses: AtomicUsize,
}

impl OverrideStore {
    /// Create a store over the host settings
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            settings,
            cache: Mutex::new(None),
            edit: Mutex::new(()),
            parses: AtomicUsize::new(0),
        }
    }

    /// Current overrides
    ///
    /// Unreadable settings and malformed JSON both yield an empty map; the
    /// malformed string is cached so it is not re-parsed on every call.
    pub fn current(&self) -> Arc<OverrideMap> {
        let raw = match self.settings.get(OVERRIDES_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read sound overrides: {}", e);
                return Arc::default();
            }
        };

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(parsed) = cache.as_ref() {
            if parsed.raw == raw {
                return Arc::clone(&parsed.map);
            }
        }

        let map = Arc::new(self.parse(raw.as_deref()));
        *cache = Some(Parsed {
            raw,
            map: Arc::clone(&map),
        });
        map
    }

    /// Override for one control key
    pub fn get(&self, control_key: &str) -> Option<String> {
        self.current().get(control_key).cloned()
    }

    /// Apply `edit` to the current overrides and persist the result
    ///
    /// `edit` returns whether it changed anything; nothing is written when it
    /// did not. Returns that flag.
    pub fn update(&self, edit: impl FnOnce(&mut OverrideMap) -> bool) -> Result<bool> {
        let _guard = self.edit.lock().unwrap_or_else(PoisonError::into_inner);

        let mut map = (*self.current()).clone();
        if !edit(&mut map) {
            return Ok(false);
        }
        self.write(map)?;
        Ok(true)
    }

    /// Persist `map` wholesale and refresh the cache
    fn write(&self, map: OverrideMap) -> Result<()> {
        let raw = serde_json::to_string(&map)?;
        self.settings.set(OVERRIDES_KEY, raw.clone())?;

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        *cache = Some(Parsed {
            raw: Some(raw),
            map: Arc::new(map),
        });
        Ok(())
    }

    /// Number of times the stored JSON has been parsed
    pub fn parse_count(&self) -> usize {
        self.parses.load(Ordering::Relaxed)
    }

    fn parse(&self, raw: Option<&str>) -> OverrideMap {
        let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
            return OverrideMap::new();
        };

        self.parses.fetch_add(1, Ordering::Relaxed);
        match serde_json::from_str::<OverrideMap>(raw) {
            Ok(map) => map,
            Err(e) => {
                warn!("Ignoring malformed sound overrides: {}", e);
                OverrideMap::new()
            }
        }
    }
}
