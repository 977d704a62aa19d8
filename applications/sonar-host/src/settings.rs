//! File-backed settings store
//!
//! Settings are a flat JSON object of string values. Values are kept in memory
//! and the file is read again only when its modification time changes, so
//! lookups on the navigation path cost one `stat`. The whole file is rewritten
//! on every `set`, through a temporary file so a crash never leaves it
//! half-written.

use sonar_core::{SettingsStore, SonarError};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::SystemTime;
use tracing::{debug, warn};

type Values = BTreeMap<String, String>;

/// Last loaded contents and the file version they came from
struct Snapshot {
    // `None` when the file did not exist
    modified: Option<SystemTime>,
    values: Values,
}

pub struct JsonFileSettings {
    path: PathBuf,
    // Also serializes read-modify-write cycles from this process
    snapshot: Mutex<Option<Snapshot>>,
    reads: AtomicUsize,
}

impl JsonFileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot: Mutex::new(None),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of times the file has been read and parsed
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    fn modified(&self) -> sonar_core::Result<Option<SystemTime>> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(Some(meta.modified()?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SonarError::Io(e)),
        }
    }

    /// Bring `snapshot` up to date with the file
    fn refresh<'a>(&self, snapshot: &'a mut Option<Snapshot>) -> sonar_core::Result<&'a mut Values> {
        let modified = self.modified()?;
        let stale = !matches!(snapshot.as_ref(), Some(current) if current.modified == modified);

        if stale {
            let values = match modified {
                Some(_) => self.read_all()?,
                None => Values::new(),
            };
            *snapshot = Some(Snapshot { modified, values });
        }

        Ok(&mut snapshot.get_or_insert_with(|| Snapshot {
            modified,
            values: Values::new(),
        }).values)
    }

    fn read_all(&self) -> sonar_core::Result<Values> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        debug!(path = %self.path.display(), "Reading settings file");

        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Values::new()),
            Err(e) => return Err(SonarError::Io(e)),
        };

        if text.trim().is_empty() {
            return Ok(Values::new());
        }

        match serde_json::from_str(&text) {
            Ok(values) => Ok(values),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Settings file is corrupt, starting empty");
                Ok(Values::new())
            }
        }
    }

    fn write_all(&self, values: &Values) -> sonar_core::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(values)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SettingsStore for JsonFileSettings {
    fn get(&self, key: &str) -> sonar_core::Result<Option<String>> {
        let mut snapshot = self
            .snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(self.refresh(&mut snapshot)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> sonar_core::Result<()> {
        let mut snapshot = self
            .snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut values = self.refresh(&mut snapshot)?.clone();
        values.insert(key.to_string(), value);
        self.write_all(&values)?;

        *snapshot = Some(Snapshot {
            modified: self.modified()?,
            values,
        });
        Ok(())
    }
}

impl std::fmt::Debug for JsonFileSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileSettings")
            .field("path", &self.path)
            .field("reads", &self.read_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let settings = JsonFileSettings::new(dir.path().join("settings.json"));
        assert_eq!(settings.get("customSounds").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let settings = JsonFileSettings::new(dir.path().join("nested").join("settings.json"));

        settings.set("customSounds", "{}".to_string()).unwrap();
        settings.set("other", "1".to_string()).unwrap();

        assert_eq!(settings.get("customSounds").unwrap().as_deref(), Some("{}"));
        assert_eq!(settings.get("other").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        JsonFileSettings::new(&path)
            .set("customSounds", r#"{"button":"/x.wav"}"#.to_string())
            .unwrap();

        let reopened = JsonFileSettings::new(&path);
        assert_eq!(
            reopened.get("customSounds").unwrap().as_deref(),
            Some(r#"{"button":"/x.wav"}"#)
        );
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let settings = JsonFileSettings::new(&path);
        assert_eq!(settings.get("customSounds").unwrap(), None);

        settings.set("customSounds", "{}".to_string()).unwrap();
        assert_eq!(settings.get("customSounds").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn repeated_gets_read_the_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"customSounds": "{}"}"#).unwrap();

        let settings = JsonFileSettings::new(&path);
        for _ in 0..100 {
            assert_eq!(settings.get("customSounds").unwrap().as_deref(), Some("{}"));
        }
        assert_eq!(settings.read_count(), 1);

        // Own writes refresh the snapshot without another read
        settings.set("enabled", "false".to_string()).unwrap();
        assert_eq!(settings.get("enabled").unwrap().as_deref(), Some("false"));
        assert_eq!(settings.read_count(), 1);
    }

    #[test]
    fn external_edit_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"customSounds": "{}"}"#).unwrap();

        let settings = JsonFileSettings::new(&path);
        assert_eq!(settings.get("customSounds").unwrap().as_deref(), Some("{}"));

        fs::write(&path, r#"{"customSounds": "{\"link\":\"/a.wav\"}"}"#).unwrap();
        let later = SystemTime::now() + std::time::Duration::from_secs(10);
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(later)
            .unwrap();

        assert_eq!(
            settings.get("customSounds").unwrap().as_deref(),
            Some(r#"{"link":"/a.wav"}"#)
        );
        assert_eq!(settings.read_count(), 2);
    }
}
