//! Decoded sound buffers, shared across event sources
//!
//! Built-in sounds are decoded up front. Custom sounds (absolute paths) are
//! decoded the first time they are requested. A sound that fails to load is
//! remembered as unavailable and never retried.

use sonar_core::{ClipDecoder, SoundClip, SoundId, SpatialOutput};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
enum Slot {
    Ready(Arc<SoundClip>),
    Unavailable,
}

/// Filled exactly once; lookups that race on a new key wait for the winner
type Cell = Arc<OnceLock<Slot>>;

/// Cache of prepared clips keyed by sound identifier
///
/// The map lock is only held to find or insert a key's cell. Decoding happens
/// outside it, so a slow custom sound never blocks lookups of other sounds.
pub struct SoundPool {
    sounds_dir: PathBuf,
    decoder: Arc<dyn ClipDecoder>,
    output: Arc<dyn SpatialOutput>,
    entries: RwLock<HashMap<SoundId, Cell>>,
}

impl SoundPool {
    pub fn new(
        sounds_dir: impl Into<PathBuf>,
        decoder: Arc<dyn ClipDecoder>,
        output: Arc<dyn SpatialOutput>,
    ) -> Self {
        Self {
            sounds_dir: sounds_dir.into(),
            decoder,
            output,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Decode every sound in `ids` now, returning how many loaded
    pub fn preload<'a>(&self, ids: impl IntoIterator<Item = &'a SoundId>) -> usize {
        let mut loaded = 0;
        for id in ids {
            let cell = self.cell(id);
            let mut decoded = false;
            let slot = cell.get_or_init(|| {
                decoded = true;
                self.load(id)
            });
            if decoded && matches!(slot, Slot::Ready(_)) {
                loaded += 1;
            }
        }

        debug!(loaded, total = self.len(), "Preloaded built-in sounds");
        loaded
    }

    /// Look up `id`, decoding it on first use
    ///
    /// Returns `None` if the sound could not be loaded, now or earlier.
    pub fn get(&self, id: &SoundId) -> Option<Arc<SoundClip>> {
        ready(self.cell(id).get_or_init(|| self.load(id)))
    }

    /// The cell for `id`, created empty if this is the first request
    fn cell(&self, id: &SoundId) -> Cell {
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cell) = entries.get(id) {
                return Arc::clone(cell);
            }
        }

        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        // Another event source may have inserted it while we waited for the lock
        Arc::clone(entries.entry(id.clone()).or_default())
    }

    /// File that `id` refers to
    pub fn resolve_path(&self, id: &SoundId) -> PathBuf {
        let path = Path::new(id.as_str());
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.sounds_dir.join(path)
        }
    }

    /// Number of identifiers seen so far, loaded or not
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `id` was tried and failed to load
    pub fn is_unavailable(&self, id: &SoundId) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        matches!(
            entries.get(id).and_then(|cell| cell.get()),
            Some(Slot::Unavailable)
        )
    }

    fn load(&self, id: &SoundId) -> Slot {
        let path = self.resolve_path(id);

        let prepared = self
            .decoder
            .decode(&path)
            .and_then(|clip| self.output.prepare(clip));

        match prepared {
            Ok(clip) => {
                debug!(sound = %id, frames = clip.frames(), "Loaded sound");
                Slot::Ready(Arc::new(clip))
            }
            Err(e) => {
                warn!(sound = %id, path = %path.display(), error = %e, "Sound unavailable");
                Slot::Unavailable
            }
        }
    }
}

fn ready(slot: &Slot) -> Option<Arc<SoundClip>> {
    match slot {
        Slot::Ready(clip) => Some(Arc::clone(clip)),
        Slot::Unavailable => None,
    }
}

impl std::fmt::Debug for SoundPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundPool")
            .field("sounds_dir", &self.sounds_dir)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
