/// Capability traits supplied by the host environment
use crate::error::Result;
use crate::types::{CanvasSize, Placement, SoundClip};
use std::path::Path;
use std::sync::Arc;

/// Clip decoder trait
///
/// Implementers decode a sound file into a single-channel `SoundClip`.
pub trait ClipDecoder: Send + Sync {
    /// Decode the file at `path` (loads the entire file)
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or decoded
    fn decode(&self, path: &Path) -> Result<SoundClip>;

    /// Check if the decoder supports the given file format
    fn supports_format(&self, path: &Path) -> bool;
}

/// Positioned audio output
///
/// Implementers render one-shot clips at a point in audio space. Calls come from
/// the host's event path and must return promptly.
pub trait SpatialOutput: Send + Sync {
    /// Convert a freshly decoded clip into the form `play` expects
    ///
    /// Called once per clip when it enters the sound pool, so outputs can do
    /// expensive work (resampling to the device rate) off the hot path.
    fn prepare(&self, clip: SoundClip) -> Result<SoundClip> {
        Ok(clip)
    }

    /// Start playing `clip` at `placement`
    ///
    /// # Errors
    /// Returns an error if the playback trigger could not be issued
    fn play(&self, clip: &Arc<SoundClip>, placement: Placement) -> Result<()>;
}

/// Host query for the reference canvas (the desktop)
pub trait GeometryProvider: Send + Sync {
    /// Current canvas size, or `None` when the host cannot tell
    fn canvas_size(&self) -> Option<CanvasSize>;
}

/// Host query for the active voice output volume
pub trait VolumeProvider: Send + Sync {
    /// Speech volume in 0-100, or `None` when unavailable
    fn speech_volume(&self) -> Option<f32>;
}

/// Host configuration store holding serialized values by key
pub trait SettingsStore: Send + Sync {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: String) -> Result<()>;
}
