/// Sound identifiers and decoded clips
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Identifier of a sound: a bundled file name (`"button.wav"`) or an
/// absolute path to a user-supplied file
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoundId(String);

impl SoundId {
    /// Create a new sound identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for user-supplied sounds, which are referenced by absolute path
    pub fn is_custom(&self) -> bool {
        Path::new(&self.0).is_absolute()
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SoundId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SoundId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for SoundId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Decoded single-channel clip ready to be positioned
///
/// Samples are f32 in the range [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq)]
pub struct SoundClip {
    /// Mono samples
    pub samples: Vec<f32>,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// File the clip was decoded from
    pub source: PathBuf,
}

impl SoundClip {
    /// Create a new clip
    pub fn new(samples: Vec<f32>, sample_rate: u32, source: impl Into<PathBuf>) -> Self {
        Self {
            samples,
            sample_rate,
            source: source.into(),
        }
    }

    /// Number of frames (equal to samples for mono)
    pub fn frames(&self) -> usize {
        self.samples.len()
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / f64::from(self.sample_rate)
    }

    /// Check if the clip is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Where and how loud a single cue is played
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Position in audio space
    pub position: super::Position3D,

    /// Linear gain in [0.0, 1.0]
    pub volume: f32,
}
