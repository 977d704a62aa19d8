//! Engine configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the spatial audio engine
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpatialConfig {
    /// Half-width of the audio stage (X spans `-half_width..=half_width`)
    #[serde(default = "default_half_width")]
    pub half_width: f32,

    /// Distance in front of the listener at which every cue is placed
    #[serde(default = "default_depth")]
    pub depth: f32,

    /// Identical requests closer together than this are collapsed
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// How long a speech volume reading stays valid
    #[serde(default = "default_refresh_ms")]
    pub volume_refresh_ms: u64,

    /// How long a canvas size reading stays valid
    #[serde(default = "default_refresh_ms")]
    pub geometry_refresh_ms: u64,

    /// Cue gain relative to speech, 0-100
    #[serde(default = "default_user_volume")]
    pub user_volume: u8,
}

impl SpatialConfig {
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn volume_refresh(&self) -> Duration {
        Duration::from_millis(self.volume_refresh_ms)
    }

    pub fn geometry_refresh(&self) -> Duration {
        Duration::from_millis(self.geometry_refresh_ms)
    }

    /// Check ranges that serde cannot express
    pub fn validate(&self) -> Result<(), String> {
        if !(self.half_width.is_finite() && self.half_width > 0.0) {
            return Err(format!("half_width must be positive, got {}", self.half_width));
        }
        if !(self.depth.is_finite() && self.depth >= 0.0) {
            return Err(format!("depth must be non-negative, got {}", self.depth));
        }
        if self.user_volume > 100 {
            return Err(format!("user_volume must be 0-100, got {}", self.user_volume));
        }
        Ok(())
    }
}

// Default values
fn default_half_width() -> f32 {
    25.0
}

fn default_depth() -> f32 {
    5.0
}

fn default_debounce_ms() -> u64 {
    60
}

fn default_refresh_ms() -> u64 {
    500
}

fn default_user_volume() -> u8 {
    100
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self {
            half_width: default_half_width(),
            depth: default_depth(),
            debounce_ms: default_debounce_ms(),
            volume_refresh_ms: default_refresh_ms(),
            geometry_refresh_ms: default_refresh_ms(),
            user_volume: default_user_volume(),
        }
    }
}
