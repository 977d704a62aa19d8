//! Collapsing of duplicate cue requests
//!
//! One navigation step can reach the engine through several host callbacks
//! (focus plus speech generation) within a few milliseconds. Requests for the
//! same sounds at the same place inside the window are dropped.

use sonar_core::{Position3D, SoundId};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Identity of a cue request: its sounds and its position at 0.1 unit precision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceKey {
    sounds: Vec<SoundId>,
    position: (i32, i32, i32),
}

impl DebounceKey {
    pub fn new(sounds: &[SoundId], position: Position3D) -> Self {
        Self {
            sounds: sounds.to_vec(),
            position: (
                quantize(position.x),
                quantize(position.y),
                quantize(position.z),
            ),
        }
    }
}

fn quantize(value: f32) -> i32 {
    (value * 10.0).round() as i32
}

/// Admission control for cue requests
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last: Mutex<Option<(DebounceKey, Instant)>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last: Mutex::new(None),
        }
    }

    /// Decide whether a request made at `now` should play
    ///
    /// Only an accepted request is remembered, so a suppressed duplicate does
    /// not extend the window.
    pub fn admit(&self, key: DebounceKey, now: Instant) -> bool {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some((last_key, last_at)) = last.as_ref() {
            if *last_key == key && now.saturating_duration_since(*last_at) < self.window {
                return false;
            }
        }

        *last = Some((key, now));
        true
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
