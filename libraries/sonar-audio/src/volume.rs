//! Cue loudness and short-lived host readings
//!
//! Cue gain follows the active voice so that turning speech down also turns
//! the cues down. Host queries can be slow, so readings are reused for a short
//! refresh interval.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Speech volume assumed when the host cannot report one
pub const DEFAULT_SPEECH_VOLUME: f32 = 100.0;

/// Combine speech volume and the user's cue volume (both 0-100) into a gain in `[0, 1]`
///
/// Non-finite inputs count as silence.
pub fn effective_volume(speech_volume: f32, user_volume: f32) -> f32 {
    let gain = (speech_volume / 100.0) * (user_volume / 100.0);
    if gain.is_finite() {
        gain.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// A value that is refreshed at most once per interval
#[derive(Debug)]
pub struct TimedCache<T> {
    ttl: Duration,
    slot: Mutex<Option<(T, Instant)>>,
}

impl<T: Clone> TimedCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached value, calling `refresh` if it is missing or stale
    pub fn get_or_refresh(&self, now: Instant, refresh: impl FnOnce() -> T) -> T {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some((value, fetched_at)) = slot.as_ref() {
            if now.saturating_duration_since(*fetched_at) < self.ttl {
                return value.clone();
            }
        }

        let value = refresh();
        *slot = Some((value.clone(), now));
        value
    }

    /// Drop the cached value so the next read refreshes
    pub fn invalidate(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn full_volumes_give_unity_gain() {
        assert_eq!(effective_volume(100.0, 100.0), 1.0);
    }

    #[test]
    fn volumes_multiply() {
        assert!((effective_volume(50.0, 50.0) - 0.25).abs() < 1e-6);
        assert!((effective_volume(80.0, 100.0) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn gain_is_clamped() {
        assert_eq!(effective_volume(150.0, 100.0), 1.0);
        assert_eq!(effective_volume(-20.0, 100.0), 0.0);
        assert_eq!(effective_volume(f32::NAN, 100.0), 0.0);
        assert_eq!(effective_volume(f32::INFINITY, 100.0), 0.0);
    }

    #[test]
    fn cache_reuses_value_within_ttl() {
        let cache = TimedCache::new(Duration::from_millis(500));
        let calls = Cell::new(0);
        let t0 = Instant::now();

        let fetch = || {
            calls.set(calls.get() + 1);
            calls.get()
        };

        assert_eq!(cache.get_or_refresh(t0, fetch), 1);
        assert_eq!(cache.get_or_refresh(t0 + Duration::from_millis(100), fetch), 1);
        assert_eq!(cache.get_or_refresh(t0 + Duration::from_millis(499), fetch), 1);
        assert_eq!(cache.get_or_refresh(t0 + Duration::from_millis(600), fetch), 2);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn invalidate_forces_refresh() {
        let cache = TimedCache::new(Duration::from_secs(60));
        let t0 = Instant::now();

        assert_eq!(cache.get_or_refresh(t0, || 1), 1);
        cache.invalidate();
        assert_eq!(cache.get_or_refresh(t0, || 2), 2);
    }
}
