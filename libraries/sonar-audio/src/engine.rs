//! Spatial audio engine
//!
//! Turns a list of sound identifiers plus screen geometry into positioned,
//! volume-scaled playback triggers. Every entry point is infallible: the
//! engine runs on the host's event path, so failures are logged and skipped.

use crate::config::SpatialConfig;
use crate::debounce::{DebounceKey, Debouncer};
use crate::decoder::SymphoniaClipDecoder;
use crate::pool::SoundPool;
use crate::stage::AudioStage;
use crate::volume::{effective_volume, TimedCache, DEFAULT_SPEECH_VOLUME};
use serde::Serialize;
use sonar_core::{
    CanvasSize, ClipDecoder, GeometryProvider, Placement, Position3D, ScreenRect, SoundId,
    SpatialOutput, VolumeProvider,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Host capabilities the engine depends on
#[derive(Clone)]
pub struct EngineServices {
    pub decoder: Arc<dyn ClipDecoder>,
    pub output: Arc<dyn SpatialOutput>,
    pub geometry: Arc<dyn GeometryProvider>,
    pub volume: Arc<dyn VolumeProvider>,
}

impl EngineServices {
    /// Services using the Symphonia decoder
    pub fn new(
        output: Arc<dyn SpatialOutput>,
        geometry: Arc<dyn GeometryProvider>,
        volume: Arc<dyn VolumeProvider>,
    ) -> Self {
        Self {
            decoder: Arc::new(SymphoniaClipDecoder::new()),
            output,
            geometry,
            volume,
        }
    }

    #[must_use]
    pub fn with_decoder(mut self, decoder: Arc<dyn ClipDecoder>) -> Self {
        self.decoder = decoder;
        self
    }
}

/// What a `play` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum PlayOutcome {
    /// No identifiers were given
    Empty,
    /// Identical to the previous accepted request and inside the debounce window
    Suppressed,
    /// Accepted; `skipped` identifiers could not be loaded or triggered
    Played { triggered: usize, skipped: usize },
}

/// Debounced, positioned cue playback
pub struct SpatialAudioEngine {
    stage: AudioStage,
    user_volume: AtomicU8,
    pool: SoundPool,
    debouncer: Debouncer,
    speech_volume: TimedCache<f32>,
    canvas: TimedCache<Option<CanvasSize>>,
    output: Arc<dyn SpatialOutput>,
    geometry: Arc<dyn GeometryProvider>,
    volume: Arc<dyn VolumeProvider>,
}

impl SpatialAudioEngine {
    /// Create an engine and decode the built-in sounds
    ///
    /// Built-ins that fail to load are marked unavailable and skipped at play time.
    pub fn new(
        config: &SpatialConfig,
        sounds_dir: impl Into<PathBuf>,
        builtins: &[SoundId],
        services: EngineServices,
    ) -> Self {
        let pool = SoundPool::new(sounds_dir, services.decoder, Arc::clone(&services.output));
        let loaded = pool.preload(builtins);
        debug!(
            loaded,
            requested = builtins.len(),
            "Spatial audio engine ready"
        );

        Self {
            stage: AudioStage::new(config.half_width, config.depth),
            user_volume: AtomicU8::new(config.user_volume.min(100)),
            pool,
            debouncer: Debouncer::new(config.debounce_window()),
            speech_volume: TimedCache::new(config.volume_refresh()),
            canvas: TimedCache::new(config.geometry_refresh()),
            output: services.output,
            geometry: services.geometry,
            volume: services.volume,
        }
    }

    pub fn stage(&self) -> AudioStage {
        self.stage
    }

    pub fn pool(&self) -> &SoundPool {
        &self.pool
    }

    /// Audio-space position of `rect` on `canvas`
    pub fn position_for(&self, rect: Option<&ScreenRect>, canvas: CanvasSize) -> Position3D {
        self.stage.position_for(rect, canvas)
    }

    /// Play `ids` in order at the position of `rect` on `canvas`
    pub fn play(&self, rect: Option<&ScreenRect>, canvas: CanvasSize, ids: &[SoundId]) -> PlayOutcome {
        self.play_at(rect, canvas, ids, Instant::now())
    }

    /// [`play`](Self::play) with an explicit timestamp
    pub fn play_at(
        &self,
        rect: Option<&ScreenRect>,
        canvas: CanvasSize,
        ids: &[SoundId],
        now: Instant,
    ) -> PlayOutcome {
        if ids.is_empty() {
            return PlayOutcome::Empty;
        }

        let position = self.stage.position_for(rect, canvas);

        if !self.debouncer.admit(DebounceKey::new(ids, position), now) {
            debug!(sounds = ids.len(), "Suppressed duplicate cue");
            return PlayOutcome::Suppressed;
        }

        let placement = Placement {
            position,
            volume: self.effective_volume_at(now),
        };

        let mut triggered = 0;
        let mut skipped = 0;
        for id in ids {
            let Some(clip) = self.pool.get(id) else {
                debug!(sound = %id, "Skipping unavailable sound");
                skipped += 1;
                continue;
            };

            match self.output.play(&clip, placement) {
                Ok(()) => triggered += 1,
                Err(e) => {
                    debug!(sound = %id, error = %e, "Playback trigger failed");
                    skipped += 1;
                }
            }
        }

        PlayOutcome::Played { triggered, skipped }
    }

    /// Play `ids` relative to the host desktop
    ///
    /// Uses the cached desktop size. If the host cannot report one the cues
    /// play at the stage origin.
    pub fn play_on_desktop(&self, rect: Option<&ScreenRect>, ids: &[SoundId]) -> PlayOutcome {
        self.play_on_desktop_at(rect, ids, Instant::now())
    }

    pub fn play_on_desktop_at(
        &self,
        rect: Option<&ScreenRect>,
        ids: &[SoundId],
        now: Instant,
    ) -> PlayOutcome {
        let canvas = self.canvas_size_at(now).unwrap_or_default();
        self.play_at(rect, canvas, ids, now)
    }

    /// Desktop size from the host, refreshed at most once per geometry interval
    pub fn canvas_size_at(&self, now: Instant) -> Option<CanvasSize> {
        self.canvas
            .get_or_refresh(now, || self.geometry.canvas_size())
    }

    /// Forget cached host readings, e.g. after a display or voice change
    pub fn invalidate_host_cache(&self) {
        self.canvas.invalidate();
        self.speech_volume.invalidate();
    }

    /// Set the cue volume relative to speech (0-100, higher values are clamped)
    pub fn set_user_volume(&self, volume: u8) {
        self.user_volume.store(volume.min(100), Ordering::Relaxed);
    }

    pub fn user_volume(&self) -> u8 {
        self.user_volume.load(Ordering::Relaxed)
    }

    /// Gain applied to cues at `now`
    pub fn effective_volume_at(&self, now: Instant) -> f32 {
        let speech = self.speech_volume.get_or_refresh(now, || {
            self.volume
                .speech_volume()
                .unwrap_or(DEFAULT_SPEECH_VOLUME)
        });
        effective_volume(speech, f32::from(self.user_volume()))
    }
}

impl std::fmt::Debug for SpatialAudioEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialAudioEngine")
            .field("stage", &self.stage)
            .field("user_volume", &self.user_volume())
            .field("debounce", &self.debouncer.window())
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}
