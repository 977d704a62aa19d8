//! Sonar Audio
//!
//! The spatial audio engine behind Sonar's navigation cues.
//!
//! # Components
//!
//! - [`AudioStage`]: maps a control's screen rectangle to a point in front of
//!   the listener
//! - [`SoundPool`]: decoded clips, preloaded for built-ins and lazily loaded for
//!   custom sounds
//! - [`Debouncer`]: collapses identical requests from overlapping event sources
//! - [`SpatialAudioEngine`]: ties the above together with volume blending
//!
//! Rendering is delegated to a [`sonar_core::SpatialOutput`]; the desktop
//! implementation lives in `sonar-audio-desktop`.
//!
//! # Example
//!
//! ```rust
//! use sonar_audio::AudioStage;
//! use sonar_core::{CanvasSize, ScreenRect};
//!
//! let stage = AudioStage::default();
//! let position = stage.position_for(
//!     Some(&ScreenRect::new(0, 0, 100, 100)),
//!     CanvasSize::new(200, 200),
//! );
//!
//! assert_eq!((position.x, position.y, position.z), (-12.5, 12.5, -5.0));
//! ```

pub mod config;
pub mod debounce;
pub mod decoder;
pub mod engine;
pub mod error;
pub mod pool;
pub mod stage;
pub mod volume;

pub use config::SpatialConfig;
pub use debounce::{DebounceKey, Debouncer};
pub use decoder::SymphoniaClipDecoder;
pub use engine::{EngineServices, PlayOutcome, SpatialAudioEngine};
pub use error::{AudioError, Result};
pub use pool::SoundPool;
pub use stage::AudioStage;
pub use volume::{effective_volume, TimedCache, DEFAULT_SPEECH_VOLUME};
