//! Desktop spatial output using CPAL
//!
//! This crate provides [`CpalSpatialOutput`], the [`sonar_core::SpatialOutput`]
//! used on desktop systems. Every cue becomes a voice that is mixed on a
//! dedicated audio thread, so overlapping cues play together.
//!
//! # Features
//!
//! - Cross-platform audio output using CPAL
//! - Sample rate conversion when clips enter the sound pool
//! - Constant-power stereo panning from the cue's X position
//!
//! # Example
//!
//! ```no_run
//! use sonar_audio_desktop::CpalSpatialOutput;
//! use sonar_core::{Placement, Position3D, SoundClip, SpatialOutput};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let output = CpalSpatialOutput::new(25.0)?;
//!
//! let clip = SoundClip::new(vec![0.0; 4410], 44_100, "click.wav");
//! let clip = Arc::new(output.prepare(clip)?);
//!
//! output.play(
//!     &clip,
//!     Placement {
//!         position: Position3D::new(-12.5, 0.0, -5.0),
//!         volume: 0.8,
//!     },
//! )?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
pub mod mixer;
mod output;

pub use error::{OutputError, Result};
pub use mixer::{pan_gains, Mixer, Voice, MAX_VOICES};
pub use output::{resample_clip, CpalSpatialOutput};
