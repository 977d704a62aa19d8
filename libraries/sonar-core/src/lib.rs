//! Sonar Core
//!
//! Platform-agnostic core types, traits, and error handling for Sonar.
//!
//! This crate provides the foundational building blocks shared by the sound
//! catalog, the spatial audio engine, and the host bridge.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `ControlDescriptor`, `Role`, `State`, `ScreenRect`, `SoundClip`, etc.
//! - **Capability Traits**: `ClipDecoder`, `SpatialOutput`, `GeometryProvider`,
//!   `VolumeProvider`, `SettingsStore`
//! - **Error Handling**: Unified `SonarError` and `Result` types
//!
//! Everything the host application supplies (desktop geometry, the active voice
//! volume, the configuration store) reaches the components through the traits in
//! [`traits`]. Nothing in the workspace reads host state through globals.
//!
//! # Example
//!
//! ```rust
//! use sonar_core::{ControlDescriptor, Role, ScreenRect, State};
//!
//! let descriptor = ControlDescriptor::new(Role::CheckBox)
//!     .with_state(State::Checked)
//!     .with_rect(ScreenRect::new(10, 20, 120, 24));
//!
//! assert_eq!(descriptor.role, Role::CheckBox);
//! assert!(descriptor.states.contains(&State::Checked));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod settings;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SonarError};
pub use settings::MemorySettings;
pub use traits::{ClipDecoder, GeometryProvider, SettingsStore, SpatialOutput, VolumeProvider};

pub use types::{
    // Control vocabulary
    ControlDescriptor, Role, State,
    // Geometry
    CanvasSize, Position3D, ScreenRect,
    // Sounds
    Placement, SoundClip, SoundId,
};
