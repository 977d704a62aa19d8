//! Sonar Host Library
//!
//! Reference bridge between a screen reader and Sonar's cue engine: layered
//! configuration, a file-backed settings store, the navigation cue rules, and
//! the JSON event protocol used by `sonar-host listen`.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod error;
pub mod events;
pub mod navigator;
pub mod providers;
pub mod settings;

// Re-export commonly used types for convenience
pub use config::{HostConfig, NavigationSettings};
pub use error::{HostError, Result};
pub use events::{ControlInfo, EventOutcome, FieldTransition, HostEvent};
pub use navigator::{Navigator, ENABLED_KEY};
pub use providers::{ConfiguredVolume, StaticGeometry};
pub use settings::JsonFileSettings;
