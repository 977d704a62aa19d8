//! Sonar Sound Catalog
//!
//! Maps a control descriptor (role, states, heading level) to the ordered list of
//! sounds that describe it, honoring user overrides layered on top of the
//! built-in defaults.
//!
//! This crate provides:
//! - Built-in role, state, and heading-level tables keyed by stable control keys
//! - An override store persisted as one JSON blob in the host's settings, with a
//!   parse cache keyed on the raw string
//! - WAV validation for user-supplied sounds (mono required, 44.1 kHz recommended)
//!
//! # Example
//!
//! ```rust
//! use sonar_catalog::SoundCatalog;
//! use sonar_core::{ControlDescriptor, MemorySettings, Role, State};
//! use std::sync::Arc;
//!
//! let catalog = SoundCatalog::new(Arc::new(MemorySettings::new()));
//!
//! let descriptor = ControlDescriptor::new(Role::CheckBox).with_state(State::Checked);
//! let sounds = catalog.resolve(&descriptor);
//!
//! assert_eq!(sounds[0].as_str(), "checkbox.wav");
//! assert_eq!(sounds[1].as_str(), "checked.wav");
//! ```

mod catalog;
mod error;
mod overrides;
mod tables;
mod validation;

pub use catalog::{OverrideAccepted, SoundCatalog};
pub use error::{CatalogError, Result};
pub use overrides::{OverrideStore, OVERRIDES_KEY};
pub use tables::{
    heading_level_entry, role_entry, state_entry, CatalogEntry, ControlKeyInfo, CONTROL_KEYS,
};
pub use validation::{validate_sound_file, SoundCheck, RECOMMENDED_SAMPLE_RATE};
