//! Sonar Speech
//!
//! Adjustments to what the screen reader says, for users who rely on Sonar's
//! cues.
//!
//! This crate provides:
//! - [`LabelSuppression`]: drop the spoken role and/or states when a sound
//!   already conveys them
//! - [`LabelComposer`]: announce check boxes, radio buttons and checkable menu
//!   items as "role state label" instead of "label role state"
//!
//! Neither touches audio; the host decides when to apply them.
//!
//! # Example
//!
//! ```rust
//! use sonar_core::{Role, State};
//! use sonar_speech::LabelComposer;
//! use std::collections::BTreeSet;
//!
//! let composer = LabelComposer::default();
//! let states: BTreeSet<State> = [State::Checked].into_iter().collect();
//!
//! let text = composer.compose("Word wrap", Role::CheckBox, &states, Some("Alt+W"));
//! assert_eq!(text.as_deref(), Some("check box checked Word wrap, Alt+W"));
//! ```

pub mod composer;
pub mod properties;

pub use composer::{LabelComposer, LabelFormat, LabelSettings, Labels};
pub use properties::{LabelSuppression, SpeechProperties};
