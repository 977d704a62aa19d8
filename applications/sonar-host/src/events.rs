//! Messages exchanged with the screen reader
//!
//! The host sends one JSON object per line; `event` names the variant. Role and
//! state names outside Sonar's vocabulary are skipped rather than rejected, so
//! a newer host never breaks the bridge.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sonar_audio::PlayOutcome;
use sonar_core::types::parse_heading_level;
use sonar_core::{ControlDescriptor, Role, ScreenRect, State};
use sonar_speech::SpeechProperties;
use tracing::debug;

/// Browse-mode control field transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldTransition {
    /// The caret entered the field
    #[serde(rename = "start_addedToControlFieldStack", alias = "added")]
    Added,
    /// The field was already around the caret
    #[serde(rename = "start_inControlFieldStack", alias = "in_stack")]
    InStack,
    #[serde(rename = "start_relative", alias = "relative")]
    Relative,
    /// The caret left the field
    #[serde(rename = "end_removedFromControlFieldStack", alias = "removed")]
    Removed,
}

/// A control as the host describes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlInfo {
    pub role: String,

    #[serde(default)]
    pub states: Vec<String>,

    /// Heading level; hosts send either a number or a string
    #[serde(default)]
    pub level: Option<Value>,

    #[serde(default)]
    pub rect: Option<ScreenRect>,
}

impl ControlInfo {
    pub fn to_descriptor(&self) -> ControlDescriptor {
        let role = self.role.parse::<Role>().unwrap_or_else(|_| {
            debug!(role = %self.role, "Unknown role");
            Role::Unknown
        });

        let states = self.states.iter().filter_map(|name| {
            let state = name.parse::<State>().ok();
            if state.is_none() {
                debug!(state = %name, "Unknown state");
            }
            state
        });

        let mut descriptor = ControlDescriptor::new(role).with_states(states);
        if let Some(level) = self.heading_level() {
            descriptor = descriptor.with_heading_level(level);
        }
        if let Some(rect) = self.rect {
            descriptor = descriptor.with_rect(rect);
        }
        descriptor
    }

    fn heading_level(&self) -> Option<u8> {
        match self.level.as_ref()? {
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .filter(|n| *n > 0),
            Value::String(s) => parse_heading_level(s),
            _ => None,
        }
    }
}

/// Inbound host event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// Desktop size changed
    Canvas { width: i32, height: i32 },

    /// The host is speaking an object's properties (focus or object navigation)
    Focus {
        control: ControlInfo,
        #[serde(default = "default_role_announced")]
        role_announced: bool,
    },

    /// Browse-mode caret moved across a control field
    ControlField {
        control: ControlInfo,
        field: FieldTransition,
    },

    /// Toggle cues on or off
    Toggle,

    /// Active voice volume changed (`null` when unknown)
    SpeechVolume { volume: Option<f32> },

    /// Properties about to be spoken, to be filtered
    Speech { properties: SpeechProperties },

    /// A checkable control gained focus, compose its announcement
    Label {
        name: String,
        control: ControlInfo,
        #[serde(default)]
        shortcut: Option<String>,
    },
}

fn default_role_announced() -> bool {
    true
}

/// Reply written back to the host for each event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EventOutcome {
    /// Sounds were requested from the engine
    Cue { play: PlayOutcome },
    /// The event did not call for a sound
    Silent,
    Enabled { enabled: bool },
    /// Host readings were updated
    Updated,
    Speech { properties: SpeechProperties },
    /// `None` means the host should announce the control itself. `rename`
    /// asks the host to also use `text` as the control name, so braille
    /// matches speech.
    Label { text: Option<String>, rename: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> HostEvent {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn focus_event_with_defaults() {
        let event = parse(r#"{"event": "focus", "control": {"role": "button"}}"#);
        let HostEvent::Focus { control, role_announced } = event else {
            panic!("wrong variant");
        };
        assert!(role_announced);
        assert_eq!(control.to_descriptor().role, Role::Button);
    }

    #[test]
    fn unknown_names_are_skipped() {
        let control = ControlInfo {
            role: "hologram".to_string(),
            states: vec!["checked".to_string(), "sparkly".to_string()],
            level: None,
            rect: None,
        };
        let descriptor = control.to_descriptor();
        assert_eq!(descriptor.role, Role::Unknown);
        assert_eq!(descriptor.states.len(), 1);
        assert!(descriptor.states.contains(&State::Checked));
    }

    #[test]
    fn heading_level_from_number_or_string() {
        let event = parse(
            r#"{"event": "control_field", "field": "start_addedToControlFieldStack",
                "control": {"role": "heading", "level": 3}}"#,
        );
        let HostEvent::ControlField { control, field } = event else {
            panic!("wrong variant");
        };
        assert_eq!(field, FieldTransition::Added);
        assert_eq!(control.to_descriptor().heading_level, Some(3));

        let control = ControlInfo {
            level: Some(Value::String("2".to_string())),
            ..control
        };
        assert_eq!(control.to_descriptor().heading_level, Some(2));

        let control = ControlInfo {
            level: Some(Value::from(0)),
            ..control
        };
        assert_eq!(control.to_descriptor().heading_level, None);
    }

    #[test]
    fn field_transition_aliases() {
        let field: FieldTransition = serde_json::from_str("\"removed\"").unwrap();
        assert_eq!(field, FieldTransition::Removed);
    }

    #[test]
    fn rect_is_parsed() {
        let event = parse(
            r#"{"event": "focus", "role_announced": false,
                "control": {"role": "link", "states": ["visited"],
                            "rect": {"x": 10, "y": 20, "width": 30, "height": 40}}}"#,
        );
        let HostEvent::Focus { control, role_announced } = event else {
            panic!("wrong variant");
        };
        assert!(!role_announced);
        assert_eq!(control.rect, Some(ScreenRect::new(10, 20, 30, 40)));
    }

    #[test]
    fn outcome_serializes_with_tags() {
        let json = serde_json::to_value(EventOutcome::Cue {
            play: PlayOutcome::Played { triggered: 2, skipped: 0 },
        })
        .unwrap();
        assert_eq!(json["outcome"], "cue");
        assert_eq!(json["play"]["result"], "played");
        assert_eq!(json["play"]["triggered"], 2);
    }
}
