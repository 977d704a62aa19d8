//! Speech property filtering

use serde::{Deserialize, Deserializer, Serialize};
use sonar_core::{Role, State};
use std::collections::BTreeSet;
use tracing::debug;

/// The properties a host is about to speak for a control
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechProperties {
    #[serde(default)]
    pub name: Option<String>,

    /// Names outside the vocabulary read as [`Role::Unknown`]
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<Role>,

    /// Names outside the vocabulary are dropped
    #[serde(default, deserialize_with = "lenient_states")]
    pub states: BTreeSet<State>,

    /// Value, description and anything else the host renders after the label
    #[serde(default)]
    pub extra: Option<String>,
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.map(|name| {
        name.parse::<Role>().unwrap_or_else(|_| {
            debug!(role = %name, "Unknown role in speech properties");
            Role::Unknown
        })
    }))
}

fn lenient_states<'de, D>(deserializer: D) -> Result<BTreeSet<State>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    Ok(names
        .iter()
        .filter_map(|name| {
            let state = name.parse::<State>().ok();
            if state.is_none() {
                debug!(state = %name, "Unknown state in speech properties");
            }
            state
        })
        .collect())
}

/// Which properties to drop because a sound already conveys them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSuppression {
    pub suppress_role: bool,
    pub suppress_states: bool,
}

impl LabelSuppression {
    pub fn new(suppress_role: bool, suppress_states: bool) -> Self {
        Self {
            suppress_role,
            suppress_states,
        }
    }

    /// True if nothing would be removed
    pub fn is_noop(&self) -> bool {
        !self.suppress_role && !self.suppress_states
    }

    /// Remove the suppressed properties
    pub fn apply(&self, mut properties: SpeechProperties) -> SpeechProperties {
        if self.suppress_role {
            properties.role = None;
        }
        if self.suppress_states {
            properties.states.clear();
        }
        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link() -> SpeechProperties {
        SpeechProperties {
            name: Some("Home".to_string()),
            role: Some(Role::Link),
            states: [State::Visited].into_iter().collect(),
            extra: None,
        }
    }

    #[test]
    fn role_only() {
        let filtered = LabelSuppression::new(true, false).apply(link());
        assert_eq!(filtered.role, None);
        assert!(filtered.states.contains(&State::Visited));
        assert_eq!(filtered.name.as_deref(), Some("Home"));
    }

    #[test]
    fn role_and_states() {
        let filtered = LabelSuppression::new(true, true).apply(link());
        assert_eq!(filtered.role, None);
        assert!(filtered.states.is_empty());
    }

    #[test]
    fn noop_keeps_everything() {
        let suppression = LabelSuppression::default();
        assert!(suppression.is_noop());
        assert_eq!(suppression.apply(link()), link());
    }

    #[test]
    fn deserializes_partial_properties() {
        let props: SpeechProperties =
            serde_json::from_str(r#"{"role": "button", "name": "OK"}"#).unwrap();
        assert_eq!(props.role, Some(Role::Button));
        assert!(props.states.is_empty());
    }

    #[test]
    fn unknown_names_do_not_reject_properties() {
        let props: SpeechProperties = serde_json::from_str(
            r#"{"role": "hologram", "states": ["checked", "sparkly"], "name": "OK"}"#,
        )
        .unwrap();
        assert_eq!(props.role, Some(Role::Unknown));
        assert_eq!(props.states, [State::Checked].into_iter().collect());
        assert_eq!(props.name.as_deref(), Some("OK"));

        let props: SpeechProperties =
            serde_json::from_str(r#"{"role": null, "states": ["sparkly"]}"#).unwrap();
        assert_eq!(props.role, None);
        assert!(props.states.is_empty());
    }
}
