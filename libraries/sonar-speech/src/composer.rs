//! "Role state label" announcements for checkable controls
//!
//! Screen readers usually say the label first ("Bold, check box, checked").
//! Some users prefer hearing the control type and state before the label
//! ("check box checked Bold"). The composer rebuilds that text from the
//! host's name, role, states and keyboard shortcut.

use serde::{Deserialize, Serialize};
use sonar_core::{Role, SonarError, State};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Announcement order for a group of controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelFormat {
    /// Leave the announcement to the host
    #[serde(alias = "0")]
    Default,
    /// Role, then state, then label
    #[default]
    #[serde(alias = "rsc")]
    RoleStateLabel,
    /// State, then label
    #[serde(alias = "sc")]
    StateLabel,
}

impl FromStr for LabelFormat {
    type Err = SonarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" | "default" => Ok(Self::Default),
            "rsc" | "role_state_label" => Ok(Self::RoleStateLabel),
            "sc" | "state_label" => Ok(Self::StateLabel),
            other => Err(SonarError::invalid_input(format!(
                "unknown label format: {other}"
            ))),
        }
    }
}

/// Words used when composing announcements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub checked: String,
    pub not_checked: String,
    pub half_checked: String,
    pub check_box: String,
    pub radio_button: String,
    pub radio_menu_item: String,
    pub unavailable: String,
    pub shortcut_separator: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            checked: "checked".to_string(),
            not_checked: "not checked".to_string(),
            half_checked: "half checked".to_string(),
            check_box: "check box".to_string(),
            radio_button: "radio button".to_string(),
            radio_menu_item: "radio menu item".to_string(),
            unavailable: "unavailable".to_string(),
            shortcut_separator: ", ".to_string(),
        }
    }
}

/// Composer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSettings {
    /// Format for check boxes and radio buttons
    #[serde(default)]
    pub check_radio_format: LabelFormat,

    /// Format for check and radio menu items
    #[serde(default)]
    pub menu_item_format: LabelFormat,

    /// Also rename the control so braille shows the composed text
    #[serde(default = "default_rename_object")]
    pub rename_object: bool,

    #[serde(default)]
    pub labels: Labels,
}

fn default_rename_object() -> bool {
    true
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            check_radio_format: LabelFormat::default(),
            menu_item_format: LabelFormat::default(),
            rename_object: default_rename_object(),
            labels: Labels::default(),
        }
    }
}

/// Builds role/state-first announcements
#[derive(Debug, Clone, Default)]
pub struct LabelComposer {
    settings: LabelSettings,
}

impl LabelComposer {
    pub fn new(settings: LabelSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &LabelSettings {
        &self.settings
    }

    /// Compose the announcement for a focused control
    ///
    /// Returns `None` when the host should announce the control itself: the
    /// role is not a checkable control, or its format is [`LabelFormat::Default`].
    pub fn compose(
        &self,
        name: &str,
        role: Role,
        states: &BTreeSet<State>,
        shortcut: Option<&str>,
    ) -> Option<String> {
        let labels = &self.settings.labels;
        let checked = states.contains(&State::Checked);
        let check_word = if checked {
            labels.checked.as_str()
        } else {
            labels.not_checked.as_str()
        };

        let (format, role_word, state_word) = match role {
            Role::CheckBox => {
                let state = if states.contains(&State::HalfChecked) {
                    labels.half_checked.as_str()
                } else {
                    check_word
                };
                (self.settings.check_radio_format, labels.check_box.as_str(), state)
            }
            Role::RadioButton => (
                self.settings.check_radio_format,
                labels.radio_button.as_str(),
                check_word,
            ),
            // Plain menu items only carry a state worth moving when checked
            Role::MenuItem if checked => {
                (self.settings.check_radio_format, "", labels.checked.as_str())
            }
            Role::CheckMenuItem => (self.settings.menu_item_format, "", check_word),
            Role::RadioMenuItem => (
                self.settings.menu_item_format,
                labels.radio_menu_item.as_str(),
                check_word,
            ),
            _ => return None,
        };

        let role_word = match format {
            LabelFormat::Default => return None,
            LabelFormat::RoleStateLabel => role_word,
            LabelFormat::StateLabel => "",
        };

        let unavailable = if states.contains(&State::Unavailable) {
            labels.unavailable.as_str()
        } else {
            ""
        };

        let shortcut = shortcut.filter(|s| !s.is_empty());
        let label = clean_label(name, shortcut, &labels.shortcut_separator);

        let mut text = [role_word, unavailable, state_word, label.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        if let Some(shortcut) = shortcut {
            if !text.ends_with(shortcut) {
                text.push_str(&labels.shortcut_separator);
                text.push_str(shortcut);
            }
        }

        Some(text)
    }
}

/// Strip the host's role/state tail and a trailing shortcut from `name`
fn clean_label(name: &str, shortcut: Option<&str>, separator: &str) -> String {
    // Hosts separate the label from appended role/state text with two spaces
    let head = name.split("  ").next().unwrap_or(name).trim();
    let mut label = head.trim_end_matches([',', ' ']);

    if let Some(shortcut) = shortcut {
        if let Some(rest) = label
            .strip_suffix(shortcut)
            .and_then(|rest| rest.strip_suffix(", ").or_else(|| rest.strip_suffix(separator)))
        {
            label = rest;
        } else if let Some(rest) = label.strip_suffix(shortcut) {
            label = rest.trim_end_matches([',', ' ']);
        }
    }

    label.to_string()
}
