//! Speech adjustment tests across both helpers

use proptest::prelude::*;
use sonar_core::{Role, State};
use sonar_speech::{LabelComposer, LabelFormat, LabelSettings, LabelSuppression, SpeechProperties};
use std::collections::BTreeSet;

// ===== Settings =====

#[test]
fn settings_defaults_from_empty_json() {
    let settings: LabelSettings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings, LabelSettings::default());
    assert_eq!(settings.check_radio_format, LabelFormat::RoleStateLabel);
    assert!(settings.rename_object);
    assert_eq!(settings.labels.shortcut_separator, ", ");
}

#[test]
fn settings_accept_partial_labels() {
    let settings: LabelSettings = serde_json::from_str(
        r#"{"menu_item_format": "sc", "labels": {"checked": "coché", "not_checked": "non coché"}}"#,
    )
    .unwrap();

    let composer = LabelComposer::new(settings);
    let states: BTreeSet<State> = [State::Checked].into_iter().collect();

    assert_eq!(
        composer
            .compose("Gras", Role::CheckMenuItem, &states, None)
            .as_deref(),
        Some("coché Gras")
    );
    assert_eq!(
        composer
            .compose("Gras", Role::CheckBox, &BTreeSet::new(), None)
            .as_deref(),
        Some("check box non coché Gras")
    );
}

// ===== Suppression =====

#[test]
fn suppression_roundtrips_through_serde() {
    let props: SpeechProperties = serde_json::from_str(
        r#"{"name": "Inbox", "role": "tree_view_item", "states": ["expanded", "selected"]}"#,
    )
    .unwrap();

    let filtered = LabelSuppression::new(true, false).apply(props);
    assert_eq!(filtered.role, None);
    assert_eq!(filtered.states.len(), 2);
}

// ===== Properties =====

fn checkable_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::CheckBox),
        Just(Role::RadioButton),
        Just(Role::CheckMenuItem),
        Just(Role::RadioMenuItem),
    ]
}

fn any_state() -> impl Strategy<Value = State> {
    (0..State::ALL.len()).prop_map(|i| State::ALL[i])
}

proptest! {
    #[test]
    fn composed_text_ends_with_label(
        role in checkable_role(),
        states in prop::collection::btree_set(any_state(), 0..5),
        label in "[A-Za-z]{1,10}( [A-Za-z]{1,10}){0,2}",
    ) {
        let composer = LabelComposer::default();
        let text = composer.compose(&label, role, &states, None).unwrap();
        prop_assert!(text.ends_with(&label));
    }

    #[test]
    fn shortcut_appears_once(
        role in checkable_role(),
        label in "[A-Za-z]{1,12}",
        key in "[A-Z]",
    ) {
        let composer = LabelComposer::default();
        let shortcut = format!("Alt+{key}");
        let name = format!("{label}, {shortcut}");

        let text = composer.compose(&name, role, &BTreeSet::new(), Some(&shortcut)).unwrap();
        prop_assert_eq!(text.matches(shortcut.as_str()).count(), 1);
        let suffix = format!(", {}", shortcut);
        prop_assert!(text.ends_with(&suffix));
    }
}
