//! Integration tests for the sound catalog
//!
//! Exercise resolution together with the override store and WAV validation
//! against real files on disk.

use proptest::prelude::*;
use sonar_catalog::{role_entry, CatalogError, SoundCatalog, OVERRIDES_KEY};
use sonar_core::{ControlDescriptor, MemorySettings, Role, SettingsStore, SoundId, State};
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ===== Test Helpers =====

fn write_mono_wav(dir: &Path, name: &str, sample_rate: u32) -> PathBuf {
    let path = dir.join(name);
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for i in 0..441 {
        writer.write_sample(((i % 50) * 200) as i16).unwrap();
    }
    writer.finalize().unwrap();
    path
}

fn catalog_with_store() -> (SoundCatalog, Arc<MemorySettings>) {
    let settings = Arc::new(MemorySettings::new());
    (SoundCatalog::new(settings.clone()), settings)
}

// ===== Overrides =====

#[test]
fn button_override_replaces_default() {
    let dir = tempfile::tempdir().unwrap();
    let custom = write_mono_wav(dir.path(), "my-button.wav", 44_100);
    let (catalog, _) = catalog_with_store();

    let accepted = catalog.set_override("button", &custom).unwrap();
    assert!(accepted.warning.is_none());

    let sounds = catalog.resolve(&ControlDescriptor::new(Role::Button));
    assert_eq!(sounds[0], SoundId::new(custom.to_str().unwrap()));
    assert!(sounds[0].is_custom());
}

#[test]
fn override_applies_to_every_role_sharing_the_key() {
    let dir = tempfile::tempdir().unwrap();
    let custom = write_mono_wav(dir.path(), "menu.wav", 44_100);
    let (catalog, _) = catalog_with_store();
    catalog.set_override("menuitem", &custom).unwrap();

    for role in [Role::MenuBar, Role::MenuItem, Role::Menu, Role::TearOffMenu] {
        let sounds = catalog.resolve(&ControlDescriptor::new(role));
        assert_eq!(sounds[0].as_str(), custom.to_str().unwrap(), "{role}");
    }
}

#[test]
fn state_override_keeps_role_default() {
    let dir = tempfile::tempdir().unwrap();
    let custom = write_mono_wav(dir.path(), "tick.wav", 44_100);
    let (catalog, _) = catalog_with_store();
    catalog.set_override("checked", &custom).unwrap();

    let descriptor = ControlDescriptor::new(Role::CheckBox).with_state(State::Checked);
    let sounds = catalog.resolve(&descriptor);
    assert_eq!(sounds[0].as_str(), "checkbox.wav");
    assert_eq!(sounds[1].as_str(), custom.to_str().unwrap());
}

#[test]
fn missing_file_is_rejected_and_not_listed() {
    let dir = tempfile::tempdir().unwrap();
    let (catalog, settings) = catalog_with_store();

    let err = catalog
        .set_override("link", dir.path().join("missing.wav"))
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidSound { .. }));
    assert!(!err.reason().is_empty());

    assert!(!catalog.list_overrides().contains_key("link"));
    assert_eq!(settings.get(OVERRIDES_KEY).unwrap(), None);
}

#[test]
fn rejected_file_leaves_existing_overrides_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_mono_wav(dir.path(), "good.wav", 44_100);
    let (catalog, _) = catalog_with_store();
    catalog.set_override("link", &good).unwrap();

    let bogus = dir.path().join("bogus.wav");
    std::fs::write(&bogus, b"nope").unwrap();
    assert!(catalog.set_override("link", &bogus).is_err());

    assert_eq!(
        catalog.list_overrides().get("link").map(String::as_str),
        good.to_str()
    );
}

#[test]
fn sample_rate_mismatch_is_accepted_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let custom = write_mono_wav(dir.path(), "22k.wav", 22_050);
    let (catalog, _) = catalog_with_store();

    let accepted = catalog.set_override("slider", &custom).unwrap();
    assert!(accepted.warning.unwrap().contains("22050"));
    assert!(catalog.list_overrides().contains_key("slider"));
}

#[test]
fn clear_override_restores_default_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let custom = write_mono_wav(dir.path(), "b.wav", 44_100);
    let (catalog, settings) = catalog_with_store();
    catalog.set_override("button", &custom).unwrap();

    assert!(catalog.clear_override("button").unwrap());
    assert_eq!(
        catalog.resolve(&ControlDescriptor::new(Role::Button))[0].as_str(),
        "button.wav"
    );
    assert_eq!(settings.get(OVERRIDES_KEY).unwrap().as_deref(), Some("{}"));
}

#[test]
fn overrides_written_elsewhere_are_picked_up() {
    let settings = Arc::new(MemorySettings::new());
    let catalog = SoundCatalog::new(settings.clone());
    assert_eq!(
        catalog.resolve(&ControlDescriptor::new(Role::Heading).with_heading_level(3))[0].as_str(),
        "h3.wav"
    );

    settings
        .set(OVERRIDES_KEY, r#"{"heading3":"/custom/h3.wav"}"#.to_string())
        .unwrap();

    let sounds = catalog.resolve(&ControlDescriptor::new(Role::Heading).with_heading_level(3));
    assert_eq!(sounds[0].as_str(), "/custom/h3.wav");

    // The generic heading key is a different slot
    let generic = catalog.resolve(&ControlDescriptor::new(Role::Heading));
    assert_eq!(generic[0].as_str(), "heading.wav");
}

// ===== Property Tests =====

fn arbitrary_role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

fn arbitrary_states() -> impl Strategy<Value = Vec<State>> {
    prop::collection::vec(prop::sample::select(State::ALL.to_vec()), 0..8)
}

proptest! {
    /// Property: without overrides the first sound is the role's default
    #[test]
    fn default_role_sound_comes_first(role in arbitrary_role(), states in arbitrary_states()) {
        let catalog = SoundCatalog::new(Arc::new(MemorySettings::new()));
        let descriptor = ControlDescriptor::new(role).with_states(states);
        let sounds = catalog.resolve(&descriptor);

        if role != Role::Heading {
            if let Some(entry) = role_entry(role) {
                prop_assert_eq!(sounds[0].as_str(), entry.sound);
            }
        }
    }

    /// Property: one sound per cued slot, never more
    #[test]
    fn sound_count_matches_cued_slots(role in arbitrary_role(), states in arbitrary_states(), level in 0u8..10) {
        let catalog = SoundCatalog::new(Arc::new(MemorySettings::new()));
        let descriptor = ControlDescriptor::new(role)
            .with_states(states)
            .with_heading_level(level);
        let sounds = catalog.resolve(&descriptor);

        let role_slots = usize::from(role_entry(role).is_some());
        let state_slots = descriptor
            .states
            .iter()
            .filter(|s| sonar_catalog::state_entry(**s).is_some())
            .count();
        prop_assert_eq!(sounds.len(), role_slots + state_slots);
    }
}
