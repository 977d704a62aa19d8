/// Descriptor to sound resolution
use crate::error::{CatalogError, Result};
use crate::overrides::OverrideStore;
use crate::tables::{self, CatalogEntry, ControlKeyInfo, CONTROL_KEYS};
use crate::validation::validate_sound_file;
use sonar_core::{ControlDescriptor, Role, SettingsStore, SoundId};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Result of an accepted override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideAccepted {
    /// Non-fatal remark for the user (e.g. unusual sample rate)
    pub warning: Option<String>,
}

/// Resolves control descriptors to ordered sound lists
///
/// The role sound comes first, then one sound per cued state in declaration
/// order. Each slot uses the user's override for its control key when present,
/// and the built-in default otherwise.
pub struct SoundCatalog {
    overrides: OverrideStore,
}

impl SoundCatalog {
    /// Create a catalog whose overrides live in `settings`
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            overrides: OverrideStore::new(settings),
        }
    }

    /// Sounds describing `descriptor`, role first
    ///
    /// An empty list means "no cue for this control"; it is not an error.
    pub fn resolve(&self, descriptor: &ControlDescriptor) -> Vec<SoundId> {
        let overrides = self.overrides.current();
        let pick = |entry: CatalogEntry| -> SoundId {
            overrides
                .get(entry.control_key)
                .map_or_else(|| SoundId::from(entry.sound), |path| SoundId::new(path.as_str()))
        };

        let mut sounds = Vec::with_capacity(1 + descriptor.states.len());

        if let Some(entry) = Self::role_slot(descriptor) {
            sounds.push(pick(entry));
        }

        sounds.extend(
            descriptor
                .states
                .iter()
                .filter_map(|state| tables::state_entry(*state))
                .map(pick),
        );

        sounds
    }

    /// Whether the role has a cue of its own
    pub fn has_role_cue(&self, role: Role) -> bool {
        tables::role_entry(role).is_some()
    }

    /// Role entry, specialised for heading levels 1-6
    fn role_slot(descriptor: &ControlDescriptor) -> Option<CatalogEntry> {
        let base = tables::role_entry(descriptor.role)?;
        if descriptor.role != Role::Heading {
            return Some(base);
        }

        Some(
            descriptor
                .heading_level
                .and_then(tables::heading_level_entry)
                .unwrap_or(base),
        )
    }

    /// Point `control_key` at a user-supplied sound
    ///
    /// The file must be an absolute path to a mono WAV. On rejection the stored
    /// overrides are left untouched and the error carries a readable reason.
    pub fn set_override(
        &self,
        control_key: &str,
        sound_path: impl AsRef<Path>,
    ) -> Result<OverrideAccepted> {
        let sound_path = sound_path.as_ref();
        if tables::control_key_info(control_key).is_none() {
            return Err(CatalogError::UnknownControlKey(control_key.to_string()));
        }

        let check = validate_sound_file(sound_path)?;
        let Some(path) = sound_path.to_str() else {
            return Err(CatalogError::invalid_sound(
                sound_path,
                "The path is not valid UTF-8.",
            ));
        };

        self.overrides.update(|map| {
            map.insert(control_key.to_string(), path.to_string());
            true
        })?;

        debug!("Override set: {} -> {}", control_key, path);
        Ok(OverrideAccepted {
            warning: check.warning,
        })
    }

    /// Remove the override for `control_key`
    ///
    /// Returns `false` (and writes nothing) when no override was set.
    pub fn clear_override(&self, control_key: &str) -> Result<bool> {
        let cleared = self
            .overrides
            .update(|map| map.remove(control_key).is_some())?;

        if cleared {
            debug!("Override cleared: {}", control_key);
        }
        Ok(cleared)
    }

    /// Snapshot of all overrides
    pub fn list_overrides(&self) -> BTreeMap<String, String> {
        (*self.overrides.current()).clone()
    }

    /// Every control key a user can override
    pub fn control_keys() -> &'static [ControlKeyInfo] {
        CONTROL_KEYS
    }

    /// Every distinct bundled sound, for preloading
    pub fn builtin_sounds() -> Vec<SoundId> {
        let sounds: BTreeSet<&'static str> =
            CONTROL_KEYS.iter().map(|info| info.default_sound).collect();
        sounds.into_iter().map(SoundId::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonar_core::{MemorySettings, State};

    fn catalog() -> SoundCatalog {
        SoundCatalog::new(Arc::new(MemorySettings::new()))
    }

    fn ids(sounds: &[SoundId]) -> Vec<&str> {
        sounds.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn role_then_states_in_declaration_order() {
        let descriptor = ControlDescriptor::new(Role::TreeViewItem).with_states([
            State::Selected,
            State::Expanded,
            State::Focused,
        ]);

        let sounds = catalog().resolve(&descriptor);
        assert_eq!(
            ids(&sounds),
            vec!["treeviewitem.wav", "expanded.wav", "selected.wav"]
        );
    }

    #[test]
    fn uncued_role_still_yields_state_sounds() {
        let descriptor = ControlDescriptor::new(Role::Pane).with_state(State::Busy);
        assert_eq!(ids(&catalog().resolve(&descriptor)), vec!["busy.wav"]);
    }

    #[test]
    fn nothing_matches() {
        let descriptor = ControlDescriptor::new(Role::Window)
            .with_states([State::Focused, State::ReadOnly]);
        assert!(catalog().resolve(&descriptor).is_empty());
    }

    #[test]
    fn heading_level_selection() {
        let catalog = catalog();
        let level = |level: Option<u8>| {
            let mut descriptor = ControlDescriptor::new(Role::Heading);
            descriptor.heading_level = level;
            catalog.resolve(&descriptor)[0].as_str().to_string()
        };

        assert_eq!(level(Some(3)), "h3.wav");
        assert_eq!(level(Some(1)), "h1.wav");
        assert_eq!(level(None), "heading.wav");
        assert_eq!(level(Some(0)), "heading.wav");
        assert_eq!(level(Some(9)), "heading.wav");
    }

    #[test]
    fn heading_level_ignored_for_other_roles() {
        let descriptor = ControlDescriptor::new(Role::Link).with_heading_level(2);
        assert_eq!(ids(&catalog().resolve(&descriptor)), vec!["link.wav"]);
    }

    #[test]
    fn unknown_control_key_rejected() {
        let err = catalog()
            .set_override("spaceship", "/tmp/whatever.wav")
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownControlKey(_)));
    }

    #[test]
    fn clearing_absent_override_is_noop() {
        assert!(!catalog().clear_override("button").unwrap());
    }

    #[test]
    fn builtin_sounds_are_distinct_and_cover_heading_levels() {
        let sounds = SoundCatalog::builtin_sounds();
        let unique: BTreeSet<_> = sounds.iter().collect();
        assert_eq!(unique.len(), sounds.len());
        assert!(sounds.contains(&SoundId::from("h6.wav")));
        assert!(sounds.contains(&SoundId::from("heading.wav")));
        assert!(sounds.contains(&SoundId::from("haslongdesc.wav")));
    }
}
