//! Cue rules between the screen reader and the engine
//!
//! The navigator decides *when* a control gets a sound: only while enabled,
//! only when the host is about to announce the role, and in browse mode only
//! on entering a field. The catalog decides *which* sounds, the engine plays
//! them.

use crate::config::{HostConfig, NavigationSettings};
use crate::events::{ControlInfo, EventOutcome, FieldTransition, HostEvent};
use crate::providers::{ConfiguredVolume, StaticGeometry};
use crate::settings::JsonFileSettings;
use sonar_audio::{EngineServices, PlayOutcome, SpatialAudioEngine};
use sonar_catalog::SoundCatalog;
use sonar_core::{CanvasSize, ControlDescriptor, SettingsStore, SpatialOutput};
use sonar_speech::{LabelComposer, LabelSuppression, SpeechProperties};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Settings key holding the last toggle state
pub const ENABLED_KEY: &str = "enabled";

pub struct Navigator {
    catalog: Arc<SoundCatalog>,
    settings: Arc<dyn SettingsStore>,
    engine: SpatialAudioEngine,
    geometry: Arc<StaticGeometry>,
    volume: Arc<ConfiguredVolume>,
    enabled: AtomicBool,
    browse_mode_sound: bool,
    suppression: LabelSuppression,
    composer: LabelComposer,
}

impl Navigator {
    /// A toggle state saved in `settings` takes precedence over
    /// `navigation.enabled`
    pub fn new(
        catalog: Arc<SoundCatalog>,
        settings: Arc<dyn SettingsStore>,
        engine: SpatialAudioEngine,
        geometry: Arc<StaticGeometry>,
        volume: Arc<ConfiguredVolume>,
        navigation: &NavigationSettings,
        composer: LabelComposer,
    ) -> Self {
        let enabled = saved_enabled(settings.as_ref()).unwrap_or(navigation.enabled);

        Self {
            catalog,
            settings,
            engine,
            geometry,
            volume,
            enabled: AtomicBool::new(enabled),
            browse_mode_sound: navigation.browse_mode_sound,
            suppression: navigation.suppression(),
            composer,
        }
    }

    /// Wire up catalog, engine and host readings from `config`
    ///
    /// Overrides and the toggle state are stored in the configured settings
    /// file; sounds are decoded with Symphonia and played through `output`.
    pub fn from_config(config: &HostConfig, output: Arc<dyn SpatialOutput>) -> Self {
        let settings: Arc<dyn SettingsStore> =
            Arc::new(JsonFileSettings::new(&config.paths.settings_file));
        let catalog = Arc::new(SoundCatalog::new(Arc::clone(&settings)));

        let geometry = Arc::new(StaticGeometry::new(config.host.canvas()));
        let volume = Arc::new(ConfiguredVolume::new(Some(config.host.speech_volume)));

        let services = EngineServices::new(output, geometry.clone(), volume.clone());
        let engine = SpatialAudioEngine::new(
            &config.audio,
            &config.paths.sounds_dir,
            &SoundCatalog::builtin_sounds(),
            services,
        );

        info!(
            sounds_dir = %config.paths.sounds_dir.display(),
            enabled = config.navigation.enabled,
            "Navigator ready"
        );

        Self::new(
            catalog,
            settings,
            engine,
            geometry,
            volume,
            &config.navigation,
            LabelComposer::new(config.speech.clone()),
        )
    }

    pub fn catalog(&self) -> &SoundCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &SpatialAudioEngine {
        &self.engine
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Flip cues on or off, returning the new state
    ///
    /// The new state is saved; a failed save is logged and the toggle still
    /// applies for this session.
    pub fn toggle(&self) -> bool {
        let enabled = !self.enabled.fetch_xor(true, Ordering::Relaxed);
        info!(enabled, "Cues toggled");

        if let Err(e) = self.settings.set(ENABLED_KEY, enabled.to_string()) {
            warn!(error = %e, "Failed to save toggle state");
        }
        enabled
    }

    /// The host is speaking a focused or navigated-to object
    ///
    /// Plays only when the role is part of the announcement.
    pub fn on_object_properties(
        &self,
        descriptor: &ControlDescriptor,
        role_announced: bool,
    ) -> Option<PlayOutcome> {
        if !self.is_enabled() || !role_announced {
            return None;
        }
        self.cue(descriptor)
    }

    /// The browse-mode caret crossed a control field
    ///
    /// Plays only on entering a field whose role has its own cue.
    pub fn on_control_field(
        &self,
        descriptor: &ControlDescriptor,
        field: FieldTransition,
    ) -> Option<PlayOutcome> {
        if !self.is_enabled()
            || !self.browse_mode_sound
            || field != FieldTransition::Added
            || !self.catalog.has_role_cue(descriptor.role)
        {
            return None;
        }
        self.cue(descriptor)
    }

    /// Drop spoken labels that the cues make redundant
    pub fn filter_speech(&self, properties: SpeechProperties) -> SpeechProperties {
        if self.is_enabled() {
            self.suppression.apply(properties)
        } else {
            properties
        }
    }

    /// Role/state-first announcement for a checkable control
    pub fn compose_label(
        &self,
        name: &str,
        descriptor: &ControlDescriptor,
        shortcut: Option<&str>,
    ) -> Option<String> {
        self.composer
            .compose(name, descriptor.role, &descriptor.states, shortcut)
    }

    pub fn set_canvas(&self, canvas: Option<CanvasSize>) {
        self.geometry.set(canvas);
        self.engine.invalidate_host_cache();
    }

    pub fn set_speech_volume(&self, volume: Option<f32>) {
        self.volume.set(volume);
        self.engine.invalidate_host_cache();
    }

    /// Dispatch one host event
    pub fn handle(&self, event: HostEvent) -> EventOutcome {
        match event {
            HostEvent::Canvas { width, height } => {
                self.set_canvas(Some(CanvasSize::new(width, height)));
                EventOutcome::Updated
            }
            HostEvent::SpeechVolume { volume } => {
                self.set_speech_volume(volume);
                EventOutcome::Updated
            }
            HostEvent::Focus {
                control,
                role_announced,
            } => cue_outcome(self.on_object_properties(&control.to_descriptor(), role_announced)),
            HostEvent::ControlField { control, field } => {
                cue_outcome(self.on_control_field(&control.to_descriptor(), field))
            }
            HostEvent::Toggle => EventOutcome::Enabled {
                enabled: self.toggle(),
            },
            HostEvent::Speech { properties } => EventOutcome::Speech {
                properties: self.filter_speech(properties),
            },
            HostEvent::Label {
                name,
                control,
                shortcut,
            } => {
                let text = self.label_for(&name, &control, shortcut.as_deref());
                let rename = text.is_some() && self.composer.settings().rename_object;
                EventOutcome::Label { text, rename }
            }
        }
    }

    fn label_for(&self, name: &str, control: &ControlInfo, shortcut: Option<&str>) -> Option<String> {
        self.compose_label(name, &control.to_descriptor(), shortcut)
    }

    fn cue(&self, descriptor: &ControlDescriptor) -> Option<PlayOutcome> {
        let sounds = self.catalog.resolve(descriptor);
        if sounds.is_empty() {
            debug!(role = %descriptor.role, "No cue for control");
            return None;
        }
        Some(
            self.engine
                .play_on_desktop(descriptor.screen_rect.as_ref(), &sounds),
        )
    }
}

fn saved_enabled(settings: &dyn SettingsStore) -> Option<bool> {
    match settings.get(ENABLED_KEY) {
        Ok(value) => value?.parse().ok(),
        Err(e) => {
            warn!(error = %e, "Failed to read saved toggle state");
            None
        }
    }
}

fn cue_outcome(outcome: Option<PlayOutcome>) -> EventOutcome {
    outcome.map_or(EventOutcome::Silent, |play| EventOutcome::Cue { play })
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("enabled", &self.is_enabled())
            .field("browse_mode_sound", &self.browse_mode_sound)
            .field("suppression", &self.suppression)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}
