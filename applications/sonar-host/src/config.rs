/// Host configuration
use crate::error::{HostError, Result};
use serde::{Deserialize, Serialize};
use sonar_audio::SpatialConfig;
use sonar_core::CanvasSize;
use sonar_speech::{LabelSettings, LabelSuppression};
use std::path::{Path, PathBuf};

/// Configuration file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "sonar.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HostConfig {
    #[serde(default = "SpatialConfig::default")]
    pub audio: SpatialConfig,

    #[serde(default = "default_navigation")]
    pub navigation: NavigationSettings,

    #[serde(default)]
    pub speech: LabelSettings,

    #[serde(default = "default_paths")]
    pub paths: PathSettings,

    #[serde(default = "default_host")]
    pub host: HostSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NavigationSettings {
    /// Master switch, flipped at runtime by the toggle command
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub suppress_role_labels: bool,

    #[serde(default)]
    pub suppress_state_labels: bool,

    /// Play cues while moving through documents in browse mode
    #[serde(default = "default_true")]
    pub browse_mode_sound: bool,
}

impl NavigationSettings {
    pub fn suppression(&self) -> LabelSuppression {
        LabelSuppression::new(self.suppress_role_labels, self.suppress_state_labels)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PathSettings {
    #[serde(default = "default_sounds_dir")]
    pub sounds_dir: PathBuf,

    #[serde(default = "default_settings_file")]
    pub settings_file: PathBuf,
}

/// Values a real screen reader would report, fixed for the reference host
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HostSettings {
    #[serde(default = "default_speech_volume")]
    pub speech_volume: f32,

    #[serde(default)]
    pub canvas_width: Option<i32>,

    #[serde(default)]
    pub canvas_height: Option<i32>,
}

impl HostSettings {
    /// Desktop size, if both dimensions are configured
    pub fn canvas(&self) -> Option<CanvasSize> {
        match (self.canvas_width, self.canvas_height) {
            (Some(width), Some(height)) => Some(CanvasSize::new(width, height)),
            _ => None,
        }
    }
}

impl HostConfig {
    /// Load configuration from file and environment
    ///
    /// `path` defaults to `sonar.toml` in the working directory; a missing file
    /// is not an error. Environment variables override the file, e.g.
    /// `SONAR_AUDIO__USER_VOLUME=40`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(HostError::Config(format!(
                        "Configuration file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                settings = settings
                    .add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false));
            }
        }

        // Override with environment variables (prefixed with SONAR_)
        settings = settings.add_source(
            config::Environment::with_prefix("SONAR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.audio.validate().map_err(HostError::Config)?;

        if !(0.0..=100.0).contains(&self.host.speech_volume) {
            return Err(HostError::Config(format!(
                "host.speech_volume must be 0-100, got {}",
                self.host.speech_volume
            )));
        }

        if let Some(canvas) = self.host.canvas() {
            if canvas.is_degenerate() {
                return Err(HostError::Config(format!(
                    "host canvas must be positive, got {}x{}",
                    canvas.width, canvas.height
                )));
            }
        }

        Ok(())
    }
}

// Default values
fn default_true() -> bool {
    true
}

fn default_navigation() -> NavigationSettings {
    NavigationSettings {
        enabled: true,
        suppress_role_labels: true,
        suppress_state_labels: false,
        browse_mode_sound: true,
    }
}

fn default_paths() -> PathSettings {
    PathSettings {
        sounds_dir: default_sounds_dir(),
        settings_file: default_settings_file(),
    }
}

fn default_sounds_dir() -> PathBuf {
    PathBuf::from("./sounds")
}

fn default_settings_file() -> PathBuf {
    PathBuf::from("./sonar-settings.json")
}

fn default_host() -> HostSettings {
    HostSettings {
        speech_volume: default_speech_volume(),
        canvas_width: None,
        canvas_height: None,
    }
}

fn default_speech_volume() -> f32 {
    100.0
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            audio: SpatialConfig::default(),
            navigation: default_navigation(),
            speech: LabelSettings::default(),
            paths: default_paths(),
            host: default_host(),
        }
    }
}
