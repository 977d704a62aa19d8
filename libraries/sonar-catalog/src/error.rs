/// Catalog errors
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `CatalogError`
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Catalog error types
#[derive(Error, Debug)]
pub enum CatalogError {
    /// User-supplied sound was rejected
    #[error("Invalid sound file {}: {reason}", path.display())]
    InvalidSound { path: PathBuf, reason: String },

    /// Control key is not part of the catalog
    #[error("Unknown control key: {0}")]
    UnknownControlKey(String),

    /// Settings store failure
    #[error(transparent)]
    Settings(#[from] sonar_core::SonarError),

    /// Override blob could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CatalogError {
    pub(crate) fn invalid_sound(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidSound {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Human-readable reason suitable for the settings UI
    pub fn reason(&self) -> String {
        match self {
            Self::InvalidSound { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

impl From<CatalogError> for sonar_core::SonarError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Settings(inner) => inner,
            CatalogError::UnknownControlKey(key) => {
                sonar_core::SonarError::not_found("control key", key)
            }
            other => sonar_core::SonarError::invalid_input(other.to_string()),
        }
    }
}
