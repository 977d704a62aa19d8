/// Audio-specific errors
use thiserror::Error;

/// Result type alias using `AudioError`
pub type Result<T> = std::result::Result<T, AudioError>;

/// Audio error types
#[derive(Error, Debug)]
pub enum AudioError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Output rejected a clip or a playback trigger
    #[error("Output error: {0}")]
    Output(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Symphonia error
    #[error("Symphonia error: {0}")]
    Symphonia(String),
}

impl From<AudioError> for sonar_core::SonarError {
    fn from(err: AudioError) -> Self {
        sonar_core::SonarError::audio(err.to_string())
    }
}

impl From<sonar_core::SonarError> for AudioError {
    fn from(err: sonar_core::SonarError) -> Self {
        AudioError::Output(err.to_string())
    }
}
