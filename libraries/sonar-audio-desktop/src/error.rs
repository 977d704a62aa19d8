/// Desktop output errors
use thiserror::Error;

/// Result type for desktop output operations
pub type Result<T> = std::result::Result<T, OutputError>;

/// Desktop output errors
#[derive(Debug, Error)]
pub enum OutputError {
    /// No default output device
    #[error("Audio device not found")]
    DeviceNotFound,

    /// Failed to build output stream
    #[error("Failed to build output stream: {0}")]
    StreamBuildError(String),

    /// Failed to start stream
    #[error("Failed to play stream: {0}")]
    PlayError(String),

    /// Sample rate conversion error
    #[error("Sample rate conversion error: {0}")]
    ResampleError(String),

    /// The audio thread is gone or not keeping up
    #[error("Audio thread unavailable: {0}")]
    ChannelClosed(String),

    /// CPAL error
    #[error("CPAL error: {0}")]
    CpalError(String),
}

impl From<cpal::BuildStreamError> for OutputError {
    fn from(err: cpal::BuildStreamError) -> Self {
        OutputError::StreamBuildError(err.to_string())
    }
}

impl From<cpal::PlayStreamError> for OutputError {
    fn from(err: cpal::PlayStreamError) -> Self {
        OutputError::PlayError(err.to_string())
    }
}

impl From<cpal::DefaultStreamConfigError> for OutputError {
    fn from(err: cpal::DefaultStreamConfigError) -> Self {
        OutputError::CpalError(err.to_string())
    }
}

impl From<OutputError> for sonar_core::SonarError {
    fn from(err: OutputError) -> Self {
        sonar_core::SonarError::audio(err.to_string())
    }
}
