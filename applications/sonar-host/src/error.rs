/// Host error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for HostError {
    fn from(err: config::ConfigError) -> Self {
        HostError::Config(err.to_string())
    }
}
