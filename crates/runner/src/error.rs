//! Runner errors

use thiserror::Error;
use worldclock_ports::EngineError;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Clock service has stopped")]
    ServiceStopped,

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

pub type Result<T> = std::result::Result<T, HostError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
