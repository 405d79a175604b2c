//! Error definitions for the mapping module
//!
//! Apart from `ConfigError` and `Io`, every variant here is recoverable: the
//! caller logs it and carries on with fewer (or unbound) controls.

use std::path::PathBuf;
use thiserror::Error;

/// Error kinds of the normalization and encoding engine
#[derive(Debug, Error)]
pub enum MappingError {
    /// Community database file is missing or unreadable
    #[error("Controller database unavailable at {path}: {reason}")]
    DatabaseUnavailable { path: PathBuf, reason: String },

    /// GUID has no entry in the community database
    #[error("Device {guid} not found in controller database")]
    DeviceNotInDatabase { guid: String },

    /// GUID is not 32 hexadecimal characters
    #[error("Invalid device GUID: {0:?}")]
    InvalidGuid(String),

    /// Descriptor token could not be parsed
    #[error("Malformed token {token:?}: {reason}")]
    MalformedToken { token: String, reason: String },

    /// More devices than the target supports
    #[error("Target {target} supports {cap} players, dropped player {player_index}")]
    TargetCapExceeded {
        target: String,
        cap: usize,
        player_index: u32,
    },

    /// Invalid launch or device configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Failure writing the target artifact
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MappingError {
    /// Whether the launch may continue after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MappingError::DatabaseUnavailable { .. }
                | MappingError::DeviceNotInDatabase { .. }
                | MappingError::InvalidGuid(_)
                | MappingError::MalformedToken { .. }
                | MappingError::TargetCapExceeded { .. }
        )
    }
}
