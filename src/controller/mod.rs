//! Controller subsystem: where the physical devices of a launch come from
//!
//! Two sources produce the same [`PhysicalDevice`] list:
//!
//! 1. [`manifest`] - devices handed over by the front-end as a TOML file,
//!    optionally with native per-key captures
//! 2. [`gamepads`] - pads currently connected, enumerated through gilrs
//!
//! # Architecture
//!
//! ```text
//! devices.toml ──► DeviceManifest ──┐
//!                                   ├──► Vec<PhysicalDevice> ──► ConfigurationManager
//! gilrs        ──► enumerate ───────┘
//! ```

pub mod device;
pub mod gamepads;
pub mod manifest;

pub use device::{sort_by_player, Guid, PhysicalDevice};
pub use gamepads::enumerate_gamepads;
pub use manifest::DeviceManifest;

use std::path::PathBuf;

use crate::mapping::MappingError;

/// Failures while collecting the devices of a launch
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// gilrs could not be started
    #[error("Failed to initialize gamepad backend: {0}")]
    InitializationError(String),

    /// Manifest file missing or unreadable
    #[error("Failed to read device manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Manifest is not valid TOML for the device schema
    #[error("Failed to parse device manifest: {0}")]
    ManifestParse(String),

    /// One `[[device]]` entry is unusable, `entry` is 0-based
    #[error("Invalid device entry {entry}: {source}")]
    InvalidDevice { entry: usize, source: MappingError },
}
