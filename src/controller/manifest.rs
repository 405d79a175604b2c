//! TOML device manifest written by the front-end
//!
//! ```toml
//! [[device]]
//! guid = "030000005e0400008e02000000007801"
//! vendor_id = 0x045e
//! product_id = 0x028e
//! xinput = true
//! player = 1
//! index = 0
//! name = "Xbox 360 Controller"
//!
//! [device.capture]
//! a = "b0"
//! leftanalogleft = "-a0"
//! ```
//!
//! Keyboards set `keyboard = true` and capture `k<code>` tokens.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

use super::{ControllerError, Guid, PhysicalDevice};
use crate::mapping::descriptor::parse_keyboard_token;
use crate::mapping::normalizer::orient;
use crate::mapping::{InputKey, MappingError, RawControlDescriptor, Token};

/// Placeholder GUID for keyboards, which have none
const KEYBOARD_GUID: &str = "00000000000000000000000000000000";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ManifestFile {
    #[serde(default, rename = "device")]
    devices: Vec<DeviceEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeviceEntry {
    #[serde(default)]
    guid: Option<String>,
    #[serde(default)]
    vendor_id: u16,
    #[serde(default)]
    product_id: u16,
    #[serde(default)]
    xinput: bool,
    #[serde(default)]
    keyboard: bool,
    player: u32,
    #[serde(default)]
    index: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    capture: BTreeMap<String, String>,
}

/// Devices of one launch, ordered by player index
#[derive(Debug, Clone, Default)]
pub struct DeviceManifest {
    devices: Vec<PhysicalDevice>,
}

impl DeviceManifest {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ControllerError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ControllerError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::parse(&content)?;
        info!(
            "Loaded {} device(s) from {}",
            manifest.devices.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// Malformed capture entries are skipped with a warning, a bad GUID
    /// rejects the whole manifest
    pub fn parse(content: &str) -> Result<Self, ControllerError> {
        let file: ManifestFile =
            toml::from_str(content).map_err(|e| ControllerError::ManifestParse(e.to_string()))?;

        let mut devices = file
            .devices
            .into_iter()
            .enumerate()
            .map(|(entry, device)| {
                device
                    .into_device()
                    .map_err(|source| ControllerError::InvalidDevice { entry, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        super::sort_by_player(&mut devices);
        Ok(Self { devices })
    }

    pub fn devices(&self) -> &[PhysicalDevice] {
        &self.devices
    }

    /// Devices ascending by player index
    pub fn into_devices(self) -> Vec<PhysicalDevice> {
        self.devices
    }
}

impl DeviceEntry {
    fn into_device(self) -> Result<PhysicalDevice, MappingError> {
        let guid = match (&self.guid, self.keyboard) {
            (Some(raw), _) => Guid::parse(raw)?,
            (None, true) => Guid::parse(KEYBOARD_GUID)?,
            (None, false) => return Err(MappingError::InvalidGuid(String::new())),
        };

        let mut device = PhysicalDevice::gamepad(guid, self.player, self.index, self.name)
            .with_ids(self.vendor_id, self.product_id)
            .with_xinput(self.xinput)
            .with_keyboard(self.keyboard);

        for (name, token) in &self.capture {
            match capture_entry(name, token, self.keyboard) {
                Ok((key, control)) => {
                    device.capture.insert(key, control);
                }
                Err(e) => warn!("Player {}: skipping capture {}: {}", self.player, name, e),
            }
        }
        Ok(device)
    }
}

fn capture_entry(
    name: &str,
    token: &str,
    keyboard: bool,
) -> Result<(InputKey, RawControlDescriptor), MappingError> {
    let key: InputKey = name.parse()?;
    let control = if keyboard {
        parse_keyboard_token(token)?
    } else {
        orient(token.parse::<Token>()?, key)
    };
    Ok((key, control))
}
