use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display};

use crate::mapping::{InputKey, MappingError, RawControlDescriptor};

/// Nintendo USB vendor ID
pub const VENDOR_NINTENDO: u16 = 0x057E;
/// Microsoft USB vendor ID (XInput pads)
pub const VENDOR_MICROSOFT: u16 = 0x045E;

const GUID_LEN: usize = 32;
/// Hex characters at the end of a GUID holding the revision/driver suffix
const GUID_SUFFIX_LEN: usize = 4;

/// SDL joystick GUID, validated to 32 lowercase hex characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Guid(String);

impl Guid {
    /// Accepts 32 hex characters in any case
    pub fn parse(raw: &str) -> Result<Self, MappingError> {
        let trimmed = raw.trim();
        if trimmed.len() != GUID_LEN || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MappingError::InvalidGuid(raw.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// GUID from the 16 raw bytes gilrs reports
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Matching key: the trailing revision bytes zeroed
    pub fn normalized(&self) -> String {
        let mut key = self.0[..GUID_LEN - GUID_SUFFIX_LEN].to_string();
        key.push_str(&"0".repeat(GUID_SUFFIX_LEN));
        key
    }
}

impl TryFrom<String> for Guid {
    type Error = MappingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Guid::parse(&value)
    }
}

impl From<Guid> for String {
    fn from(guid: Guid) -> Self {
        guid.0
    }
}

impl Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One connected input device as handed over by the front-end
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalDevice {
    pub guid: Guid,
    pub vendor_id: u16,
    pub product_id: u16,
    pub is_xinput: bool,
    pub is_keyboard: bool,
    /// 1-based, assigned by the front-end; iteration order
    pub player_index: u32,
    pub device_index: u32,
    pub name: String,
    /// Native per-key raw input capture, authoritative over the database
    pub capture: BTreeMap<InputKey, RawControlDescriptor>,
}

impl PhysicalDevice {
    /// Plain gamepad without vendor IDs or capture
    pub fn gamepad(guid: Guid, player_index: u32, device_index: u32, name: impl Into<String>) -> Self {
        Self {
            guid,
            vendor_id: 0,
            product_id: 0,
            is_xinput: false,
            is_keyboard: false,
            player_index,
            device_index,
            name: name.into(),
            capture: BTreeMap::new(),
        }
    }

    pub fn with_ids(mut self, vendor_id: u16, product_id: u16) -> Self {
        self.vendor_id = vendor_id;
        self.product_id = product_id;
        self
    }

    pub fn with_xinput(mut self, is_xinput: bool) -> Self {
        self.is_xinput = is_xinput;
        self
    }

    pub fn with_keyboard(mut self, is_keyboard: bool) -> Self {
        self.is_keyboard = is_keyboard;
        self
    }

    /// Records one native binding for `key`
    pub fn with_capture(mut self, key: InputKey, control: RawControlDescriptor) -> Self {
        self.capture.insert(key, control);
        self
    }

    /// Face buttons are laid out B/A instead of A/B
    pub fn is_nintendo(&self) -> bool {
        self.vendor_id == VENDOR_NINTENDO
    }
}

/// Sorts by player index, keeping front-end order for equal indices
pub fn sort_by_player(devices: &mut [PhysicalDevice]) {
    devices.sort_by_key(|d| d.player_index);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guid_validation() {
        assert!(Guid::parse("030000005e0400008e02000000007801").is_ok());
        assert!(Guid::parse("030000005E0400008E02000000007801").is_ok());
        assert!(Guid::parse("030000005e0400008e0200000000780").is_err());
        assert!(Guid::parse("030000005e0400008e020000000078zz").is_err());
    }

    #[test]
    fn normalized_zeroes_suffix_only() {
        let a = Guid::parse("030000005e0400008e02000000007801").unwrap();
        let b = Guid::parse("030000005E0400008E0200000000abcd").unwrap();
        assert_eq!(a.normalized(), "030000005e0400008e02000000000000");
        assert_eq!(a.normalized(), b.normalized());
    }

    #[test]
    fn guid_from_bytes() {
        let mut bytes = [0u8; 16];
        bytes[0] = 0x03;
        bytes[4] = 0x5e;
        bytes[5] = 0x04;
        assert_eq!(
            Guid::from_bytes(bytes).as_str(),
            "030000005e0400000000000000000000"
        );
    }

    #[test]
    fn sorting_keeps_front_end_order_for_ties() {
        let guid = Guid::parse("030000005e0400008e02000000007801").unwrap();
        let mut devices = vec![
            PhysicalDevice::gamepad(guid.clone(), 2, 0, "second"),
            PhysicalDevice::gamepad(guid.clone(), 1, 1, "first"),
            PhysicalDevice::gamepad(guid, 2, 2, "third"),
        ];
        sort_by_player(&mut devices);
        let names: Vec<_> = devices.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }
}
