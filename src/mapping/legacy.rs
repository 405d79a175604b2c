//! Legacy joystick code encoder
//!
//! Older emulators bind every control to one signed integer:
//!
//! | control            | code                                  |
//! |--------------------|---------------------------------------|
//! | button N           | `N + 1`                               |
//! | axis N, half s     | `s * ((N + 1) << AXIS_SHIFT)`         |
//! | hat N, mask B      | `HAT_FLAG \| (N << HAT_SHIFT) \| B`   |
//! | unbound            | `INERT_CODE`                          |

use tracing::{debug, warn};

use crate::mapping::{
    EncoderCapabilities, InputKey, PlayerMapping, RawControlDescriptor, TargetEncoder, TargetType,
};
use crate::persistence::ConfigSink;

pub const AXIS_SHIFT: u32 = 8;
pub const HAT_SHIFT: u32 = 4;
pub const HAT_FLAG: i32 = 1 << 14;
/// Code of an unbound control
pub const INERT_CODE: i32 = 0;

/// Encoder for signed integer joystick codes
#[derive(Debug, Clone)]
pub struct LegacyJoystickEncoder {
    name: String,
    max_players: usize,
}

impl Default for LegacyJoystickEncoder {
    fn default() -> Self {
        Self {
            name: "Legacy joystick codes".to_string(),
            max_players: 2,
        }
    }
}

/// Packs one descriptor into its joystick code
pub fn joystick_code(control: RawControlDescriptor) -> i32 {
    match control {
        RawControlDescriptor::Button { id } => id as i32 + 1,
        RawControlDescriptor::Axis { id, sign } => sign.as_i32() * ((id as i32 + 1) << AXIS_SHIFT),
        RawControlDescriptor::Hat { id, bit } => HAT_FLAG | ((id as i32) << HAT_SHIFT) | bit as i32,
        RawControlDescriptor::Unbound => INERT_CODE,
    }
}

impl TargetEncoder for LegacyJoystickEncoder {
    fn get_type(&self) -> TargetType {
        TargetType::Legacy
    }

    fn capabilities(&self) -> EncoderCapabilities {
        EncoderCapabilities {
            xinput_slots: true,
            ..Default::default()
        }
    }

    fn max_players(&self) -> usize {
        self.max_players
    }

    fn get_name(&self) -> String {
        self.name.clone()
    }

    fn encode_player(&self, port: usize, player: &PlayerMapping<'_>, sink: &mut dyn ConfigSink) {
        let device = player.device;
        let section = if device.is_keyboard {
            format!("keyboard{}", port + 1)
        } else {
            format!("joystick{}", port + 1)
        };
        sink.set_int(&section, "device", i64::from(device.device_index));

        for key in InputKey::ALL {
            let control = player.table.get(key);
            let code = match (device.is_keyboard, control) {
                // keyboards store the raw key code
                (true, RawControlDescriptor::Button { id }) => {
                    i32::try_from(id).unwrap_or_else(|_| {
                        warn!(
                            "{}: key code {} for {} does not fit, leaving unbound",
                            device.name, id, key
                        );
                        INERT_CODE
                    })
                }
                (true, _) => INERT_CODE,
                (false, control) => joystick_code(control),
            };
            sink.set_int(&section, key.name(), i64::from(code));
        }
        debug!("Wrote [{}] for {}", section, device.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Guid, PhysicalDevice};
    use crate::mapping::{AxisSign, MappingTable};
    use crate::persistence::IniDocument;
    use std::collections::BTreeMap;

    #[test]
    fn codes() {
        assert_eq!(joystick_code(RawControlDescriptor::Button { id: 0 }), 1);
        assert_eq!(
            joystick_code(RawControlDescriptor::Axis {
                id: 2,
                sign: AxisSign::Negative
            }),
            -768
        );
        assert_eq!(
            joystick_code(RawControlDescriptor::Axis {
                id: 0,
                sign: AxisSign::Positive
            }),
            256
        );
        assert_eq!(
            joystick_code(RawControlDescriptor::Hat { id: 1, bit: 8 }),
            HAT_FLAG | 16 | 8
        );
        assert_eq!(joystick_code(RawControlDescriptor::Unbound), INERT_CODE);
    }

    #[test]
    fn unbound_keys_get_inert_code() {
        let device = PhysicalDevice::gamepad(
            Guid::parse("030000005e0400008e02000000007801").unwrap(),
            1,
            3,
            "Pad",
        );
        let table = MappingTable::from_entries(BTreeMap::from([(
            InputKey::A,
            RawControlDescriptor::Button { id: 0 },
        )]));
        let mut doc = IniDocument::default();
        LegacyJoystickEncoder::default().encode_player(
            0,
            &PlayerMapping {
                device: &device,
                table,
            },
            &mut doc,
        );
        assert_eq!(doc.get("joystick1", "device"), Some("3"));
        assert_eq!(doc.get("joystick1", "a"), Some("1"));
        assert_eq!(doc.get("joystick1", "b"), Some("0"));
    }

    #[test]
    fn keyboard_codes_never_wrap_negative() {
        let keyboard = PhysicalDevice::gamepad(
            Guid::parse("00000000000000000000000000000000").unwrap(),
            1,
            0,
            "Keyboard",
        )
        .with_keyboard(true)
        .with_capture(InputKey::A, RawControlDescriptor::Button { id: u32::MAX })
        .with_capture(InputKey::Start, RawControlDescriptor::Button { id: 13 });
        let table = MappingTable::from_entries(keyboard.capture.clone());
        let mut doc = IniDocument::default();
        LegacyJoystickEncoder::default().encode_player(
            0,
            &PlayerMapping {
                device: &keyboard,
                table,
            },
            &mut doc,
        );
        assert_eq!(doc.get("keyboard1", "a"), Some("0"));
        assert_eq!(doc.get("keyboard1", "start"), Some("13"));
    }
}
