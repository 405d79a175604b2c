//! Immutable lookup tables injected into the normalizer
//!
//! Built once per launch with [`TranslationTables::standard`] and passed by
//! reference; nothing in here is global.

use std::collections::BTreeMap;

use crate::controller::device::VENDOR_NINTENDO;
use crate::mapping::descriptor::AxisSign;
use crate::mapping::input_key::{InputKey, KeyKind};

/// Raw XInput axis a trigger key is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XInputAxisSlot {
    /// Axis index under raw XInput numbering
    pub slot: u32,
    /// Half of the shared axis the trigger drives
    pub sign: AxisSign,
}

/// Name, face-swap and XInput tables used by the normalizer
#[derive(Debug, Clone)]
pub struct TranslationTables {
    sdl_names: BTreeMap<InputKey, &'static str>,
    face_swaps: Vec<(u16, InputKey, InputKey)>,
    xinput_triggers: BTreeMap<InputKey, XInputAxisSlot>,
}

impl TranslationTables {
    /// SDL GameController names and the XInput/DirectInput axis layout
    pub fn standard() -> Self {
        let sdl_names = BTreeMap::from([
            (InputKey::Up, "dpup"),
            (InputKey::Down, "dpdown"),
            (InputKey::Left, "dpleft"),
            (InputKey::Right, "dpright"),
            (InputKey::A, "a"),
            (InputKey::B, "b"),
            (InputKey::X, "x"),
            (InputKey::Y, "y"),
            (InputKey::Start, "start"),
            (InputKey::Select, "back"),
            (InputKey::Hotkey, "guide"),
            (InputKey::L1, "leftshoulder"),
            (InputKey::R1, "rightshoulder"),
            (InputKey::L2, "lefttrigger"),
            (InputKey::R2, "righttrigger"),
            (InputKey::L3, "leftstick"),
            (InputKey::R3, "rightstick"),
            (InputKey::LeftAnalogUp, "lefty"),
            (InputKey::LeftAnalogDown, "lefty"),
            (InputKey::LeftAnalogLeft, "leftx"),
            (InputKey::LeftAnalogRight, "leftx"),
            (InputKey::RightAnalogUp, "righty"),
            (InputKey::RightAnalogDown, "righty"),
            (InputKey::RightAnalogLeft, "rightx"),
            (InputKey::RightAnalogRight, "rightx"),
        ]);

        let face_swaps = vec![
            (VENDOR_NINTENDO, InputKey::A, InputKey::B),
            (VENDOR_NINTENDO, InputKey::X, InputKey::Y),
        ];

        // Raw XInput reports both triggers on the shared Z axis (slot 2); the
        // sticks already sit at x 0, y 1, rx 3, ry 4 as in the SDL layout.
        let xinput_triggers = BTreeMap::from([
            (
                InputKey::L2,
                XInputAxisSlot {
                    slot: 2,
                    sign: AxisSign::Positive,
                },
            ),
            (
                InputKey::R2,
                XInputAxisSlot {
                    slot: 2,
                    sign: AxisSign::Negative,
                },
            ),
        ]);

        Self {
            sdl_names,
            face_swaps,
            xinput_triggers,
        }
    }

    /// SDL GameController binding name of a key (`dpup`, `leftx`, ...)
    pub fn sdl_name(&self, key: InputKey) -> Option<&'static str> {
        self.sdl_names.get(&key).copied()
    }

    /// Database names to try for a key, most specific first
    pub fn sdl_candidates(&self, key: InputKey) -> Vec<String> {
        let Some(name) = self.sdl_name(key) else {
            return Vec::new();
        };
        match key.kind() {
            KeyKind::AnalogHalf(sign) => vec![format!("{}{}", sign.as_char(), name), name.to_string()],
            _ => vec![name.to_string()],
        }
    }

    /// Key whose physical button should be read instead of `key`
    pub fn face_swap(&self, vendor_id: u16, key: InputKey, include_xy: bool) -> InputKey {
        for (vendor, first, second) in &self.face_swaps {
            if *vendor != vendor_id {
                continue;
            }
            let is_xy = *first == InputKey::X || *first == InputKey::Y;
            if is_xy && !include_xy {
                continue;
            }
            if key == *first {
                return *second;
            }
            if key == *second {
                return *first;
            }
        }
        key
    }

    /// Shared-axis slot of a trigger key, `None` for every other key
    pub fn xinput_trigger(&self, key: InputKey) -> Option<XInputAxisSlot> {
        self.xinput_triggers.get(&key).copied()
    }
}

impl Default for TranslationTables {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_an_sdl_name() {
        let tables = TranslationTables::standard();
        for key in InputKey::ALL {
            assert!(tables.sdl_name(key).is_some(), "{key} has no SDL name");
        }
    }

    #[test]
    fn analog_candidates_prefer_half_keys() {
        let tables = TranslationTables::standard();
        assert_eq!(
            tables.sdl_candidates(InputKey::LeftAnalogLeft),
            vec!["-leftx".to_string(), "leftx".to_string()]
        );
        assert_eq!(tables.sdl_candidates(InputKey::A), vec!["a".to_string()]);
    }

    #[test]
    fn face_swap_only_for_nintendo() {
        let tables = TranslationTables::standard();
        assert_eq!(tables.face_swap(VENDOR_NINTENDO, InputKey::A, false), InputKey::B);
        assert_eq!(tables.face_swap(VENDOR_NINTENDO, InputKey::B, false), InputKey::A);
        assert_eq!(tables.face_swap(VENDOR_NINTENDO, InputKey::X, false), InputKey::X);
        assert_eq!(tables.face_swap(VENDOR_NINTENDO, InputKey::X, true), InputKey::Y);
        assert_eq!(tables.face_swap(0x045E, InputKey::A, true), InputKey::A);
    }

    #[test]
    fn only_triggers_have_xinput_slots() {
        let tables = TranslationTables::standard();
        assert_eq!(
            tables.xinput_trigger(InputKey::L2),
            Some(XInputAxisSlot {
                slot: 2,
                sign: AxisSign::Positive
            })
        );
        assert_eq!(
            tables.xinput_trigger(InputKey::R2).map(|s| s.sign),
            Some(AxisSign::Negative)
        );
        for key in InputKey::ALL.into_iter().filter(|k| k.is_analog()) {
            assert_eq!(tables.xinput_trigger(key), None, "{key}");
        }
    }
}
