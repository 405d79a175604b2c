//! Canonical input key space
//!
//! A closed set of abstract controls shared by every device and every target.
//! The declaration order is the total order used when iterating tables.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::mapping::descriptor::{AxisSign, HatDirection};
use crate::mapping::MappingError;

/// Device-independent control identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKey {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    X,
    Y,
    Start,
    Select,
    /// Emulator menu / guide button
    Hotkey,
    L1,
    R1,
    /// Left trigger, analog or digital
    L2,
    /// Right trigger, analog or digital
    R2,
    /// Left stick click
    L3,
    /// Right stick click
    R3,
    /// Negative half of the left stick Y axis
    LeftAnalogUp,
    LeftAnalogDown,
    LeftAnalogLeft,
    LeftAnalogRight,
    /// Negative half of the right stick Y axis
    RightAnalogUp,
    RightAnalogDown,
    RightAnalogLeft,
    RightAnalogRight,
}

/// Physical category a key is expected to be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    DPad(HatDirection),
    Button,
    Trigger,
    AnalogHalf(AxisSign),
}

impl InputKey {
    /// Every key in canonical order
    pub const ALL: [InputKey; 25] = [
        InputKey::Up,
        InputKey::Down,
        InputKey::Left,
        InputKey::Right,
        InputKey::A,
        InputKey::B,
        InputKey::X,
        InputKey::Y,
        InputKey::Start,
        InputKey::Select,
        InputKey::Hotkey,
        InputKey::L1,
        InputKey::R1,
        InputKey::L2,
        InputKey::R2,
        InputKey::L3,
        InputKey::R3,
        InputKey::LeftAnalogUp,
        InputKey::LeftAnalogDown,
        InputKey::LeftAnalogLeft,
        InputKey::LeftAnalogRight,
        InputKey::RightAnalogUp,
        InputKey::RightAnalogDown,
        InputKey::RightAnalogLeft,
        InputKey::RightAnalogRight,
    ];

    /// Lowercase name used in configs and manifests
    pub fn name(self) -> &'static str {
        match self {
            InputKey::Up => "up",
            InputKey::Down => "down",
            InputKey::Left => "left",
            InputKey::Right => "right",
            InputKey::A => "a",
            InputKey::B => "b",
            InputKey::X => "x",
            InputKey::Y => "y",
            InputKey::Start => "start",
            InputKey::Select => "select",
            InputKey::Hotkey => "hotkey",
            InputKey::L1 => "l1",
            InputKey::R1 => "r1",
            InputKey::L2 => "l2",
            InputKey::R2 => "r2",
            InputKey::L3 => "l3",
            InputKey::R3 => "r3",
            InputKey::LeftAnalogUp => "leftanalogup",
            InputKey::LeftAnalogDown => "leftanalogdown",
            InputKey::LeftAnalogLeft => "leftanalogleft",
            InputKey::LeftAnalogRight => "leftanalogright",
            InputKey::RightAnalogUp => "rightanalogup",
            InputKey::RightAnalogDown => "rightanalogdown",
            InputKey::RightAnalogLeft => "rightanalogleft",
            InputKey::RightAnalogRight => "rightanalogright",
        }
    }

    pub fn kind(self) -> KeyKind {
        match self {
            InputKey::Up => KeyKind::DPad(HatDirection::Up),
            InputKey::Right => KeyKind::DPad(HatDirection::Right),
            InputKey::Down => KeyKind::DPad(HatDirection::Down),
            InputKey::Left => KeyKind::DPad(HatDirection::Left),
            InputKey::L2 | InputKey::R2 => KeyKind::Trigger,
            InputKey::LeftAnalogUp
            | InputKey::LeftAnalogLeft
            | InputKey::RightAnalogUp
            | InputKey::RightAnalogLeft => KeyKind::AnalogHalf(AxisSign::Negative),
            InputKey::LeftAnalogDown
            | InputKey::LeftAnalogRight
            | InputKey::RightAnalogDown
            | InputKey::RightAnalogRight => KeyKind::AnalogHalf(AxisSign::Positive),
            _ => KeyKind::Button,
        }
    }

    /// The key sharing the same physical axis with the opposite direction
    pub fn reverted(self) -> Option<InputKey> {
        match self {
            InputKey::LeftAnalogUp => Some(InputKey::LeftAnalogDown),
            InputKey::LeftAnalogDown => Some(InputKey::LeftAnalogUp),
            InputKey::LeftAnalogLeft => Some(InputKey::LeftAnalogRight),
            InputKey::LeftAnalogRight => Some(InputKey::LeftAnalogLeft),
            InputKey::RightAnalogUp => Some(InputKey::RightAnalogDown),
            InputKey::RightAnalogDown => Some(InputKey::RightAnalogUp),
            InputKey::RightAnalogLeft => Some(InputKey::RightAnalogRight),
            InputKey::RightAnalogRight => Some(InputKey::RightAnalogLeft),
            _ => None,
        }
    }

    /// Stick half keys
    pub fn is_analog(self) -> bool {
        matches!(self.kind(), KeyKind::AnalogHalf(_))
    }
}

impl Display for InputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputKey {
    type Err = MappingError;

    /// Accepts canonical names plus the front-end's legacy aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let key = match lower.as_str() {
            "pageup" => InputKey::L1,
            "pagedown" => InputKey::R1,
            "joystick1up" => InputKey::LeftAnalogUp,
            "joystick1left" => InputKey::LeftAnalogLeft,
            "joystick2up" => InputKey::RightAnalogUp,
            "joystick2left" => InputKey::RightAnalogLeft,
            other => {
                return InputKey::ALL
                    .iter()
                    .copied()
                    .find(|key| key.name() == other)
                    .ok_or_else(|| MappingError::ConfigError(format!("Unknown input key: {s}")))
            }
        };
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back_to_the_same_key() {
        for key in InputKey::ALL {
            assert_eq!(key.name().parse::<InputKey>().unwrap(), key);
        }
    }

    #[test]
    fn legacy_aliases_are_accepted() {
        assert_eq!("pageup".parse::<InputKey>().unwrap(), InputKey::L1);
        assert_eq!("PAGEDOWN".parse::<InputKey>().unwrap(), InputKey::R1);
        assert_eq!(
            "joystick2left".parse::<InputKey>().unwrap(),
            InputKey::RightAnalogLeft
        );
        assert!("turbo".parse::<InputKey>().is_err());
    }

    #[test]
    fn reverted_pairs_have_opposite_directions() {
        for key in InputKey::ALL.into_iter().filter(|k| k.is_analog()) {
            let other = key.reverted().unwrap();
            assert_eq!(other.reverted(), Some(key));
            match (key.kind(), other.kind()) {
                (KeyKind::AnalogHalf(a), KeyKind::AnalogHalf(b)) => assert_eq!(a, b.flipped()),
                _ => panic!("{key} is not an analog half"),
            }
        }
    }

    #[test]
    fn ordering_follows_declaration() {
        let mut keys = InputKey::ALL.to_vec();
        keys.reverse();
        keys.sort();
        assert_eq!(keys, InputKey::ALL.to_vec());
    }
}
