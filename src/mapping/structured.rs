//! Structured per-pad section encoder
//!
//! Writes one `[Pad<n>]` section per player with backtick-quoted control
//! expressions. Hats use compass names; a diagonal mask becomes a combined
//! expression of its cardinal bits.

use crate::mapping::{
    EncoderCapabilities, HatDirection, InputKey, PlayerMapping, RawControlDescriptor, TargetEncoder,
    TargetType,
};
use crate::persistence::ConfigSink;

fn control_name(key: InputKey) -> &'static str {
    match key {
        InputKey::A => "Buttons/A",
        InputKey::B => "Buttons/B",
        InputKey::X => "Buttons/X",
        InputKey::Y => "Buttons/Y",
        InputKey::Start => "Buttons/Start",
        InputKey::Select => "Buttons/Select",
        InputKey::Hotkey => "Buttons/Hotkey",
        InputKey::L1 => "Shoulders/L",
        InputKey::R1 => "Shoulders/R",
        InputKey::L2 => "Triggers/L",
        InputKey::R2 => "Triggers/R",
        InputKey::L3 => "Sticks/L3",
        InputKey::R3 => "Sticks/R3",
        InputKey::Up => "D-Pad/Up",
        InputKey::Down => "D-Pad/Down",
        InputKey::Left => "D-Pad/Left",
        InputKey::Right => "D-Pad/Right",
        InputKey::LeftAnalogUp => "Main Stick/Up",
        InputKey::LeftAnalogDown => "Main Stick/Down",
        InputKey::LeftAnalogLeft => "Main Stick/Left",
        InputKey::LeftAnalogRight => "Main Stick/Right",
        InputKey::RightAnalogUp => "C-Stick/Up",
        InputKey::RightAnalogDown => "C-Stick/Down",
        InputKey::RightAnalogLeft => "C-Stick/Left",
        InputKey::RightAnalogRight => "C-Stick/Right",
    }
}

fn compass(direction: HatDirection) -> &'static str {
    match direction {
        HatDirection::Up => "N",
        HatDirection::Right => "E",
        HatDirection::Down => "S",
        HatDirection::Left => "W",
    }
}

/// Encoder for per-pad sections with backtick expressions
#[derive(Debug, Clone)]
pub struct StructuredEncoder {
    name: String,
    max_players: usize,
    backend: String,
}

impl Default for StructuredEncoder {
    fn default() -> Self {
        Self {
            name: "Structured pad sections".to_string(),
            max_players: 4,
            backend: "SDL".to_string(),
        }
    }
}

/// Expression for one control, `None` when it should be left out
pub fn expression(control: RawControlDescriptor, keyboard: bool) -> Option<String> {
    match control {
        RawControlDescriptor::Button { id } if keyboard => Some(format!("`Key {id}`")),
        RawControlDescriptor::Button { id } => Some(format!("`Button {id}`")),
        RawControlDescriptor::Axis { id, sign } => Some(format!("`Axis {id}{}`", sign.as_char())),
        RawControlDescriptor::Hat { id, bit } => {
            let parts: Vec<String> = HatDirection::decompose(bit)
                .into_iter()
                .map(|dir| format!("`Hat {id} {}`", compass(dir)))
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(" & "))
            }
        }
        RawControlDescriptor::Unbound => None,
    }
}

impl TargetEncoder for StructuredEncoder {
    fn get_type(&self) -> TargetType {
        TargetType::Structured
    }

    fn capabilities(&self) -> EncoderCapabilities {
        EncoderCapabilities {
            diagonal_hats: true,
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
        let section = format!("Pad{}", port + 1);
        let source = if device.is_keyboard {
            "DInput/0/Keyboard Mouse".to_string()
        } else {
            format!("{}/{}/{}", self.backend, device.device_index, device.name)
        };
        sink.set(&section, "Device", source);

        for (key, control) in player.table.iter() {
            if let Some(value) = expression(control, device.is_keyboard) {
                sink.set(&section, control_name(key), value);
            }
        }
    }
}
