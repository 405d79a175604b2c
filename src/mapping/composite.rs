//! Composite string encoder
//!
//! Every control becomes one quoted parameter string:
//! `engine:sdl,port:0,guid:<guid>,button:3`. Sticks are written as a single
//! `axis_x`/`axis_y` pair, `[empty]` marks an unbound control.

use crate::controller::PhysicalDevice;
use crate::mapping::{
    EncoderCapabilities, HatDirection, InputKey, PlayerMapping, RawControlDescriptor, TargetEncoder,
    TargetType,
};
use crate::persistence::ConfigSink;

/// Value written for a control with no binding
pub const EMPTY_BINDING: &str = "[empty]";
const SECTION: &str = "Controls";

/// Key suffix per canonical button
fn button_name(key: InputKey) -> Option<&'static str> {
    Some(match key {
        InputKey::A => "button_a",
        InputKey::B => "button_b",
        InputKey::X => "button_x",
        InputKey::Y => "button_y",
        InputKey::L1 => "button_l",
        InputKey::R1 => "button_r",
        InputKey::L2 => "button_zl",
        InputKey::R2 => "button_zr",
        InputKey::L3 => "button_lstick",
        InputKey::R3 => "button_rstick",
        InputKey::Start => "button_plus",
        InputKey::Select => "button_minus",
        InputKey::Hotkey => "button_home",
        InputKey::Up => "button_dup",
        InputKey::Down => "button_ddown",
        InputKey::Left => "button_dleft",
        InputKey::Right => "button_dright",
        _ => return None,
    })
}

/// Encoder for `engine:sdl,...` parameter strings
#[derive(Debug, Clone)]
pub struct CompositeEncoder {
    name: String,
    max_players: usize,
    threshold: f32,
    deadzone: f32,
}

impl Default for CompositeEncoder {
    fn default() -> Self {
        Self {
            name: "Composite SDL strings".to_string(),
            max_players: 8,
            threshold: 0.5,
            deadzone: 0.15,
        }
    }
}

impl CompositeEncoder {
    fn prefix(device: &PhysicalDevice) -> String {
        format!("engine:sdl,port:{},guid:{}", device.device_index, device.guid)
    }

    /// Parameter string of one digital control
    pub fn button_param(&self, device: &PhysicalDevice, control: RawControlDescriptor) -> String {
        if device.is_keyboard {
            return match control {
                RawControlDescriptor::Button { id } => format!("engine:keyboard,code:{id}"),
                _ => EMPTY_BINDING.to_string(),
            };
        }
        let prefix = Self::prefix(device);
        match control {
            RawControlDescriptor::Button { id } => format!("{prefix},button:{id}"),
            RawControlDescriptor::Axis { id, sign } => format!(
                "{prefix},axis:{id},direction:{},threshold:{:.1}",
                sign.as_char(),
                self.threshold
            ),
            RawControlDescriptor::Hat { id, bit } => match HatDirection::from_bit(bit) {
                Some(direction) => format!("{prefix},hat:{id},direction:{}", direction.name()),
                None => EMPTY_BINDING.to_string(),
            },
            RawControlDescriptor::Unbound => EMPTY_BINDING.to_string(),
        }
    }

    /// Stick from its positive halves (right, down)
    pub fn stick_param(
        &self,
        device: &PhysicalDevice,
        horizontal: RawControlDescriptor,
        vertical: RawControlDescriptor,
    ) -> String {
        match (horizontal, vertical, device.is_keyboard) {
            (
                RawControlDescriptor::Axis { id: x, sign: sx },
                RawControlDescriptor::Axis { id: y, sign: sy },
                false,
            ) => format!(
                "{},axis_x:{x},axis_y:{y},invert_x:{},invert_y:{},deadzone:{:.2}",
                Self::prefix(device),
                sx.as_char(),
                sy.as_char(),
                self.deadzone
            ),
            _ => EMPTY_BINDING.to_string(),
        }
    }
}

fn quoted(value: String) -> String {
    format!("\"{value}\"")
}

impl TargetEncoder for CompositeEncoder {
    fn get_type(&self) -> TargetType {
        TargetType::Composite
    }

    fn capabilities(&self) -> EncoderCapabilities {
        EncoderCapabilities {
            nintendo_face_swap: true,
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
        let table = &player.table;
        sink.set(SECTION, &format!("player_{port}_connected"), "true".to_string());

        for key in InputKey::ALL {
            if let Some(name) = button_name(key) {
                let value = self.button_param(device, table.get(key));
                sink.set(SECTION, &format!("player_{port}_{name}"), quoted(value));
            }
        }

        let sticks = [
            ("lstick", InputKey::LeftAnalogRight, InputKey::LeftAnalogDown),
            ("rstick", InputKey::RightAnalogRight, InputKey::RightAnalogDown),
        ];
        for (name, horizontal, vertical) in sticks {
            let value = self.stick_param(device, table.get(horizontal), table.get(vertical));
            sink.set(SECTION, &format!("player_{port}_{name}"), quoted(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Guid;
    use crate::mapping::AxisSign;

    fn pad() -> PhysicalDevice {
        PhysicalDevice::gamepad(Guid::parse("030000005e0400008e02000000007801").unwrap(), 1, 2, "Pad")
    }

    #[test]
    fn button_params() {
        let encoder = CompositeEncoder::default();
        let device = pad();
        let guid = "030000005e0400008e02000000007801";
        assert_eq!(
            encoder.button_param(&device, RawControlDescriptor::Button { id: 3 }),
            format!("engine:sdl,port:2,guid:{guid},button:3")
        );
        assert_eq!(
            encoder.button_param(
                &device,
                RawControlDescriptor::Axis {
                    id: 4,
                    sign: AxisSign::Positive
                }
            ),
            format!("engine:sdl,port:2,guid:{guid},axis:4,direction:+,threshold:0.5")
        );
        assert_eq!(
            encoder.button_param(&device, RawControlDescriptor::Hat { id: 0, bit: 8 }),
            format!("engine:sdl,port:2,guid:{guid},hat:0,direction:left")
        );
        assert_eq!(
            encoder.button_param(&device, RawControlDescriptor::Unbound),
            EMPTY_BINDING
        );
    }

    #[test]
    fn stick_needs_two_axes() {
        let encoder = CompositeEncoder::default();
        let device = pad();
        let x = RawControlDescriptor::Axis {
            id: 0,
            sign: AxisSign::Positive,
        };
        let y = RawControlDescriptor::Axis {
            id: 1,
            sign: AxisSign::Negative,
        };
        assert!(encoder
            .stick_param(&device, x, y)
            .ends_with("axis_x:0,axis_y:1,invert_x:+,invert_y:-,deadzone:0.15"));
        assert_eq!(
            encoder.stick_param(&device, x, RawControlDescriptor::Unbound),
            EMPTY_BINDING
        );
    }

    #[test]
    fn keyboard_codes() {
        let encoder = CompositeEncoder::default();
        let keyboard = pad().with_keyboard(true);
        assert_eq!(
            encoder.button_param(&keyboard, RawControlDescriptor::Button { id: 97 }),
            "engine:keyboard,code:97"
        );
    }
}
