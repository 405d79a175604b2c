//! JSON player profile encoder
//!
//! One `player<n>` object per pad holding device identity and the SDL token
//! text of every bound key. Unbound keys are left out of the object.

use crate::mapping::{EncoderCapabilities, PlayerMapping, RawControlDescriptor, TargetEncoder, TargetType};
use crate::persistence::{ConfigSink, OutputFormat};

/// Encoder for JSON player profiles
#[derive(Debug, Clone)]
pub struct JsonProfileEncoder {
    name: String,
    max_players: usize,
}

impl Default for JsonProfileEncoder {
    fn default() -> Self {
        Self {
            name: "JSON player profiles".to_string(),
            max_players: 5,
        }
    }
}

impl TargetEncoder for JsonProfileEncoder {
    fn get_type(&self) -> TargetType {
        TargetType::Json
    }

    fn capabilities(&self) -> EncoderCapabilities {
        EncoderCapabilities {
            nintendo_face_swap: true,
            nintendo_swap_xy: true,
            ..Default::default()
        }
    }

    fn max_players(&self) -> usize {
        self.max_players
    }

    fn output_format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn get_name(&self) -> String {
        self.name.clone()
    }

    fn encode_player(&self, port: usize, player: &PlayerMapping<'_>, sink: &mut dyn ConfigSink) {
        let device = player.device;
        let section = format!("player{}", port + 1);

        sink.set_int(&section, "port", port as i64);
        sink.set_int(&section, "index", i64::from(device.device_index));
        sink.set(&section, "guid", device.guid.to_string());
        sink.set(&section, "name", device.name.clone());
        let kind = if device.is_keyboard { "keyboard" } else { "gamepad" };
        sink.set(&section, "type", kind.to_string());

        for (key, control) in player.table.iter() {
            let token = match (device.is_keyboard, control) {
                (true, RawControlDescriptor::Button { id }) => Some(format!("k{id}")),
                (true, _) => None,
                (false, control) => control.sdl_token(),
            };
            if let Some(token) = token {
                sink.set(&section, key.name(), token);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Guid, PhysicalDevice};
    use crate::mapping::{ControllerDatabase, InputKey, Normalizer, TranslationTables};
    use crate::persistence::JsonDocument;
    use serde_json::Value;

    #[test]
    fn writes_tokens_and_skips_unbound() {
        let tables = TranslationTables::standard();
        let db = ControllerDatabase::parse(
            "030000005e0400008e02000000007801,Xbox,a:b0,lefttrigger:a2,dpup:h0.1\n",
        );
        let encoder = JsonProfileEncoder::default();
        let normalizer = Normalizer::new(&tables, Some(&db), encoder.capabilities());
        let device = PhysicalDevice::gamepad(
            Guid::parse("030000005e0400008e02000000007801").unwrap(),
            1,
            0,
            "Xbox",
        );
        let (table, _) = normalizer.build_table(&device);
        let mut doc = JsonDocument::default();
        encoder.encode_player(
            0,
            &PlayerMapping {
                device: &device,
                table,
            },
            &mut doc,
        );

        assert_eq!(doc.get("player1", "a"), Some(&Value::from("b0")));
        assert_eq!(doc.get("player1", "l2"), Some(&Value::from("+a2")));
        assert_eq!(doc.get("player1", "up"), Some(&Value::from("h0.1")));
        assert_eq!(doc.get("player1", "port"), Some(&Value::from(0)));
        assert_eq!(doc.get("player1", InputKey::B.name()), None);
    }
}
