//! Resolution of canonical keys to raw controls for one device
//!
//! # Resolution order
//!
//! ```text
//! keyboard ──► device capture ──────────────────────────────► descriptor
//! gamepad  ──► [face swap] ──► capture │ database ──► orient ──► [xinput remap]
//! ```
//!
//! Every step is a pure function of the device, the injected tables, the
//! database and the encoder capabilities.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::controller::PhysicalDevice;
use crate::mapping::descriptor::{AxisRange, AxisSign, HatDirection, Token};
use crate::mapping::input_key::KeyKind;
use crate::mapping::{
    ControllerDatabase, DatabaseRecord, EncoderCapabilities, InputKey, MappingError, MappingTable,
    RawControlDescriptor, TranslationTables,
};

/// Resolves canonical keys for one encoder's capabilities
pub struct Normalizer<'a> {
    tables: &'a TranslationTables,
    database: Option<&'a ControllerDatabase>,
    capabilities: EncoderCapabilities,
}

impl<'a> Normalizer<'a> {
    /// `database` is `None` when the community database was unavailable
    pub fn new(
        tables: &'a TranslationTables,
        database: Option<&'a ControllerDatabase>,
        capabilities: EncoderCapabilities,
    ) -> Self {
        Self {
            tables,
            database,
            capabilities,
        }
    }

    /// Binding of one key, `Unbound` when nothing matches
    pub fn resolve(&self, device: &PhysicalDevice, key: InputKey) -> RawControlDescriptor {
        let record = self.record_for(device).ok().flatten();
        self.resolve_with(device, key, record)
    }

    /// Builds the full table; database misses are returned for logging
    pub fn build_table(&self, device: &PhysicalDevice) -> (MappingTable, Option<MappingError>) {
        let (record, issue) = match self.record_for(device) {
            Ok(record) => (record, None),
            Err(e) => {
                warn!("Player {} ({}): {}", device.player_index, device.name, e);
                (None, Some(e))
            }
        };

        let entries: BTreeMap<InputKey, RawControlDescriptor> = InputKey::ALL
            .into_iter()
            .map(|key| (key, self.resolve_with(device, key, record)))
            .collect();
        let table = MappingTable::from_entries(entries);
        debug!(
            "Player {} ({}): {} of {} keys bound",
            device.player_index,
            device.name,
            table.bound_count(),
            InputKey::ALL.len()
        );
        (table, issue)
    }

    /// Keyboards and fully captured pads never need the database
    fn record_for(&self, device: &PhysicalDevice) -> Result<Option<&'a DatabaseRecord>, MappingError> {
        if device.is_keyboard {
            return Ok(None);
        }
        if InputKey::ALL.iter().all(|key| device.capture.contains_key(key)) {
            return Ok(None);
        }
        let Some(database) = self.database else {
            return Ok(None);
        };
        database.lookup(&device.guid).map(Some)
    }

    fn resolve_with(
        &self,
        device: &PhysicalDevice,
        key: InputKey,
        record: Option<&DatabaseRecord>,
    ) -> RawControlDescriptor {
        if device.is_keyboard {
            return device.capture.get(&key).copied().unwrap_or_default();
        }

        let physical_key = if self.capabilities.nintendo_face_swap && device.is_nintendo() {
            self.tables
                .face_swap(device.vendor_id, key, self.capabilities.nintendo_swap_xy)
        } else {
            key
        };

        let control = match device.capture.get(&physical_key) {
            Some(captured) => *captured,
            None => match record.and_then(|r| self.lookup_token(r, physical_key)) {
                Some(token) => orient(token, physical_key),
                None => RawControlDescriptor::Unbound,
            },
        };

        let control = self.check_hat(device, key, control);

        if self.capabilities.xinput_slots && device.is_xinput {
            self.remap_xinput(key, control)
        } else {
            control
        }
    }

    fn lookup_token(&self, record: &DatabaseRecord, key: InputKey) -> Option<Token> {
        self.tables
            .sdl_candidates(key)
            .iter()
            .find_map(|name| record.binding(name))
    }

    fn check_hat(
        &self,
        device: &PhysicalDevice,
        key: InputKey,
        control: RawControlDescriptor,
    ) -> RawControlDescriptor {
        let RawControlDescriptor::Hat { id, bit } = control else {
            return control;
        };
        if HatDirection::from_bit(bit).is_some() || self.capabilities.diagonal_hats {
            return control;
        }
        warn!(
            "Player {}: hat {} mask {} for {} is not a single direction, leaving unbound",
            device.player_index, id, bit, key
        );
        RawControlDescriptor::Unbound
    }

    /// Moves analog triggers onto the shared XInput Z axis; sticks, buttons
    /// and digital triggers keep their SDL index
    fn remap_xinput(&self, key: InputKey, control: RawControlDescriptor) -> RawControlDescriptor {
        match (control, self.tables.xinput_trigger(key)) {
            (RawControlDescriptor::Axis { .. }, Some(slot)) => RawControlDescriptor::Axis {
                id: slot.slot,
                sign: slot.sign,
            },
            _ => control,
        }
    }
}

/// Applies the key's expected direction to a database token, exactly once
pub fn orient(token: Token, key: InputKey) -> RawControlDescriptor {
    let RawControlDescriptor::Axis { id, sign } = token.control else {
        return token.control;
    };
    let wanted = match key.kind() {
        KeyKind::AnalogHalf(direction) => direction,
        _ => AxisSign::Positive,
    };
    let sign = match token.range {
        AxisRange::Half => sign,
        AxisRange::Full => wanted,
        AxisRange::FullInverted => wanted.flipped(),
    };
    RawControlDescriptor::Axis { id, sign }
}
