use std::collections::BTreeMap;

use crate::controller::PhysicalDevice;
use crate::mapping::{InputKey, RawControlDescriptor};

/// Resolved bindings of one device, read-only once built
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingTable {
    entries: BTreeMap<InputKey, RawControlDescriptor>,
}

impl MappingTable {
    pub(crate) fn from_entries(entries: BTreeMap<InputKey, RawControlDescriptor>) -> Self {
        Self { entries }
    }

    /// Missing keys read as `Unbound`
    pub fn get(&self, key: InputKey) -> RawControlDescriptor {
        self.entries.get(&key).copied().unwrap_or_default()
    }

    /// Bound entries in canonical key order
    pub fn iter(&self) -> impl Iterator<Item = (InputKey, RawControlDescriptor)> + '_ {
        self.entries
            .iter()
            .filter(|(_, control)| control.is_bound())
            .map(|(key, control)| (*key, *control))
    }

    /// Number of keys with a binding
    pub fn bound_count(&self) -> usize {
        self.iter().count()
    }
}

/// A device together with its table, as handed to encoders
#[derive(Debug, Clone)]
pub struct PlayerMapping<'a> {
    pub device: &'a PhysicalDevice,
    pub table: MappingTable,
}

impl PlayerMapping<'_> {
    /// 1-based player index of the device
    pub fn player_index(&self) -> u32 {
        self.device.player_index
    }
}
