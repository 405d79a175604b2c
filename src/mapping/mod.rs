//! Controller input normalization.
//!
//! Turns a physical device plus the SDL community database (or the device's
//! own capture) into one [`MappingTable`] per device, which the target
//! encoders then serialize.
//!
//! ```text
//! PhysicalDevice ─┐
//!                 ├─► Normalizer ─► MappingTable ─► TargetEncoder ─► ConfigSink
//! gamecontrollerdb┘
//! ```

pub mod composite;
pub mod database;
pub mod descriptor;
pub mod error;
pub mod input_key;
pub mod json_profile;
pub mod legacy;
pub mod manager;
pub mod normalizer;
pub mod strategy;
pub mod structured;
pub mod table;
pub mod tables;

pub use composite::CompositeEncoder;
pub use database::{find_mapping, ControllerDatabase, DatabaseRecord};
pub use descriptor::{AxisSign, HatDirection, RawControlDescriptor, Token};
pub use error::MappingError;
pub use input_key::InputKey;
pub use json_profile::JsonProfileEncoder;
pub use legacy::LegacyJoystickEncoder;
pub use manager::ConfigurationManager;
pub use normalizer::Normalizer;
pub use strategy::{EncodeReport, EncoderCapabilities, TargetEncoder, TargetType};
pub use structured::StructuredEncoder;
pub use table::{MappingTable, PlayerMapping};
pub use tables::TranslationTables;
