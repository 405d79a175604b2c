//! Controller input normalization and per-target configuration encoding.
//!
//! Given the physical devices of a launch, [`mapping::ConfigurationManager`]
//! resolves every canonical key of every device to a raw control and hands the
//! result to one target encoder, which writes it into a configuration sink.

pub mod config;
pub mod controller;
pub mod mapping;
pub mod persistence;
