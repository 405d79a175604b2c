//! Trait definitions shared by all target encoders.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use tracing::{debug, info};

use crate::mapping::{
    CompositeEncoder, JsonProfileEncoder, LegacyJoystickEncoder, MappingError, PlayerMapping,
    StructuredEncoder,
};
use crate::persistence::{ConfigSink, OutputFormat};

/// Destination grammars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// Signed integer joystick codes
    Legacy,

    /// `engine:sdl,port:N,guid:G,...` strings
    Composite,

    /// Per-pad sections with named D-pad keys
    Structured,

    /// JSON player profiles with SDL tokens
    Json,
}

impl TargetType {
    pub const ALL: [TargetType; 4] = [
        TargetType::Legacy,
        TargetType::Composite,
        TargetType::Structured,
        TargetType::Json,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TargetType::Legacy => "legacy",
            TargetType::Composite => "composite",
            TargetType::Structured => "structured",
            TargetType::Json => "json",
        }
    }

    /// Encoder with the target's default settings
    pub fn create_encoder(self) -> Box<dyn TargetEncoder> {
        match self {
            TargetType::Legacy => Box::new(LegacyJoystickEncoder::default()),
            TargetType::Composite => Box::new(CompositeEncoder::default()),
            TargetType::Structured => Box::new(StructuredEncoder::default()),
            TargetType::Json => Box::new(JsonProfileEncoder::default()),
        }
    }
}

impl Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetType {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MappingError::ConfigError(format!("Unknown target: {s}")))
    }
}

/// Normalization steps an encoder asks for
///
/// Whether a target wants XInput slot numbers or the Nintendo face swap is a
/// property of that target's grammar, so each encoder declares it here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncoderCapabilities {
    /// Target consumes raw XInput axis slots
    pub xinput_slots: bool,
    /// Swap a/b on Nintendo pads
    pub nintendo_face_swap: bool,
    /// Also swap x/y on Nintendo pads
    pub nintendo_swap_xy: bool,
    /// Target can express diagonal hat masks
    pub diagonal_hats: bool,
}

/// Outcome of one encoding run
#[derive(Debug, Default)]
pub struct EncodeReport {
    /// Player indices written, in output order
    pub written: Vec<u32>,
    /// Player indices beyond the target's cap
    pub dropped: Vec<u32>,
    /// Recoverable problems met along the way
    pub issues: Vec<MappingError>,
}

/// One implementation per destination grammar
pub trait TargetEncoder {
    /// Grammar this encoder writes
    fn get_type(&self) -> TargetType;

    /// Normalization steps the target grammar expects
    fn capabilities(&self) -> EncoderCapabilities;

    /// Documented maximum number of players of the target
    fn max_players(&self) -> usize;

    /// Native file format of the target
    fn output_format(&self) -> OutputFormat {
        OutputFormat::Ini
    }

    /// Writes one player; `port` is the 0-based output slot
    fn encode_player(&self, port: usize, player: &PlayerMapping<'_>, sink: &mut dyn ConfigSink);

    /// Human-readable name for logs
    fn get_name(&self) -> String {
        format!("{} encoder", self.get_type())
    }

    /// Writes all players in player order up to the target cap
    fn encode(&self, players: &[PlayerMapping<'_>], sink: &mut dyn ConfigSink) -> EncodeReport {
        encode_capped(self, players, sink, None)
    }
}

/// Sorts by player index and writes at most `min(cap, max_players)` players
pub fn encode_capped<E: TargetEncoder + ?Sized>(
    encoder: &E,
    players: &[PlayerMapping<'_>],
    sink: &mut dyn ConfigSink,
    cap: Option<usize>,
) -> EncodeReport {
    let limit = cap.map_or(encoder.max_players(), |c| c.min(encoder.max_players()));
    let mut ordered: Vec<&PlayerMapping<'_>> = players.iter().collect();
    ordered.sort_by_key(|p| p.player_index());

    let mut report = EncodeReport::default();
    for (port, player) in ordered.into_iter().enumerate() {
        if port >= limit {
            info!(
                "{} supports {} players, not writing player {}",
                encoder.get_name(),
                limit,
                player.player_index()
            );
            report.dropped.push(player.player_index());
            report.issues.push(MappingError::TargetCapExceeded {
                target: encoder.get_type().to_string(),
                cap: limit,
                player_index: player.player_index(),
            });
            continue;
        }
        debug!(
            "Encoding player {} ({}) on port {}",
            player.player_index(),
            player.device.name,
            port
        );
        encoder.encode_player(port, player, sink);
        report.written.push(player.player_index());
    }
    report
}
